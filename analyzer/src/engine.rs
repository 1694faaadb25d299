//! Opportunity analysis engine: single-item pipeline and batch orchestration

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, warn};

use shared::{AnalysisResult, OpportunityContext, RequesterProfile};

use crate::config::AnalyzerConfig;
use crate::core::{context, fallback, parser, prompt};
use crate::error::{AnalyzerError, AnalyzerResult};
use crate::traits::ModelClient;

/// The analysis engine.
///
/// Cheap to clone: the model client and counters sit behind `Arc`, so
/// batch tasks clone the engine instead of borrowing across spawns. The
/// client is injected at construction time; tests substitute a
/// deterministic stub without touching process-wide state.
#[derive(Clone)]
pub struct OpportunityAnalyzer {
    client: Arc<dyn ModelClient>,
    config: AnalyzerConfig,
    schema_failures: Arc<AtomicU64>,
}

impl OpportunityAnalyzer {
    pub fn new(client: Arc<dyn ModelClient>, config: AnalyzerConfig) -> Self {
        Self {
            client,
            config,
            schema_failures: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of model responses rejected for violating the output
    /// contract since this engine was created. A climbing count against a
    /// healthy endpoint signals prompt drift.
    pub fn schema_failure_count(&self) -> u64 {
        self.schema_failures.load(Ordering::Relaxed)
    }

    /// Analyze a single opportunity.
    ///
    /// Total for well-formed records: after validation the only outcomes
    /// are a model-backed result or a fallback result, never an error.
    pub async fn analyze(
        &self,
        ctx: &OpportunityContext,
        profile: Option<&RequesterProfile>,
    ) -> AnalyzerResult<AnalysisResult> {
        ctx.validate()?;
        Ok(self.analyze_valid(ctx, profile).await)
    }

    /// Analyze many opportunities with bounded concurrency.
    ///
    /// The output always has one entry per input, at the input's position.
    /// Items are dispatched in fixed-size batches; within a batch all
    /// analyses run concurrently, and a pacing delay separates consecutive
    /// batches (never trailing the last one). A failing item degrades to
    /// its own fallback result and never affects its siblings.
    pub async fn analyze_batch(
        &self,
        items: &[OpportunityContext],
        profile: Option<&RequesterProfile>,
    ) -> AnalyzerResult<Vec<AnalysisResult>> {
        // Surface record-contract violations before any model call.
        for item in items {
            item.validate()?;
        }

        let total = items.len();
        let batch_size = self.config.batch_size.max(1);
        let mut slots: Vec<Option<AnalysisResult>> = (0..total).map(|_| None).collect();
        let profile = Arc::new(profile.cloned());

        for batch_start in (0..total).step_by(batch_size) {
            let batch_end = (batch_start + batch_size).min(total);
            debug!(batch_start, batch_end, total, "dispatching batch");

            let mut indices = Vec::with_capacity(batch_end - batch_start);
            let mut handles = Vec::with_capacity(batch_end - batch_start);
            for index in batch_start..batch_end {
                let engine = self.clone();
                let item = items[index].clone();
                let profile = Arc::clone(&profile);
                indices.push(index);
                handles.push(tokio::spawn(async move {
                    engine.analyze_valid(&item, profile.as_ref().as_ref()).await
                }));
            }

            // Fan-in: the whole batch settles before the next one starts.
            for (index, joined) in indices.into_iter().zip(join_all(handles).await) {
                let result = match joined {
                    Ok(result) => result,
                    Err(join_error) => {
                        warn!(index, %join_error, "analysis task died, using fallback");
                        fallback::fallback_analysis(
                            &items[index],
                            profile.as_ref().as_ref(),
                            Utc::now(),
                        )
                    }
                };
                // Each result lands in the slot keyed by input position, so
                // output order never depends on completion order.
                slots[index] = Some(result);
            }

            if batch_end < total {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        Ok(slots
            .into_iter()
            .map(|slot| slot.expect("every batch slot is written exactly once"))
            .collect())
    }

    /// Run the model pipeline for a validated record, degrading to the
    /// heuristic scorer on any model or schema failure.
    async fn analyze_valid(
        &self,
        ctx: &OpportunityContext,
        profile: Option<&RequesterProfile>,
    ) -> AnalysisResult {
        let started = Instant::now();

        let mut result = match self.attempt_model(ctx, profile).await {
            Ok(result) => result,
            Err(error) => {
                if let AnalyzerError::Schema { message } = &error {
                    self.schema_failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        notice_id = %ctx.notice_id,
                        %message,
                        "model response rejected, using fallback"
                    );
                } else {
                    warn!(
                        notice_id = %ctx.notice_id,
                        %error,
                        "model call failed, using fallback"
                    );
                }
                fallback::fallback_analysis(ctx, profile, Utc::now())
            }
        };

        result.processing_time = started.elapsed().as_secs_f64();
        debug!(
            notice_id = %ctx.notice_id,
            source = %result.source,
            action = %result.recommendation.action,
            relevance = result.relevance_score,
            "analysis complete"
        );
        result
    }

    /// One model attempt: build the context and prompts, call the client,
    /// validate the response. Exactly one `complete` call per invocation;
    /// retry policy, if any, belongs to a layer above this crate.
    async fn attempt_model(
        &self,
        ctx: &OpportunityContext,
        profile: Option<&RequesterProfile>,
    ) -> Result<AnalysisResult, AnalyzerError> {
        let context_text = context::build_context(ctx, profile);
        let instruction = prompt::analysis_instruction(&context_text, profile.is_some());

        let response = self
            .client
            .complete(prompt::SYSTEM_CONTRACT, &instruction, &self.config.generation)
            .await
            .map_err(|reason| AnalyzerError::ModelUnavailable { reason })?;

        parser::parse_analysis(&response.content)
    }
}
