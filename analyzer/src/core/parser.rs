//! Extraction and validation of model responses
//!
//! Models are asked for bare JSON but routinely wrap it in prose or a
//! fenced code block. This module locates the object, parses it against
//! the explicit response schema, clamps numeric fields into range, and
//! default-fills the optional collections. It returns a typed error
//! rather than panicking, so the caller's fallback decision stays
//! explicit and testable.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::debug;

use shared::{AnalysisResult, AnalysisSource, DecisionFactors, Recommendation};

use crate::error::AnalyzerError;

/// Raw shape accepted from the model, before validation. The mandatory
/// fields are optional here so their absence can be reported as a schema
/// violation with a useful message instead of an opaque serde error.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    executive_summary: Option<String>,
    relevance_score: Option<f64>,
    confidence_score: Option<f64>,
    #[serde(default)]
    key_requirements: Vec<String>,
    decision_factors: Option<DecisionFactors>,
    recommendation: Option<Recommendation>,
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)```").expect("fence pattern is valid"))
}

/// Locate the JSON object inside free-form model text. A fenced ```json
/// block wins; otherwise fall back to the span from the first `{` to the
/// last `}`.
fn extract_json_block(raw: &str) -> Result<&str, AnalyzerError> {
    if let Some(captures) = fence_regex().captures(raw) {
        if let Some(inner) = captures.get(1) {
            return Ok(inner.as_str().trim());
        }
    }

    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&raw[start..=end]),
        _ => Err(AnalyzerError::schema(
            "no JSON object found in model response",
        )),
    }
}

/// Parse a raw model response into a validated `AnalysisResult`.
///
/// On success the result is tagged `source = model` with
/// `processing_time` left at zero for the engine to stamp. Every failure
/// is an `AnalyzerError::Schema`; this function never panics on model
/// output.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, AnalyzerError> {
    let block = extract_json_block(raw)?;

    let parsed: RawAnalysis = serde_json::from_str(block)
        .map_err(|e| AnalyzerError::schema(format!("model response is not valid JSON: {e}")))?;

    let executive_summary = match parsed.executive_summary {
        Some(summary) if !summary.trim().is_empty() => summary,
        Some(_) => return Err(AnalyzerError::schema("executive_summary is empty")),
        None => {
            return Err(AnalyzerError::schema(
                "missing required field: executive_summary",
            ))
        }
    };

    let relevance_score = require_score(parsed.relevance_score, "relevance_score")?;
    let confidence_score = require_score(parsed.confidence_score, "confidence_score")?;

    Ok(AnalysisResult {
        executive_summary,
        relevance_score: clamp_score(relevance_score, "relevance_score"),
        confidence_score: clamp_score(confidence_score, "confidence_score"),
        key_requirements: parsed.key_requirements,
        decision_factors: parsed.decision_factors.unwrap_or_default(),
        recommendation: parsed.recommendation.unwrap_or_default(),
        source: AnalysisSource::Model,
        processing_time: 0.0,
    })
}

fn require_score(value: Option<f64>, field: &str) -> Result<f64, AnalyzerError> {
    match value {
        Some(value) if value.is_finite() => Ok(value),
        Some(_) => Err(AnalyzerError::schema(format!(
            "{field} is not a finite number"
        ))),
        None => Err(AnalyzerError::schema(format!(
            "missing required field: {field}"
        ))),
    }
}

/// Out-of-range scores are normalized, not rejected.
fn clamp_score(value: f64, field: &str) -> f64 {
    let clamped = value.clamp(0.0, 100.0);
    if clamped != value {
        debug!(field, value, clamped, "score outside 0-100, clamped");
    }
    clamped
}
