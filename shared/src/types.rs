//! Core data types for the opportunity analysis engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::errors::{RecordError, RecordResult};

/// A government solicitation record under analysis.
///
/// Owned by the external record store; the engine treats it as read-only
/// input and never writes back to it. NAICS and PSC are two independent
/// classification systems and are carried separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityContext {
    pub notice_id: String,
    pub title: String,
    pub description: String,
    pub agency: String,
    pub naics_code: String,
    pub naics_description: String,
    pub psc_code: String,
    /// Set-aside designation, e.g. "8(a)" or "WOSB". None means full and open.
    pub set_aside: Option<String>,
    pub response_deadline: Option<DateTime<Utc>>,
    pub place_of_performance: String,
}

impl OpportunityContext {
    /// Check the contract the record store is expected to uphold.
    ///
    /// A record without an identity or a title cannot be analyzed or
    /// reported on. That is an upstream bug, not a degraded-mode case,
    /// so it surfaces to the caller instead of engaging the fallback.
    pub fn validate(&self) -> RecordResult<()> {
        if self.notice_id.trim().is_empty() {
            return Err(RecordError::MissingField {
                field: "notice_id".to_string(),
            });
        }
        if self.title.trim().is_empty() {
            return Err(RecordError::MissingField {
                field: "title".to_string(),
            });
        }
        Ok(())
    }
}

/// Capability and interest data used to personalize scoring.
///
/// Supplied by the user/profile service. The whole profile is optional
/// and every optional field inside it degrades gracefully when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequesterProfile {
    pub company_name: String,
    pub naics_codes: Vec<String>,
    pub certifications: Vec<String>,
    pub capabilities: Vec<String>,
    pub past_performance_summary: Option<String>,
    pub preferred_contract_range: Option<String>,
}

/// Go/no-go call produced by the analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "go")]
    Go,
    #[serde(rename = "no-go")]
    NoGo,
    #[default]
    #[serde(rename = "investigate")]
    Investigate,
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendedAction::Go => write!(f, "go"),
            RecommendedAction::NoGo => write!(f, "no-go"),
            RecommendedAction::Investigate => write!(f, "investigate"),
        }
    }
}

/// Which path produced a result: the generative model or the heuristic
/// fallback. Downstream UI uses this to flag degraded entries for manual
/// review instead of silently trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisSource {
    #[serde(rename = "model")]
    Model,
    #[serde(rename = "fallback")]
    Fallback,
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisSource::Model => write!(f, "model"),
            AnalysisSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Pros/cons/competition breakdown. Fields may be empty strings but the
/// triple itself is always present on a result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionFactors {
    #[serde(default)]
    pub pros: String,
    #[serde(default)]
    pub cons: String,
    #[serde(default)]
    pub competition: String,
}

/// Recommendation block: the call itself plus the reasoning behind it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub action: RecommendedAction,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub next_steps: String,
}

/// The structured judgment for one opportunity.
///
/// Every field is always present and both scores are always in [0, 100];
/// callers never need to null-check or re-clamp. Constructed per
/// invocation, returned immediately, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub executive_summary: String,
    pub relevance_score: f64,
    pub confidence_score: f64,
    pub key_requirements: Vec<String>,
    pub decision_factors: DecisionFactors,
    pub recommendation: Recommendation,
    pub source: AnalysisSource,
    /// Wall-clock seconds spent producing this result.
    pub processing_time: f64,
}

/// Generation parameters for model requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1000,
            // Low temperature: we want repeatable judgments, not creative prose.
            temperature: 0.3,
            timeout_seconds: 30,
        }
    }
}

impl GenerationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Failure kinds reported by a model endpoint.
///
/// The engine does not branch on the kind; every one of these collapses
/// into the same recoverable "model unavailable" path. The kind is kept
/// for logs, where repeated rate limiting looks very different from a
/// misconfigured key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFailure {
    RateLimited,
    AuthFailed,
    Timeout,
    ServiceUnavailable,
    ServerError(String),
    Network(String),
    EmptyResponse,
}

impl fmt::Display for ModelFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelFailure::RateLimited => write!(f, "rate limit exceeded"),
            ModelFailure::AuthFailed => write!(f, "authentication failed"),
            ModelFailure::Timeout => write!(f, "request timed out"),
            ModelFailure::ServiceUnavailable => write!(f, "service unavailable"),
            ModelFailure::ServerError(status) => write!(f, "server error: {status}"),
            ModelFailure::Network(message) => write!(f, "network error: {message}"),
            ModelFailure::EmptyResponse => write!(f, "empty response from model"),
        }
    }
}
