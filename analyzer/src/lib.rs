//! Opportunity analysis engine
//!
//! Turns free-form output from a generative model into a strictly typed,
//! numerically bounded `AnalysisResult`, falling back to a deterministic
//! heuristic scorer when the model is unavailable or returns
//! non-conforming output. A batch orchestrator fans analyses out under
//! bounded concurrency with inter-batch pacing, preserving input order.

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

pub use config::AnalyzerConfig;
pub use engine::OpportunityAnalyzer;
pub use error::{AnalyzerError, AnalyzerResult};
pub use services::OpenAiModelClient;
pub use traits::ModelClient;
pub use types::ModelResponse;
