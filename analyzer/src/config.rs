//! Engine configuration
//!
//! Configuration is explicit: it is read once (process environment plus
//! an optional `.env` file) and passed into the client and engine at
//! construction time. Nothing in this crate consults process-wide state
//! after that, so tests can substitute a deterministic stub client and
//! config without touching the environment.

use std::time::Duration;

use shared::GenerationConfig;

use crate::error::{AnalyzerError, AnalyzerResult};

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_API_BASE: &str = "ANALYZER_API_BASE";
const ENV_MODEL: &str = "ANALYZER_MODEL";
const ENV_BATCH_SIZE: &str = "ANALYZER_BATCH_SIZE";
const ENV_BATCH_DELAY_MS: &str = "ANALYZER_BATCH_DELAY_MS";

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_BATCH_SIZE: usize = 5;
const DEFAULT_BATCH_DELAY_MS: u64 = 1000;

/// Configuration for the analysis engine and its model client.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Base URL of an OpenAI-compatible endpoint, without trailing slash.
    pub api_base: String,
    pub api_key: String,
    pub generation: GenerationConfig,
    /// Items dispatched concurrently before the next batch starts.
    pub batch_size: usize,
    /// Pacing delay between batches, never applied after the last one.
    pub batch_delay: Duration,
}

impl AnalyzerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            generation: GenerationConfig::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
        }
    }

    /// Load configuration from the environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded
    /// first; variables already set in the process take precedence.
    /// `OPENAI_API_KEY` is required, everything else has a default.
    pub fn from_env() -> AnalyzerResult<Self> {
        let _ = dotenvy::dotenv();

        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| AnalyzerError::config(format!("{ENV_API_KEY} must be set")))?;

        let mut config = Self::new(api_key);

        if let Ok(api_base) = std::env::var(ENV_API_BASE) {
            config.api_base = api_base.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var(ENV_MODEL) {
            config.generation.model = model;
        }
        if let Ok(batch_size) = std::env::var(ENV_BATCH_SIZE) {
            config.batch_size = parse_env(ENV_BATCH_SIZE, &batch_size)?;
            if config.batch_size == 0 {
                return Err(AnalyzerError::config(format!(
                    "{ENV_BATCH_SIZE} must be at least 1"
                )));
            }
        }
        if let Ok(delay_ms) = std::env::var(ENV_BATCH_DELAY_MS) {
            config.batch_delay = Duration::from_millis(parse_env(ENV_BATCH_DELAY_MS, &delay_ms)?);
        }

        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> AnalyzerResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| AnalyzerError::config(format!("{name} has invalid value '{value}'")))
}
