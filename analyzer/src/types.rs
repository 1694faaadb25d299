//! Engine-internal data types

use std::time::Duration;

/// A successful completion from a model endpoint.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub content: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub model_used: String,
    pub response_time: Duration,
}

impl ModelResponse {
    pub fn total_tokens(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}
