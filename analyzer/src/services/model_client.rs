//! Chat-completions model client

use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

use shared::{GenerationConfig, ModelFailure};

use crate::config::AnalyzerConfig;
use crate::traits::ModelClient;
use crate::types::ModelResponse;

/// Model client for OpenAI-compatible chat-completions endpoints.
///
/// Makes exactly one attempt per call with no internal retry or backoff;
/// every transport, auth, or quota problem maps onto a `ModelFailure` and
/// the caller decides what to do with it.
pub struct OpenAiModelClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl OpenAiModelClient {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiModelClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        config: &GenerationConfig,
    ) -> Result<ModelResponse, ModelFailure> {
        let request_start = Instant::now();

        let request_body = serde_json::json!({
            "model": config.model,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ],
            "max_tokens": config.max_tokens,
            "temperature": config.temperature
        });

        debug!(
            model = %config.model,
            prompt_chars = user_prompt.len(),
            "sending completion request"
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(config.timeout())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelFailure::Timeout
                } else {
                    ModelFailure::Network(e.to_string())
                }
            })?;

        let response_time = request_start.elapsed();

        if !response.status().is_success() {
            warn!(status = %response.status(), "completion request failed");
            return match response.status().as_u16() {
                401 => Err(ModelFailure::AuthFailed),
                429 => Err(ModelFailure::RateLimited),
                503 => Err(ModelFailure::ServiceUnavailable),
                _ => Err(ModelFailure::ServerError(response.status().to_string())),
            };
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ModelFailure::Network(format!("failed to read response body: {e}")))?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelFailure::EmptyResponse)?;

        let usage = response_json.get("usage");
        let prompt_tokens = usage
            .and_then(|u| u.get("prompt_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;
        let completion_tokens = usage
            .and_then(|u| u.get("completion_tokens"))
            .and_then(|t| t.as_u64())
            .unwrap_or(0) as u32;

        debug!(
            elapsed_ms = response_time.as_millis() as u64,
            completion_tokens, "completion received"
        );

        Ok(ModelResponse {
            content: content.to_string(),
            prompt_tokens,
            completion_tokens,
            model_used: config.model.clone(),
            response_time,
        })
    }
}
