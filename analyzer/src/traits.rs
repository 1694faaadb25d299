//! Service trait definitions for dependency injection

use async_trait::async_trait;

use crate::types::ModelResponse;
use shared::{GenerationConfig, ModelFailure};

/// A generative model endpoint.
///
/// One call is one attempt: implementations must not retry internally, so
/// the orchestrator's at-most-one-attempt-per-item guarantee holds. The
/// client is stateless from the engine's point of view and is shared
/// freely across concurrent item tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Request a completion for the given system contract and instruction.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        config: &GenerationConfig,
    ) -> Result<ModelResponse, ModelFailure>;
}
