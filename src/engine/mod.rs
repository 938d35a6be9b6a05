pub mod client;
pub mod errors;

pub use client::OpenAiClient;
pub use errors::EngineError;

use async_trait::async_trait;

use crate::analysis::prompt::PromptPayload;

/// A hosted model that turns a prompt into free-form text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    async fn complete(&self, prompt: &PromptPayload) -> Result<String, EngineError>;

    /// Model identifier, for logs and health output.
    fn model(&self) -> &str;
}
