// Chat-completion client for the coaching advice service.
//
// `CompletionBackend` is the seam between request handling and the upstream
// API: production wires in `OpenAiClient`, tests substitute stubs.

pub mod client;
pub mod error;

use async_trait::async_trait;

pub use client::{ChatRequest, OpenAiClient, DEFAULT_BASE_URL};
pub use error::LlmError;

/// Anything that can turn a chat request into completion text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one request and return the first choice's message content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}
