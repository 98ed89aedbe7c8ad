// OpenAI-compatible chat-completions client.
//
// One non-streaming request per call: a system message plus a user message,
// answered with the text of the first returned choice. No retries.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::error::LlmError;
use crate::CompletionBackend;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const COMPLETIONS_PATH: &str = "/chat/completions";

// ---------------------------------------------------------------------------
// ChatRequest
// ---------------------------------------------------------------------------

/// A two-message conversation plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatRequest {
    /// JSON body for the chat-completions endpoint.
    pub fn to_body(&self) -> Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": self.system },
                { "role": "user", "content": self.user }
            ],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature
        })
    }
}

// ---------------------------------------------------------------------------
// OpenAiClient
// ---------------------------------------------------------------------------

pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    /// Build a client for `base_url` (e.g. `https://api.openai.com/v1`).
    ///
    /// The API key is used as given. An empty key is sent as-is and the
    /// upstream answers with an authentication error.
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            endpoint: format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request.to_body())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "completion response received");

        if !status.is_success() {
            return Err(LlmError::Status { status, body });
        }

        parse_completion_text(&body)
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extract `choices[0].message.content` from a chat-completions response.
///
/// Expected shape: `{ "choices": [ { "message": { "role": "assistant", "content": "..." } } ] }`
pub(crate) fn parse_completion_text(body: &str) -> Result<String, LlmError> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedResponse(format!("invalid JSON: {e}")))?;

    v.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            LlmError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
