// `POST /coach`: turn a player's match stats into coaching advice.
//
// The handler picks the first stat record, renders a prompt, makes one
// completion call and answers `{"advice": ...}` with status 200. Empty input
// and upstream failures are reported in-band through the two fallback texts.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, info, warn};

use touchline_core::payload::{CoachRequest, CoachResponse};
use touchline_core::prompt::{self, PromptMode, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE};
use touchline_llm::{ChatRequest, CompletionBackend, LlmError, OpenAiClient};

use crate::config::Config;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Process-wide state, built once at startup and shared read-only by every
/// request.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CompletionBackend>,
    pub model: String,
    pub prompt_mode: PromptMode,
}

impl AppState {
    /// Build the state with a real upstream client from the loaded config.
    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let api_key = config.credentials.openai_api_key.clone().unwrap_or_default();
        let client = OpenAiClient::new(api_key, &config.llm.base_url, config.llm.timeout())?;
        Ok(Self {
            backend: Arc::new(client),
            model: config.llm.model.clone(),
            prompt_mode: config.prompt.mode,
        })
    }
}

// ---------------------------------------------------------------------------
// Payload rejection
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

/// A request body that does not match the payload shape.
#[derive(Debug)]
pub struct InvalidPayload(pub JsonRejection);

impl IntoResponse for InvalidPayload {
    fn into_response(self) -> Response {
        let status: StatusCode = self.0.status();
        let body = ErrorBody {
            detail: self.0.body_text(),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

pub async fn coach_advice(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    payload: Result<Json<CoachRequest>, JsonRejection>,
) -> Result<Json<CoachResponse>, InvalidPayload> {
    info!("Received request from: {}", remote.ip());

    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected payload from {}: {}", remote.ip(), rejection.body_text());
        InvalidPayload(rejection)
    })?;

    Ok(Json(advise(&state, &request).await))
}

/// Produce the advice for one decoded request.
///
/// Never fails: every problem maps to one of the fallback responses.
pub async fn advise(state: &AppState, request: &CoachRequest) -> CoachResponse {
    info!(
        "Payload: {}",
        serde_json::to_string(request).unwrap_or_else(|e| format!("<unprintable: {e}>"))
    );

    let Some(record) = request.active_record() else {
        warn!("No player data provided");
        return CoachResponse::no_player_data();
    };

    // The thread-local RNG is not Send; it must be gone before the await.
    let prompt = prompt::build_prompt(state.prompt_mode, &record, &mut rand::thread_rng());

    let chat = ChatRequest {
        model: state.model.clone(),
        system: SYSTEM_PROMPT.to_string(),
        user: prompt.text,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    };

    info!(
        "Sending request to completion API (model={}, style={})",
        chat.model, prompt.style
    );

    let advice = match state.backend.complete(&chat).await {
        Ok(text) => {
            info!("Received advice from completion API");
            text
        }
        Err(e) => {
            error!(error = ?e, "Completion API call failed: {}", e);
            return CoachResponse::upstream_failure();
        }
    };

    info!("Returning advice to client");
    CoachResponse::new(advice)
}
