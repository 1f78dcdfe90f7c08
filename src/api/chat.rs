//! Conversation endpoint: one reasoning round per request

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::ApiState;
use crate::conversation::Turn;
use crate::Error;

/// Build chat router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/generate_response", post(generate_response))
        .with_state(state)
}

/// Conversation round request
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Model override; the server default is used when absent
    pub model: Option<String>,
    pub messages: Vec<Turn>,
}

/// Run one reasoning round over the submitted conversation
///
/// Returns the extended conversation as an ordered turn array.
async fn generate_response(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<Vec<Turn>>, ChatError> {
    let model = request.model.as_deref().unwrap_or(&state.default_model);
    tracing::debug!(model, turns = request.messages.len(), "reasoning round");

    let extended = state
        .orchestrator
        .run_round(request.messages, model)
        .await
        .map_err(|e| match e {
            Error::Conversation(msg) => ChatError::BadRequest(msg),
            other => ChatError::CompletionFailed(other.to_string()),
        })?;

    Ok(Json(extended))
}

/// Chat API errors
#[derive(Debug)]
pub enum ChatError {
    BadRequest(String),
    CompletionFailed(String),
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            error: ErrorBody,
        }

        #[derive(Serialize)]
        struct ErrorBody {
            code: &'static str,
            message: String,
        }

        let (status, code, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            Self::CompletionFailed(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "completion_failed", msg)
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: ErrorBody { code, message },
            }),
        )
            .into_response()
    }
}
