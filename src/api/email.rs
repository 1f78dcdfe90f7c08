//! Email dispatch endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::ApiState;
use crate::providers::EmailReceipt;

/// Build email router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/send_email", post(send_email))
        .with_state(state)
}

/// Email dispatch request
#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    pub email_account: String,
    pub subject: String,
    pub message: String,
}

/// Send an email to the given address
///
/// Always responds 200; provider failures surface in the `status` field
/// and never crash the service.
async fn send_email(
    State(state): State<Arc<ApiState>>,
    Json(request): Json<SendEmailRequest>,
) -> Json<EmailReceipt> {
    tracing::debug!(recipient = %request.email_account, "email dispatch");
    Json(
        state
            .email
            .send(&request.email_account, &request.subject, &request.message)
            .await,
    )
}
