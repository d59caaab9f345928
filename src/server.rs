//! HTTP surface of the relay.
//!
//! # Endpoints
//!
//! - `POST /` - Accepts GitHub webhook deliveries
//! - `GET /health` - Returns 200 if the server is running

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use thiserror::Error;
use tracing::{instrument, warn};

use crate::{
    github::{self, VerifyError},
    interaction::github_event::handle_github_event,
    runtime::Runtime,
};

/// Errors that can occur when processing a delivery.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The delivery failed verification or decoding.
    #[error(transparent)]
    Verify(#[from] VerifyError),

    /// At least one notification could not be delivered.
    #[error("delivery failed: {0:#}")]
    Delivery(anyhow::Error),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match &self {
            WebhookError::Verify(VerifyError::MissingSignature | VerifyError::InvalidSignature) => StatusCode::UNAUTHORIZED,
            WebhookError::Verify(VerifyError::MissingHeader(_) | VerifyError::EmptyBody | VerifyError::Decode(_)) => StatusCode::BAD_REQUEST,
            WebhookError::Delivery(_) => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}

/// Builds the axum router with all endpoints.
pub fn build_router(runtime: Runtime) -> Router {
    Router::new().route("/", post(webhook_handler)).route("/health", get(health_handler)).with_state(runtime)
}

/// Webhook handler.
///
/// # Response
///
/// - 200 OK: body is the number of notifications sent (possibly zero)
/// - 400 Bad Request: missing event header, empty body, or invalid JSON
/// - 401 Unauthorized: missing or invalid signature
/// - 502 Bad Gateway: a notification could not be delivered
#[instrument(skip_all)]
pub async fn webhook_handler(State(runtime): State<Runtime>, headers: HeaderMap, body: Bytes) -> Result<(StatusCode, String), WebhookError> {
    let event = github::parse_event(&headers, &body, &runtime.config).inspect_err(|e| warn!("Rejected delivery: {}", e))?;

    let delivered = handle_github_event(&event, &runtime.config.rules, &runtime.notify).await.map_err(WebhookError::Delivery)?;

    Ok((StatusCode::OK, delivered.to_string()))
}

/// Liveness probe.
pub async fn health_handler() -> &'static str {
    "OK"
}
