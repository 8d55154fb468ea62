//! HTTP callback server.

use crate::PostingPipeline;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use croupier_error::{CroupierResult, HttpError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Inbound chat callback. Only `text` is used; other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingMessage {
    /// Message text
    #[serde(default)]
    pub text: String,
    /// Display name of the sender
    #[serde(default)]
    pub name: Option<String>,
}

/// Shared server state.
#[derive(Debug, Clone)]
pub struct ServerState {
    pipeline: Arc<PostingPipeline>,
}

impl ServerState {
    /// Creates server state around a pipeline.
    pub fn new(pipeline: Arc<PostingPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Build the callback router.
pub fn create_router(state: ServerState) -> Router {
    Router::new()
        .route("/newmessage", post(new_message))
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[instrument(skip(state, message), fields(sender = message.name.as_deref().unwrap_or("")))]
async fn new_message(
    State(state): State<ServerState>,
    Json(message): Json<IncomingMessage>,
) -> impl IntoResponse {
    let outcome = state.pipeline.handle(&message.text).await;
    (StatusCode::OK, outcome.response_text())
}

/// Serve the callback router on `host:port` until the process exits.
///
/// # Errors
///
/// Returns an [`HttpError`] if the address cannot be bound or the server
/// stops with an I/O error.
pub async fn serve(state: ServerState, host: &str, port: u16) -> CroupierResult<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", addr, e)))?;

    info!(addr = %addr, "Listening for chat callbacks");
    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}
