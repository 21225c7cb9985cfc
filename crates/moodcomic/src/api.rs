//! HTTP API.

use crate::ComicPipeline;
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use moodcomic_core::GenerationRequest;
use moodcomic_error::{RequestError, RequestErrorKind, ServerError, ServerErrorKind};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pipeline: Arc<ComicPipeline>,
}

impl AppState {
    /// Create state around a pipeline.
    pub fn new(pipeline: ComicPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Creates the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate", post(generate))
        .with_state(state)
}

/// Bind `bind` and serve the API until the process stops.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind: &str, state: AppState) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Bind(format!("{}: {}", bind, e))))?;

    info!(bind, "Listening");
    axum::serve(listener, create_router(state))
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Generate a comic.
async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected request body");
            return error_response(&RequestError::new(RequestErrorKind::InvalidBody(
                rejection.body_text(),
            )));
        }
    };

    match state.pipeline.handle(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(err: &RequestError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(status = status.as_u16(), error = %err, "Generation failed");
    } else {
        warn!(status = status.as_u16(), error = %err, "Generation rejected");
    }
    (status, Json(json!({"error": err.user_message()}))).into_response()
}
