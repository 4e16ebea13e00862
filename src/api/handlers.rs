//! HTTP request handlers

use super::types::{ErrorResponse, UpdateResponse};
use super::AppState;
use crate::router::InboundEvent;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inbound chat events
        .route("/webhook/:token", post(receive_update))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Webhook
// ============================================================

async fn receive_update(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(event): Json<InboundEvent>,
) -> Result<Json<UpdateResponse>, AppError> {
    if token.as_str() != &*state.token {
        return Err(AppError::NotFound("Unknown webhook".to_string()));
    }

    let messages = state
        .runtime
        .handle_inbound(&event)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(UpdateResponse { messages }))
}

async fn get_version() -> &'static str {
    concat!("catalog-bot ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Webhook handling failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
