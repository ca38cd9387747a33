use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::json;

use crate::{admin, error::ApiError, navigation, state::ApiState, subcategory, topic};

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
        .merge(navigation::routes())
        .merge(topic::routes())
        .merge(subcategory::routes())
        .merge(admin::routes())
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

/// Ready once the document store answers
async fn ready(State(state): State<ApiState>) -> Result<StatusCode, ApiError> {
    state.documents.ping().await.map_err(|err| {
        tracing::error!(error = %err, "Readiness check failed");
        ApiError::Unavailable("Document store unavailable".to_string())
    })?;

    Ok(StatusCode::OK)
}

async fn handler_404() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "The requested resource was not found" })),
    )
}
