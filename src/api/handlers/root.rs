/*
 * Responsibility
 * - GET / (hello)
 * - GET /health (疎通用)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::error::MessageResponse;

pub async fn hello() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "Hello World!".into(),
        }),
    )
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
