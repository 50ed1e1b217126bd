/*
 * Responsibility
 * - URL 構造を定義
 * - /, /health, /dogs, /dogs/{id}
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    dogs::{create_dog, delete_dog, get_dog, list_dogs, update_dog},
    root::{health, hello},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health))
        .route("/dogs", get(list_dogs).post(create_dog))
        .route(
            "/dogs/{id}",
            get(get_dog).patch(update_dog).delete(delete_dog),
        )
}
