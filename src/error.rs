/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / validation error / body rejection を統一的に変換
 * - 「存在しない」は AppError ではない (handler が 204 を返す)
 */
use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorsResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("id should be a number")]
    InvalidId,
    #[error("invalid payload: {}", .0.join(", "))]
    Validation(Vec<String>),
    #[error("{0}")]
    MalformedBody(String),
    #[error(transparent)]
    BodyRejected(#[from] BytesRejection),
    #[error("failed to {action} dog")]
    Store { action: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    /// Logs the collaborator failure and hides it behind a generic 500.
    pub fn store(action: &'static str, e: RepoError) -> Self {
        tracing::error!(error = ?e, "failed to {action} dog");
        Self::Store { action }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidId | AppError::MalformedBody(_) => (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse {
                    message: self.to_string(),
                }),
            )
                .into_response(),
            AppError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsResponse { errors })).into_response()
            }
            AppError::BodyRejected(rejection) => rejection.into_response(),
            AppError::Store { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MessageResponse {
                    message: "Internal Server Error".into(),
                }),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(e: AppError) -> (StatusCode, Value) {
        let res = e.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn invalid_id_is_a_400_message() {
        let (status, body) = render(AppError::InvalidId).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"message": "id should be a number"}));
    }

    #[tokio::test]
    async fn validation_keeps_every_error_in_order() {
        let (status, body) = render(AppError::Validation(vec![
            "'color' is not a valid key".into(),
            "age should be a number".into(),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"errors": ["'color' is not a valid key", "age should be a number"]})
        );
    }

    #[tokio::test]
    async fn store_failures_are_opaque() {
        let (status, body) =
            render(AppError::store("delete", RepoError::Db(sqlx::Error::PoolClosed))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "failed to delete dog"}));
    }

    #[tokio::test]
    async fn internal_is_the_generic_failure() {
        let (status, body) = render(AppError::Internal).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Internal Server Error"}));
    }
}
