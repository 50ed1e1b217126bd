/*
 * Responsibility
 * - /dogs 系 CRUD handler
 * - id / body の検証 → repo 呼び出し → status 付きレスポンス
 * - 対象が存在しない場合は 204 (エラー扱いしない)
 * - 想定外の store 失敗はログに出して 500
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::dogs::{DogReply, DogResponse, validate_create, validate_update},
        extractors::{DogId, JsonObject},
    },
    error::AppError,
    repos::error::RepoError,
    state::AppState,
};

pub async fn list_dogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<DogResponse>>, AppError> {
    let rows = state.dogs.list().await.map_err(|e| {
        tracing::error!(error = ?e, "failed to list dogs");
        AppError::Internal
    })?;

    Ok(Json(rows.into_iter().map(DogResponse::from).collect()))
}

pub async fn get_dog(State(state): State<AppState>, id: DogId) -> Result<DogReply, AppError> {
    let Some(key) = id.key() else {
        return Ok(DogReply::Absent);
    };

    let row = state
        .dogs
        .get(key)
        .await
        .map_err(|e| AppError::store("fetch", e))?;

    Ok(row.into())
}

pub async fn create_dog(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<DogReply, AppError> {
    let new_dog = validate_create(&body).map_err(AppError::Validation)?;

    let row = state
        .dogs
        .create(&new_dog)
        .await
        .map_err(|e| AppError::store("create", e))?;

    Ok(DogReply::created(row))
}

pub async fn update_dog(
    State(state): State<AppState>,
    id: DogId,
    JsonObject(body): JsonObject,
) -> Result<DogReply, AppError> {
    let changes = validate_update(&body).map_err(AppError::Validation)?;

    let Some(key) = id.key() else {
        return Ok(DogReply::Absent);
    };

    match state.dogs.update(key, &changes).await {
        Ok(row) => Ok(DogReply::ok(row)),
        Err(RepoError::NotFound) => Ok(DogReply::Absent),
        Err(e) => Err(AppError::store("update", e)),
    }
}

pub async fn delete_dog(State(state): State<AppState>, id: DogId) -> Result<DogReply, AppError> {
    let Some(key) = id.key() else {
        return Ok(DogReply::Absent);
    };

    match state.dogs.delete(key).await {
        Ok(row) => Ok(DogReply::ok(row)),
        Err(RepoError::NotFound) => Ok(DogReply::Absent),
        Err(e) => Err(AppError::store("delete", e)),
    }
}
