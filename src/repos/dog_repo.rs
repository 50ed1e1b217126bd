/*
 * Responsibility
 * - dogs テーブル向けの永続化インターフェース (DogRepo) と SQLx 実装
 * - handler は trait 経由でしか store に触れない (テストでは in-memory 実装に差し替え)
 * - 存在しないキーへの update/delete は RepoError::NotFound で返す
 */
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DogRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub age: f64,
    pub breed: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub description: String,
    pub age: f64,
    pub breed: Option<String>,
}

/// Allow-listed keys of a partial update, passed through as the client sent them.
///
/// Values are not type-checked at the HTTP layer; the store decides whether it
/// can apply them (see [`DogPatch::from_changes`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogChanges(Map<String, Value>);

impl DogChanges {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Typed column changes derived from [`DogChanges`].
#[derive(Debug, Default, PartialEq)]
pub struct DogPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub age: Option<f64>,
    // Tri-state:
    // - None: do not update
    // - Some(None): set NULL
    // - Some(Some(v)): set v
    pub breed: Option<Option<String>>,
}

impl DogPatch {
    pub fn from_changes(changes: &DogChanges) -> Result<Self, RepoError> {
        let text = |key: &str| -> Result<Option<String>, RepoError> {
            match changes.get(key) {
                None => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(other) => Err(RepoError::InvalidData(format!(
                    "{key} cannot be set to {other}"
                ))),
            }
        };

        let age = match changes.get("age") {
            None => None,
            Some(v) => Some(
                v.as_f64()
                    .ok_or_else(|| RepoError::InvalidData(format!("age cannot be set to {v}")))?,
            ),
        };

        let breed = match changes.get("breed") {
            None => None,
            Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(other) => {
                return Err(RepoError::InvalidData(format!(
                    "breed cannot be set to {other}"
                )));
            }
        };

        Ok(Self {
            name: text("name")?,
            description: text("description")?,
            age,
            breed,
        })
    }
}

#[async_trait]
pub trait DogRepo: Send + Sync {
    // Store-native order, no pagination.
    async fn list(&self) -> Result<Vec<DogRow>, RepoError>;

    async fn get(&self, id: i64) -> Result<Option<DogRow>, RepoError>;

    async fn create(&self, dog: &NewDog) -> Result<DogRow, RepoError>;

    // Err(RepoError::NotFound) when `id` does not exist.
    async fn update(&self, id: i64, changes: &DogChanges) -> Result<DogRow, RepoError>;

    // Returns the deleted row; Err(RepoError::NotFound) when `id` does not exist.
    async fn delete(&self, id: i64) -> Result<DogRow, RepoError>;
}

#[derive(Clone, Debug)]
pub struct PgDogRepo {
    pool: PgPool,
}

impl PgDogRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DogRepo for PgDogRepo {
    async fn list(&self) -> Result<Vec<DogRow>, RepoError> {
        let rows = sqlx::query_as::<_, DogRow>(
            r#"
            SELECT id, name, description, age, breed
            FROM dogs
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<DogRow>, RepoError> {
        let row = sqlx::query_as::<_, DogRow>(
            r#"
            SELECT id, name, description, age, breed
            FROM dogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, dog: &NewDog) -> Result<DogRow, RepoError> {
        let row = sqlx::query_as::<_, DogRow>(
            r#"
            INSERT INTO dogs (name, description, age, breed)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, age, breed
            "#,
        )
        .bind(&dog.name)
        .bind(&dog.description)
        .bind(dog.age)
        .bind(dog.breed.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, changes: &DogChanges) -> Result<DogRow, RepoError> {
        let patch = DogPatch::from_changes(changes)?;
        let breed = patch.breed.as_ref().map(|inner| inner.as_deref());

        let row = sqlx::query_as::<_, DogRow>(
            r#"
            UPDATE dogs
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                age = COALESCE($4, age),
                breed = CASE
                    WHEN $5 = false THEN breed
                    ELSE $6
                END
            WHERE id = $1
            RETURNING id, name, description, age, breed
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.age)
        .bind(breed.is_some()) // $5: flag to set breed
        .bind(breed.flatten()) // $6: new breed value
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: i64) -> Result<DogRow, RepoError> {
        let row = sqlx::query_as::<_, DogRow>(
            r#"
            DELETE FROM dogs
            WHERE id = $1
            RETURNING id, name, description, age, breed
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepoError::NotFound)
    }
}
