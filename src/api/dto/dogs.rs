/*
 * Responsibility
 * - Dogs の request validation / response DTO
 * - 許可キー (name, description, breed, age) 以外は全てエラーとして列挙する
 * - エラーはまとめて返す (部分適用はしない)
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::repos::dog_repo::{DogChanges, DogRow, NewDog};

pub const ALLOWED_KEYS: [&str; 4] = ["name", "description", "breed", "age"];

fn unknown_keys(body: &Map<String, Value>) -> Vec<String> {
    body.keys()
        .filter(|k| !ALLOWED_KEYS.contains(&k.as_str()))
        .map(|k| format!("'{k}' is not a valid key"))
        .collect()
}

/// Full check for POST /dogs.
///
/// Errors are ordered: unknown keys (in body order), then name, description, age.
pub fn validate_create(body: &Map<String, Value>) -> Result<NewDog, Vec<String>> {
    let mut errors = unknown_keys(body);

    let name = body.get("name").and_then(Value::as_str);
    if name.is_none() {
        errors.push("name should be a string".into());
    }

    let description = body.get("description").and_then(Value::as_str);
    if description.is_none() {
        errors.push("description should be a string".into());
    }

    let age = body.get("age").and_then(Value::as_f64);
    if age.is_none() {
        errors.push("age should be a number".into());
    }

    let breed = match body.get("breed") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push("breed should be a string or null".into());
            None
        }
    };

    match (name, description, age) {
        (Some(name), Some(description), Some(age)) if errors.is_empty() => Ok(NewDog {
            name: name.to_string(),
            description: description.to_string(),
            age,
            breed,
        }),
        _ => Err(errors),
    }
}

/// Key-only check for PATCH /dogs/:id; values pass through untouched.
pub fn validate_update(body: &Map<String, Value>) -> Result<DogChanges, Vec<String>> {
    let errors = unknown_keys(body);
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(DogChanges::new(body.clone()))
}

#[derive(Debug, Serialize)]
pub struct DogResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "serialize_age")]
    pub age: f64,
    pub breed: Option<String>,
}

// 2^53: beyond this an f64 no longer holds every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// Whole ages go out as JSON integers (3, not 3.0).
fn serialize_age<S: Serializer>(age: &f64, s: S) -> Result<S::Ok, S::Error> {
    if age.fract() == 0.0 && age.abs() < MAX_EXACT_INTEGER {
        s.serialize_i64(*age as i64)
    } else {
        s.serialize_f64(*age)
    }
}

impl From<DogRow> for DogResponse {
    fn from(row: DogRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            age: row.age,
            breed: row.breed,
        }
    }
}

/// Single-dog reply. A missing record is an empty 204, not an error.
#[derive(Debug)]
pub enum DogReply {
    Found(StatusCode, DogResponse),
    Absent,
}

impl DogReply {
    pub fn ok(row: DogRow) -> Self {
        Self::Found(StatusCode::OK, row.into())
    }

    pub fn created(row: DogRow) -> Self {
        Self::Found(StatusCode::CREATED, row.into())
    }
}

impl From<Option<DogRow>> for DogReply {
    fn from(row: Option<DogRow>) -> Self {
        row.map_or(Self::Absent, Self::ok)
    }
}

impl IntoResponse for DogReply {
    fn into_response(self) -> Response {
        match self {
            DogReply::Found(status, dog) => (status, Json(dog)).into_response(),
            DogReply::Absent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
