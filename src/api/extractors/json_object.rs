//! Request body as a raw JSON object.
//!
//! Validation works on the keys the client actually sent, so the body is not
//! deserialized into a DTO here. An empty body reads as `{}`.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(AppError::MalformedBody(
                "request body should be a JSON object".into(),
            )),
            Err(e) => Err(AppError::MalformedBody(format!("malformed JSON body: {e}"))),
        }
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Self::from_bytes(&bytes)
    }
}
