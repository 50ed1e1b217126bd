/*
 * Responsibility
 * - Path の :id を数値として解釈し、store のキー (i64) に変換する
 * - 10 進表記に加えて 0x / 0b / 0o 接頭辞の整数も受け付ける
 * - 数値でなければ AppError::InvalidId (400)
 * - 有限だが整数でない / i64 に収まらない値はどのレコードも指さない (key() == None)
 */
use std::num::IntErrorKind;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DogId {
    key: Option<i64>,
}

impl DogId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if let Some((radix, digits)) = split_radix_prefix(raw) {
            return Self::parse_radix(digits, radix);
        }

        let n: f64 = raw.parse().map_err(|_| AppError::InvalidId)?;
        if !n.is_finite() {
            return Err(AppError::InvalidId);
        }

        // 2^63 itself is not representable as i64
        let in_range = n >= i64::MIN as f64 && n < i64::MAX as f64;
        let key = (n.fract() == 0.0 && in_range).then_some(n as i64);

        Ok(Self { key })
    }

    // Unsigned only: a sign in front of the prefix is not a number.
    fn parse_radix(digits: &str, radix: u32) -> Result<Self, AppError> {
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return Err(AppError::InvalidId);
        }
        match i64::from_str_radix(digits, radix) {
            Ok(n) => Ok(Self { key: Some(n) }),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Self { key: None }),
            Err(_) => Err(AppError::InvalidId),
        }
    }

    /// The stored id this value can match, if any.
    pub fn key(&self) -> Option<i64> {
        self.key
    }
}

/// `0x` / `0b` / `0o` (any case) integer literals.
fn split_radix_prefix(raw: &str) -> Option<(u32, &str)> {
    let (prefix, digits) = raw.split_at_checked(2)?;
    let radix = match prefix.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0b" => 2,
        "0o" => 8,
        _ => return None,
    };
    Some((radix, digits))
}

impl<S> FromRequestParts<S> for DogId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidId)?;
        Self::parse(&raw)
    }
}
