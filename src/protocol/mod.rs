//! Shopping list request protocol
//!
//! This module turns decoded HTTP requests into typed commands, validates
//! their bodies and executes them against the item store.

pub mod command;
pub mod create;
pub mod delete;
pub mod get;
pub mod reply;
pub mod update;

pub use command::Command;
pub use reply::Reply;

use serde_json::{Number, Value};

use crate::item::ValidationError;

/// Whether a `Content-Type` header value names a JSON body.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}

/// Decode a raw request body as JSON.
///
/// An empty body reads as `{}`, the same as a request sent without a JSON
/// content type.
pub(crate) fn decode_json(body: &[u8], err: ValidationError) -> Result<Value, ValidationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|_| err)
}

/// Read a JSON number as an integer count.
///
/// Integral floats such as `5.0` are accepted. Fractions and values outside
/// `i64` are out of range.
pub(crate) fn count_from_number(number: &Number) -> Result<i64, ValidationError> {
    if let Some(count) = number.as_i64() {
        return Ok(count);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < -(i64::MIN as f64) => {
            Ok(f as i64)
        }
        _ => Err(ValidationError::CountOutOfRange),
    }
}
