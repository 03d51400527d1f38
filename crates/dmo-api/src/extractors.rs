//! # JSON Body Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and pass it through
//! [`extract_json`] so malformed bodies produce the same structured error
//! body as every other failure.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
