//! # Extraction Helpers
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and
//! `Result<Path<T>, PathRejection>` so that rejections render with the
//! standard [`ErrorBody`](crate::error::ErrorBody) instead of axum's
//! plain-text defaults.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::Path;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::InvalidBody`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::InvalidBody(err.body_text()))
}

/// Extract a JSON body and convert it into a validated domain value.
///
/// The conversion decides the error category: an unreadable field value is
/// [`AppError::InvalidBody`], missing or blank fields are
/// [`AppError::Validation`].
pub fn extract_validated_json<T, U>(result: Result<Json<T>, JsonRejection>) -> Result<U, AppError>
where
    U: TryFrom<T, Error = AppError>,
{
    let raw = extract_json(result)?;
    U::try_from(raw)
}

/// Extract a path parameter, mapping parse failures to [`AppError::BadRequest`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
