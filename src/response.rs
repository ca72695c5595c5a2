use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use http::header;
use serde::Serialize;

use crate::error::{AppError, Result};

/// Serializes `value` with sonic-rs into a JSON response.
pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Response> {
    let body = sonic_rs::to_string(value)
        .map_err(|e| AppError::Internal(format!("JSON serialization failed: {}", e)))?;

    Ok((status, [(header::CONTENT_TYPE, "application/json")], body).into_response())
}
