//! API error types with IntoResponse
//!
//! Every failure maps to `400 Bad Request` with a JSON body naming the
//! error kind. The API contract deliberately does not distinguish
//! client- from server-caused failures at the status-code level; the
//! body's `error` field carries the distinction instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failed (bad name, bad category count, duplicates)
    Validation(ValidationError),

    /// Entity id absent
    NotFound { resource: &'static str, id: i64 },

    /// Requested category ids that do not exist
    CategoryNotFound { ids: Vec<i64> },

    /// Category still referenced by products
    CategoryInUse { id: i64, products: i64 },

    /// Underlying store error (logged, generic message returned)
    Database(sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Validation(e) => json!({
                "error": "validation_error",
                "message": e.to_string()
            }),
            Self::NotFound { resource, id } => json!({
                "error": "not_found",
                "message": format!("{} with id {} not found", resource, id)
            }),
            Self::CategoryNotFound { ids } => json!({
                "error": "category_not_found",
                "message": format!("unknown category ids: {:?}", ids)
            }),
            Self::CategoryInUse { id, products } => json!({
                "error": "category_in_use",
                "message": format!(
                    "category {} is referenced by {} product(s)",
                    id, products
                )
            }),
            Self::Database(e) => {
                // Log the actual error, return a generic message
                tracing::error!("Database error: {}", e);
                json!({
                    "error": "internal_error",
                    "message": "an internal error occurred"
                })
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::CategoryNotFound { ids } => Self::CategoryNotFound { ids },
            DbError::CategoryInUse { id, products } => Self::CategoryInUse { id, products },
            DbError::Sqlx(e) => Self::Database(e),
        }
    }
}
