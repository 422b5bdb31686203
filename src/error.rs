//! Error types for the items service
//!
//! Provides unified error handling using thiserror.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Item Error Enum ==
/// Unified error type for the items service.
#[derive(Error, Debug)]
pub enum ItemError {
    /// Malformed id, missing query parameter or undecodable body
    #[error("Invalid request: {0}")]
    Validation(String),

    /// No item carries the requested id
    #[error("Item not found: {0}")]
    NotFound(u64),

    /// Cache backend unreachable or failing for a reason other than a missing key
    #[error("Cache backend error: {0}")]
    CacheBackend(String),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The id counter cannot advance past `u64::MAX`
    #[error("No item ids left to assign")]
    IdsExhausted,
}

impl ItemError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ItemError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemError::NotFound(_) => StatusCode::NOT_FOUND,
            ItemError::CacheBackend(_)
            | ItemError::Serialization(_)
            | ItemError::IdsExhausted => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Conversions ==
impl From<redis::RedisError> for ItemError {
    fn from(err: redis::RedisError) -> Self {
        ItemError::CacheBackend(err.to_string())
    }
}

impl From<JsonRejection> for ItemError {
    fn from(rejection: JsonRejection) -> Self {
        ItemError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for ItemError {
    fn from(rejection: PathRejection) -> Self {
        ItemError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ItemError {
    fn from(rejection: QueryRejection) -> Self {
        ItemError::Validation(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let message = match &self {
            ItemError::NotFound(_) => "Item not found".to_string(),
            other => other.to_string(),
        };

        let body = Json(ErrorResponse::new(message));

        (self.status(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the items service.
pub type Result<T> = std::result::Result<T, ItemError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ItemError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ItemError::NotFound(7).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ItemError::CacheBackend("down".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ItemError::IdsExhausted.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_malformed_payload_is_internal() {
        let err: ItemError = serde_json::from_str::<Vec<u64>>("{not json")
            .unwrap_err()
            .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_response() {
        let response = ItemError::NotFound(42).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
