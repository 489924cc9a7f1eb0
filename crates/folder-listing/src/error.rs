//! Error types for folder content listing

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Result type alias for listing operations
pub type ListingResult<T> = Result<T, ListingError>;

/// Listing error types
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    #[error("You need to specify a folder id")]
    InvalidFolderId,

    #[error("You must pass in resource_types as a comma separated list")]
    MissingResourceTypes,

    #[error("Unknown resource type '{token}'. The allowed values are: {}", .allowed.join(", "))]
    UnknownResourceType { token: String, allowed: Vec<String> },

    #[error("Unknown sort key '{token}'. The allowed values are: {}", .allowed.join(", "))]
    UnknownSortKey { token: String, allowed: Vec<String> },

    #[error("Unknown version filter '{token}'. The allowed values are: {}", .allowed.join(", "))]
    UnknownVersionFilter { token: String, allowed: Vec<String> },

    #[error("Unknown publication status '{token}'. The allowed values are: {}", .allowed.join(", "))]
    UnknownPublicationStatus { token: String, allowed: Vec<String> },

    #[error("Limit must be an integer between 1 and {max}, got '{value}'")]
    LimitOutOfRange { value: String, max: u32 },

    #[error("Offset must be a non-negative integer, got '{value}'")]
    OffsetOutOfRange { value: String },

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("You do not have read access to the folder: {0}")]
    AccessDenied(String),

    /// The context is logged, never rendered
    #[error("Internal store failure")]
    StoreFailure { context: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ListingError {
    /// Map a store-side failure, logging the diagnostic context
    pub fn store(context: impl Into<String>, err: anyhow::Error) -> Self {
        let context = context.into();
        tracing::error!("Store failure while {}: {:#}", context, err);
        ListingError::StoreFailure { context }
    }

    /// Convert to API error code
    pub fn code(&self) -> &'static str {
        match self {
            ListingError::InvalidPath { .. } => "INVALID_PATH",
            ListingError::MalformedQuery(_) => "MALFORMED_QUERY",
            ListingError::InvalidFolderId => "INVALID_FOLDER_ID",
            ListingError::MissingResourceTypes => "MISSING_RESOURCE_TYPES",
            ListingError::UnknownResourceType { .. } => "UNKNOWN_RESOURCE_TYPE",
            ListingError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
            ListingError::UnknownVersionFilter { .. } => "UNKNOWN_VERSION_FILTER",
            ListingError::UnknownPublicationStatus { .. } => "UNKNOWN_PUBLICATION_STATUS",
            ListingError::LimitOutOfRange { .. } => "LIMIT_OUT_OF_RANGE",
            ListingError::OffsetOutOfRange { .. } => "OFFSET_OUT_OF_RANGE",
            ListingError::FolderNotFound(_) => "FOLDER_NOT_FOUND",
            ListingError::AccessDenied(_) => "ACCESS_DENIED",
            ListingError::StoreFailure { .. } => "STORE_FAILURE",
            ListingError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Query parameter a validation failure refers to
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ListingError::InvalidPath { .. } => Some("path"),
            ListingError::InvalidFolderId => Some("id"),
            ListingError::MissingResourceTypes | ListingError::UnknownResourceType { .. } => {
                Some("resource_types")
            }
            ListingError::UnknownSortKey { .. } => Some("sort"),
            ListingError::UnknownVersionFilter { .. } => Some("version"),
            ListingError::UnknownPublicationStatus { .. } => Some("publication_status"),
            ListingError::LimitOutOfRange { .. } => Some("limit"),
            ListingError::OffsetOutOfRange { .. } => Some("offset"),
            _ => None,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingError::InvalidPath { .. }
            | ListingError::MalformedQuery(_)
            | ListingError::InvalidFolderId
            | ListingError::MissingResourceTypes
            | ListingError::UnknownResourceType { .. }
            | ListingError::UnknownSortKey { .. }
            | ListingError::UnknownVersionFilter { .. }
            | ListingError::UnknownPublicationStatus { .. }
            | ListingError::LimitOutOfRange { .. }
            | ListingError::OffsetOutOfRange { .. } => StatusCode::BAD_REQUEST,

            ListingError::FolderNotFound(_) => StatusCode::NOT_FOUND,

            ListingError::AccessDenied(_) => StatusCode::FORBIDDEN,

            ListingError::StoreFailure { .. } | ListingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        let field = self.field()?;
        let detail = match self {
            ListingError::InvalidPath { path, .. } => json!({ "field": field, "value": path }),
            ListingError::UnknownResourceType { token, allowed }
            | ListingError::UnknownSortKey { token, allowed }
            | ListingError::UnknownVersionFilter { token, allowed }
            | ListingError::UnknownPublicationStatus { token, allowed } => {
                json!({ "field": field, "value": token, "allowed": allowed })
            }
            ListingError::LimitOutOfRange { value, max } => {
                json!({ "field": field, "value": value, "min": 1, "max": max })
            }
            ListingError::OffsetOutOfRange { value } => {
                json!({ "field": field, "value": value, "min": 0 })
            }
            _ => json!({ "field": field }),
        };
        Some(detail)
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiError {
            code: self.code().to_string(),
            message: self.to_string(),
            details: self.details(),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_and_denied_are_distinct() {
        let missing = ListingError::FolderNotFound("abc".to_string());
        let denied = ListingError::AccessDenied("abc".to_string());
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);
        assert_ne!(missing.code(), denied.code());
    }

    #[test]
    fn test_store_failure_message_is_opaque() {
        let err = ListingError::store(
            "listing folder 42",
            anyhow::anyhow!("connection reset by peer"),
        );
        assert_eq!(err.to_string(), "Internal store failure");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.details().is_none());
    }

    #[test]
    fn test_unknown_token_details_name_field_and_allowed_set() {
        let err = ListingError::UnknownResourceType {
            token: "nonsense".to_string(),
            allowed: vec!["folder".to_string(), "template".to_string()],
        };
        let details = err.details().unwrap();
        assert_eq!(details["field"], "resource_types");
        assert_eq!(details["value"], "nonsense");
        assert_eq!(details["allowed"][1], "template");
        assert!(err.to_string().contains("'nonsense'"));
    }
}
