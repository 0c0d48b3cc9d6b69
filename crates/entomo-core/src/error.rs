//! Error types for the catalogue engine.
//!
//! Only `InvalidCategory` and `StoreUnavailable` are domain errors. An image
//! that cannot be matched is an ordinary `None`, never an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the catalogue engine.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    // Record store errors
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        message: String,
        #[source]
        source: Option<rusqlite::Error>,
    },

    // Caller input errors
    #[error("Invalid value for criterion {field}: {value}")]
    InvalidCriterion { field: String, value: String },

    #[error("Validation error for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid params: {message}")]
    InvalidParams { message: String },

    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // Serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for catalogue operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Json {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::StoreUnavailable {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl CatalogError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        CatalogError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Build a `StoreUnavailable` error without an underlying SQLite error.
    pub fn store(message: impl Into<String>) -> Self {
        CatalogError::StoreUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Convert to a JSON-RPC error code.
    ///
    /// - -32602: Invalid params (missing or malformed request fields)
    /// - -32000: Record store unavailable
    /// - -32005: Validation error (bad category, bad criterion, bad record)
    /// - -32603: Internal error
    pub fn to_rpc_error_code(&self) -> i32 {
        match self {
            CatalogError::InvalidParams { .. } => -32602,

            CatalogError::StoreUnavailable { .. } => -32000,

            CatalogError::InvalidCategory(_)
            | CatalogError::InvalidCriterion { .. }
            | CatalogError::Validation { .. } => -32005,

            _ => -32603,
        }
    }

    /// Check if the caller may retry the operation unchanged.
    ///
    /// The engine never retries internally.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CatalogError::StoreUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::InvalidCategory("spider".into());
        assert_eq!(err.to_string(), "Invalid category: spider");
    }

    #[test]
    fn test_rpc_error_codes() {
        assert_eq!(
            CatalogError::InvalidCategory("spider".into()).to_rpc_error_code(),
            -32005
        );
        assert_eq!(CatalogError::store("locked").to_rpc_error_code(), -32000);
        assert_eq!(
            CatalogError::InvalidParams {
                message: "missing type".into()
            }
            .to_rpc_error_code(),
            -32602
        );
        assert_eq!(CatalogError::Other("boom".into()).to_rpc_error_code(), -32603);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(CatalogError::store("connection refused").is_retryable());
        assert!(!CatalogError::InvalidCategory("moth".into()).is_retryable());
    }

    #[test]
    fn test_sqlite_error_becomes_store_unavailable() {
        let err: CatalogError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, CatalogError::StoreUnavailable { source: Some(_), .. }));
    }
}
