//! Error types for client operations.

use std::path::PathBuf;

use codeartifact_model::{ServiceError, ValidationErrors};
use thiserror::Error;

/// Errors that can occur while calling the service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to connect to the endpoint.
    #[error("Failed to connect to {url}: {source}")]
    Connection {
        /// Endpoint URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP exchange failed below the service protocol (timeout,
    /// truncated body, ...).
    #[error("HTTP error: {status} - {message}")]
    Http {
        /// HTTP status code, or 0 when no response was received.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The service rejected the call.
    #[error("{operation} failed: {source}")]
    Service {
        /// Operation name (e.g., `CreateDomain`).
        operation: &'static str,
        /// Decoded service error.
        #[source]
        source: ServiceError,
    },

    /// The request failed client-side validation and was not sent.
    #[error("Invalid {operation} request: {source}")]
    Validation {
        /// Operation name.
        operation: &'static str,
        /// Every violation found.
        #[source]
        source: ValidationErrors,
    },

    /// A model type rejected a value.
    #[error("Model error: {0}")]
    Model(#[from] codeartifact_model::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {source}")]
    Json {
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid URL.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        /// URL string.
        url: String,
    },

    /// Credentials could not be turned into request headers.
    #[error("Authentication failed: {message}")]
    Auth {
        /// Error message.
        message: String,
    },

    /// Invalid client configuration.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// File I/O error.
    #[error("File I/O error at {path}: {source}")]
    Io {
        /// File path, empty when not file-related.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A downloaded asset does not match its expected digest.
    #[error("Checksum mismatch for asset {asset}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Asset name.
        asset: String,
        /// Expected hex digest.
        expected: String,
        /// Computed hex digest.
        actual: String,
    },
}

impl ClientError {
    /// Returns the service error, if the service rejected the call.
    #[must_use]
    pub const fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true if repeating the call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Service { source, .. } => source.is_retryable(),
            Self::Connection { .. } => true,
            Self::Http { status, .. } => *status == 0 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connection {
                url: err
                    .url()
                    .map_or_else(|| "unknown".to_string(), ToString::to_string),
                source: err,
            }
        } else {
            Self::Http {
                status: err.status().map_or(0, |s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json { source: err }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeartifact_model::ValidationError;

    #[test]
    fn test_error_display_service() {
        let err = ClientError::Service {
            operation: "DescribeDomain",
            source: ServiceError::from_http(
                404,
                Some("ResourceNotFoundException"),
                None,
                br#"{"message": "Domain not found"}"#,
            ),
        };
        assert_eq!(
            err.to_string(),
            "DescribeDomain failed: ResourceNotFoundException: Domain not found"
        );
        assert!(err.service_error().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_display_validation() {
        let err = ClientError::Validation {
            operation: "CreateDomain",
            source: vec![ValidationError::required("domain")].into_iter().collect(),
        };
        assert!(err.to_string().starts_with("Invalid CreateDomain request"));
        assert!(err.to_string().contains("domain"));
    }

    #[test]
    fn test_throttling_is_retryable() {
        let err = ClientError::Service {
            operation: "ListDomains",
            source: ServiceError::from_http(429, Some("ThrottlingException"), Some("1"), b"{}"),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_error_display_checksum_mismatch() {
        let err = ClientError::ChecksumMismatch {
            asset: "lodash-4.17.20.tgz".to_string(),
            expected: "abc123".to_string(),
            actual: "def456".to_string(),
        };
        assert!(err.to_string().contains("Checksum mismatch"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_model_error_converts() {
        let err: ClientError = codeartifact_model::Error::UnknownVariant {
            type_name: "PackageFormat",
            value: "cargo".to_string(),
        }
        .into();
        assert!(matches!(err, ClientError::Model(_)));
    }
}
