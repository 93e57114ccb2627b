//! Errors reported by the service.
//!
//! A failed call returns an HTTP error status, an error type (in the
//! `x-amzn-ErrorType` header or the body's `__type` member) and a JSON body
//! with a message plus type-specific members. [`ServiceError::from_http`]
//! turns that into one of the typed exceptions below.

use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::enums::{ResourceType, ValidationExceptionReason};
use crate::model;

model! {
    /// The request failed server-side validation.
    pub struct ValidationException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
        /// Machine-readable reason.
        reason: ValidationExceptionReason,
    }
}

model! {
    /// The caller exceeded a request rate limit.
    pub struct ThrottlingException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
        /// Seconds to wait before retrying.
        retry_after_seconds: u32,
    }
}

model! {
    /// The caller lacks permission for the operation.
    pub struct AccessDeniedException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
    }
}

model! {
    /// The operation conflicts with the current state of a resource.
    pub struct ConflictException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
        /// Identifier of the conflicting resource.
        resource_id: String,
        /// Type of the conflicting resource.
        resource_type: ResourceType,
    }
}

model! {
    /// The service failed while processing the request.
    pub struct InternalServerException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
    }
}

model! {
    /// A resource named by the request does not exist.
    pub struct ResourceNotFoundException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
        /// Identifier of the missing resource.
        resource_id: String,
        /// Type of the missing resource.
        resource_type: ResourceType,
    }
}

model! {
    /// The operation would exceed a service quota.
    pub struct ServiceQuotaExceededException {
        /// Human-readable message.
        #[serde(alias = "Message")]
        message: String,
        /// Identifier of the resource at its quota.
        resource_id: String,
        /// Type of the resource at its quota.
        resource_type: ResourceType,
    }
}

macro_rules! exception_display {
    ($($name:ident),+) => {
        $(
            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(stringify!($name))?;
                    if let Some(message) = &self.message {
                        write!(f, ": {message}")?;
                    }
                    Ok(())
                }
            }

            impl std::error::Error for $name {}
        )+
    };
}

exception_display!(
    ValidationException,
    ThrottlingException,
    AccessDeniedException,
    ConflictException,
    InternalServerException,
    ResourceNotFoundException,
    ServiceQuotaExceededException
);

/// A service-side failure, decoded from an HTTP error response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// See [`ValidationException`].
    #[error(transparent)]
    Validation(ValidationException),

    /// See [`ThrottlingException`].
    #[error(transparent)]
    Throttling(ThrottlingException),

    /// See [`AccessDeniedException`].
    #[error(transparent)]
    AccessDenied(AccessDeniedException),

    /// See [`ConflictException`].
    #[error(transparent)]
    Conflict(ConflictException),

    /// See [`InternalServerException`].
    #[error(transparent)]
    InternalServer(InternalServerException),

    /// See [`ResourceNotFoundException`].
    #[error(transparent)]
    ResourceNotFound(ResourceNotFoundException),

    /// See [`ServiceQuotaExceededException`].
    #[error(transparent)]
    ServiceQuotaExceeded(ServiceQuotaExceededException),

    /// An error type this client does not know.
    #[error("{code} (HTTP {status}): {message}")]
    Unknown {
        /// Error type reported by the service, or `UnknownError`.
        code: String,
        /// HTTP status code.
        status: u16,
        /// Message from the body, or the raw body text.
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "__type")]
    type_name: Option<String>,
    #[serde(alias = "Code")]
    code: Option<String>,
    #[serde(alias = "Message")]
    message: Option<String>,
}

impl ServiceError {
    /// Decodes an HTTP error response.
    ///
    /// `error_type` is the `x-amzn-ErrorType` header and `retry_after` the
    /// `Retry-After` header, when present.
    #[must_use]
    pub fn from_http(status: u16, error_type: Option<&str>, retry_after: Option<&str>, body: &[u8]) -> Self {
        let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok();
        let code = error_type
            .map(|header| header.split(':').next().unwrap_or(header).trim().to_string())
            .filter(|code| !code.is_empty())
            .or_else(|| {
                let envelope = envelope.as_ref()?;
                envelope
                    .type_name
                    .as_deref()
                    .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
                    .or_else(|| envelope.code.clone())
            });

        match code.as_deref() {
            Some("ValidationException") => Self::Validation(decode(body)),
            Some("ThrottlingException") => {
                let mut exception: ThrottlingException = decode(body);
                let header = retry_after
                    .and_then(|v| v.trim().parse::<u32>().ok())
                    .filter(|seconds| *seconds > 0);
                exception.retry_after_seconds =
                    header.or(exception.retry_after_seconds.filter(|seconds| *seconds > 0));
                Self::Throttling(exception)
            }
            Some("AccessDeniedException") => Self::AccessDenied(decode(body)),
            Some("ConflictException") => Self::Conflict(decode(body)),
            Some("InternalServerException") => Self::InternalServer(decode(body)),
            Some("ResourceNotFoundException") => Self::ResourceNotFound(decode(body)),
            Some("ServiceQuotaExceededException") => Self::ServiceQuotaExceeded(decode(body)),
            other => Self::Unknown {
                code: other.unwrap_or("UnknownError").to_string(),
                status,
                message: envelope
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string()),
            },
        }
    }

    /// Returns the service error type name.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Validation(_) => "ValidationException",
            Self::Throttling(_) => "ThrottlingException",
            Self::AccessDenied(_) => "AccessDeniedException",
            Self::Conflict(_) => "ConflictException",
            Self::InternalServer(_) => "InternalServerException",
            Self::ResourceNotFound(_) => "ResourceNotFoundException",
            Self::ServiceQuotaExceeded(_) => "ServiceQuotaExceededException",
            Self::Unknown { code, .. } => code,
        }
    }

    /// Returns the message carried by the error, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => e.message.as_deref(),
            Self::Throttling(e) => e.message.as_deref(),
            Self::AccessDenied(e) => e.message.as_deref(),
            Self::Conflict(e) => e.message.as_deref(),
            Self::InternalServer(e) => e.message.as_deref(),
            Self::ResourceNotFound(e) => e.message.as_deref(),
            Self::ServiceQuotaExceeded(e) => e.message.as_deref(),
            Self::Unknown { message, .. } => Some(message.as_str()),
        }
    }

    /// Returns how long to wait before retrying a throttled call.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Throttling(e) => e.retry_after_seconds.map(|s| Duration::from_secs(u64::from(s))),
            _ => None,
        }
    }

    /// Returns true if repeating the same call may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttling(_) | Self::InternalServer(_))
    }
}

/// Decodes the type-specific members.
///
/// A member that does not decode (an unknown enum value, a wrong type) is
/// left absent; the remaining members, the message included, are kept.
fn decode<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    let Ok(Value::Object(members)) = serde_json::from_slice::<Value>(body) else {
        return T::default();
    };
    if let Ok(exception) = serde_json::from_value(Value::Object(members.clone())) {
        return exception;
    }

    let (kept, dropped): (Map<String, Value>, Map<String, Value>) =
        members.into_iter().partition(|(name, value)| {
            let mut single = Map::new();
            single.insert(name.clone(), value.clone());
            serde_json::from_value::<T>(Value::Object(single)).is_ok()
        });
    tracing::warn!(
        members = ?dropped.keys().collect::<Vec<_>>(),
        "Ignoring malformed error members"
    );
    serde_json::from_value(Value::Object(kept)).unwrap_or_default()
}
