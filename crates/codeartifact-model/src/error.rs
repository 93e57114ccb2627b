//! Error types for model construction and parsing.
//!
//! The model layer fails in exactly two situations of its own: a map-valued
//! field receives the same key twice, and a closed enumeration is parsed from
//! a string outside its wire set. Everything else (missing required fields,
//! length and pattern violations) is reported through
//! [`ValidationErrors`](crate::validation::ValidationErrors).

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by model types.
#[derive(Error, Debug)]
pub enum Error {
    /// A map entry was added under a key that is already present.
    ///
    /// The existing entry is left untouched.
    #[error("Duplicate key '{key}' in {field}")]
    DuplicateKey {
        /// Wire name of the map-valued field.
        field: &'static str,
        /// The rejected key.
        key: String,
    },

    /// A wire string does not name any variant of a closed enumeration.
    #[error("Unknown {type_name} value '{value}'")]
    UnknownVariant {
        /// Rust name of the enumeration.
        type_name: &'static str,
        /// The rejected wire string.
        value: String,
    },

    /// A bulk operation reported the same package version as both
    /// succeeded and failed.
    #[error("Package version '{key}' reported as both succeeded and failed")]
    OverlappingOutcome {
        /// The package version key found in both maps.
        key: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_duplicate_key() {
        let err = Error::DuplicateKey {
            field: "versionRevisions",
            key: "1.0.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate key '1.0.0' in versionRevisions"
        );
    }

    #[test]
    fn test_error_display_unknown_variant() {
        let err = Error::UnknownVariant {
            type_name: "PackageVersionStatus",
            value: "bogus".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unknown PackageVersionStatus value 'bogus'"
        );
    }

    #[test]
    fn test_error_display_overlapping_outcome() {
        let err = Error::OverlappingOutcome {
            key: "3.0.0".to_string(),
        };
        assert!(err.to_string().contains("3.0.0"));
    }
}
