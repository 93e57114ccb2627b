//! Field constraints published by the service.
//!
//! Each constant records the length bounds and pattern of one kind of
//! identifier. The model never enforces them on assignment; they are consulted
//! by [`Validate`](crate::Validate) implementations.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::ValidationError;

/// Length bounds (in characters) and an optional anchored pattern.
#[derive(Debug)]
pub struct StringConstraint {
    /// Minimum length, inclusive.
    pub min_len: usize,
    /// Maximum length, inclusive.
    pub max_len: usize,
    /// Human-readable description of the pattern, used in error messages.
    pub description: &'static str,
    pattern: Option<Regex>,
}

impl StringConstraint {
    fn new(min_len: usize, max_len: usize, description: &'static str) -> Self {
        Self {
            min_len,
            max_len,
            description,
            pattern: None,
        }
    }

    #[allow(clippy::expect_used)]
    fn with_pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(Regex::new(pattern).expect("constraint pattern is valid"));
        self
    }

    /// Returns the pattern source, if the constraint has one.
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Returns true if `value` satisfies the constraint.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        self.check("value", value).is_none()
    }

    /// Checks `value`, reporting the first violation against `field`.
    #[must_use]
    pub fn check(&self, field: &str, value: &str) -> Option<ValidationError> {
        let len = value.chars().count();
        if len < self.min_len || len > self.max_len {
            return Some(ValidationError::range(
                field,
                format!(
                    "length must be between {} and {} characters, got {len}",
                    self.min_len, self.max_len
                ),
            ));
        }
        match &self.pattern {
            Some(pattern) if !pattern.is_match(value) => Some(ValidationError::format(
                field,
                format!("must be {}", self.description),
            )),
            _ => None,
        }
    }
}

/// Domain name: lowercase letters, digits and hyphens, 2–50 characters.
pub static DOMAIN_NAME: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(2, 50, "a lowercase domain name")
        .with_pattern(r"^[a-z][a-z0-9\-]{0,48}[a-z0-9]$")
});

/// Repository name, 2–100 characters.
pub static REPOSITORY_NAME: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(2, 100, "a repository name")
        .with_pattern(r"^[A-Za-z0-9][A-Za-z0-9._\-]{1,99}$")
});

/// AWS account id: exactly 12 digits.
pub static ACCOUNT_ID: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(12, 12, "a 12-digit account id").with_pattern(r"^[0-9]{12}$")
});

/// Amazon Resource Name.
pub static ARN: Lazy<StringConstraint> =
    Lazy::new(|| StringConstraint::new(1, 1011, "an ARN").with_pattern(r"^arn:\S+$"));

/// Encryption key identifier (key ARN, alias or id).
pub static ENCRYPTION_KEY: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(1, 1011, "a key identifier without whitespace").with_pattern(r"^\S+$")
});

/// Package namespace, package name or version: no `!`, `#`, `/` or whitespace.
pub static PACKAGE_COMPONENT: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(1, 255, "free of '!', '#', '/' and whitespace")
        .with_pattern(r"^[^!#/\s]+$")
});

/// Package version revision token.
pub static REVISION: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(1, 50, "a revision without whitespace").with_pattern(r"^\S+$")
});

/// Resource policy revision token.
pub static POLICY_REVISION: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(1, 100, "a revision without whitespace").with_pattern(r"^\S+$")
});

/// Asset file name: no control characters.
pub static ASSET_NAME: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(1, 255, "free of control characters").with_pattern(r"^[^\p{Cc}]+$")
});

/// Repository description.
pub static DESCRIPTION: Lazy<StringConstraint> =
    Lazy::new(|| StringConstraint::new(0, 1000, "a description"));

/// Resource policy JSON document.
pub static POLICY_DOCUMENT: Lazy<StringConstraint> =
    Lazy::new(|| StringConstraint::new(1, 5120, "a policy document"));

/// Pagination continuation token.
pub static NEXT_TOKEN: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(1, 2000, "a token without whitespace").with_pattern(r"^\S+$")
});

/// External connection name (e.g., `public:npmjs`).
pub static EXTERNAL_CONNECTION_NAME: Lazy<StringConstraint> = Lazy::new(|| {
    StringConstraint::new(2, 100, "an external connection name")
        .with_pattern(r"^[A-Za-z0-9][A-Za-z0-9._\-:]{1,99}$")
});

/// Bounds of `maxResults` on list operations.
pub const MAX_RESULTS: (i32, i32) = (1, 1000);

/// Bounds of an authorization token's `durationSeconds`.
pub const TOKEN_DURATION_SECONDS: (i64, i64) = (0, 43_200);
