//! Client-side validation of requests.
//!
//! Model types accept any value through their setters so that requests can
//! be assembled step by step. Constraint checks (required fields, lengths,
//! identifier patterns) run only when [`Validate::validate`] is called, which
//! the client does before sending unless pre-flight validation is disabled.

use std::fmt;

use crate::constraints::{self, StringConstraint};

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Wire name of the offending field (e.g., `domainOwner`).
    pub field: String,
    /// A human-readable description of the violation.
    pub message: String,
    /// The kind of violation.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use codeartifact_model::ValidationError;
    /// use codeartifact_model::validation::ValidationErrorKind;
    ///
    /// let error = ValidationError::new(
    ///     "domainOwner",
    ///     "must be a 12-digit account id",
    ///     ValidationErrorKind::Format,
    /// );
    /// assert_eq!(error.field, "domainOwner");
    /// ```
    pub fn new(
        field: impl Into<String>,
        message: impl Into<String>,
        kind: ValidationErrorKind,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    /// Creates a validation error for a required field that is missing.
    pub fn required(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("'{field}' is required but was not provided"),
            field,
            kind: ValidationErrorKind::Required,
        }
    }

    /// Creates a validation error for a value that does not match its pattern.
    pub fn format(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, ValidationErrorKind::Format)
    }

    /// Creates a validation error for a length or numeric bound violation.
    pub fn range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, ValidationErrorKind::Range)
    }

    /// Creates a validation error for an empty collection.
    pub fn empty(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("'{field}' must not be empty"),
            field,
            kind: ValidationErrorKind::Empty,
        }
    }

    /// Creates a validation error for a cross-field rule.
    pub fn constraint(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, ValidationErrorKind::Constraint)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// The category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// A required field was not provided.
    Required,
    /// The value does not match the field's pattern.
    Format,
    /// The value is outside the allowed length or numeric range.
    Range,
    /// A collection is empty when it shouldn't be.
    Empty,
    /// A rule spanning several fields was violated.
    Constraint,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Format => write!(f, "format"),
            Self::Range => write!(f, "range"),
            Self::Empty => write!(f, "empty"),
            Self::Constraint => write!(f, "constraint"),
        }
    }
}

/// A collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty validation errors collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a validation error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are no validation errors.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of validation errors.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns an iterator over the validation errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Returns true if any error concerns `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Converts to a Result, returning `Ok(())` if empty.
    ///
    /// # Errors
    ///
    /// Returns `self` if it holds at least one error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Merges another `ValidationErrors` into this one.
    pub fn merge(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = ValidationError>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "no validation errors")
        } else if self.errors.len() == 1 {
            write!(f, "{}", self.errors[0])
        } else {
            writeln!(f, "{} validation errors:", self.errors.len())?;
            for error in &self.errors {
                writeln!(f, "  - {error}")?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Trait for types that can be validated before they are sent.
///
/// # Examples
///
/// ```
/// use codeartifact_model::validation::{FieldChecks, Validate, ValidationErrors};
/// use codeartifact_model::constraints;
///
/// struct Lookup {
///     domain: Option<String>,
/// }
///
/// impl Validate for Lookup {
///     fn validate(&self) -> Result<(), ValidationErrors> {
///         let mut checks = FieldChecks::new();
///         checks.required_str("domain", self.domain.as_deref(), &constraints::DOMAIN_NAME);
///         checks.finish()
///     }
/// }
///
/// assert!(Lookup { domain: Some("my-domain".into()) }.is_valid());
/// assert!(!Lookup { domain: None }.is_valid());
/// ```
pub trait Validate {
    /// Validates this instance and returns every violation found.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` containing all validation failures found.
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Returns true if this instance is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Accumulates field checks for a [`Validate`] implementation.
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: ValidationErrors,
}

impl FieldChecks {
    /// Starts an empty set of checks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a string field and checks it against `constraint`.
    pub fn required_str(&mut self, field: &str, value: Option<&str>, constraint: &StringConstraint) {
        match value {
            Some(value) => self.optional_str(field, Some(value), constraint),
            None => self.errors.add(ValidationError::required(field)),
        }
    }

    /// Checks a string field against `constraint` when present.
    pub fn optional_str(&mut self, field: &str, value: Option<&str>, constraint: &StringConstraint) {
        if let Some(error) = value.and_then(|v| constraint.check(field, v)) {
            self.errors.add(error);
        }
    }

    /// Checks every element of a list field against `constraint`.
    pub fn each_str<'a, I>(&mut self, field: &str, values: I, constraint: &StringConstraint)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for value in values {
            self.optional_str(field, Some(value.as_str()), constraint);
        }
    }

    /// Requires a field of any type to be present.
    pub fn required<T>(&mut self, field: &str, value: Option<&T>) {
        if value.is_none() {
            self.errors.add(ValidationError::required(field));
        }
    }

    /// Requires a list field to be present and non-empty.
    pub fn required_list<T>(&mut self, field: &str, value: Option<&Vec<T>>) {
        match value {
            None => self.errors.add(ValidationError::required(field)),
            Some(list) if list.is_empty() => self.errors.add(ValidationError::empty(field)),
            Some(_) => {}
        }
    }

    /// Checks that a numeric field lies in `min..=max` when present.
    pub fn in_range<T>(&mut self, field: &str, value: Option<T>, min: T, max: T)
    where
        T: PartialOrd + fmt::Display + Copy,
    {
        if let Some(value) = value {
            if value < min || value > max {
                self.errors.add(ValidationError::range(
                    field,
                    format!("must be between {min} and {max}, got {value}"),
                ));
            }
        }
    }

    /// Records a cross-field violation when `violated` is true.
    pub fn rule(&mut self, violated: bool, field: &str, message: &str) {
        if violated {
            self.errors.add(ValidationError::constraint(field, message));
        }
    }

    /// Checks the `domain` / `domainOwner` pair every scoped request carries.
    pub fn domain_scope(&mut self, domain: Option<&str>, domain_owner: Option<&str>) {
        self.required_str("domain", domain, &constraints::DOMAIN_NAME);
        self.optional_str("domainOwner", domain_owner, &constraints::ACCOUNT_ID);
    }

    /// Checks `format`, `namespace` and `package` identifying a package.
    pub fn package_coordinates<F>(
        &mut self,
        format: Option<&F>,
        namespace: Option<&str>,
        package: Option<&str>,
    ) {
        self.required("format", format);
        self.optional_str("namespace", namespace, &constraints::PACKAGE_COMPONENT);
        self.required_str("package", package, &constraints::PACKAGE_COMPONENT);
    }

    /// Checks `maxResults` and `nextToken` on list requests.
    pub fn pagination(&mut self, max_results: Option<i32>, next_token: Option<&str>) {
        let (min, max) = constraints::MAX_RESULTS;
        self.in_range("maxResults", max_results, min, max);
        self.optional_str("nextToken", next_token, &constraints::NEXT_TOKEN);
    }

    /// Returns the accumulated result.
    ///
    /// # Errors
    ///
    /// Returns every recorded violation.
    pub fn finish(self) -> Result<(), ValidationErrors> {
        self.errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_required() {
        let error = ValidationError::required("domain");
        assert_eq!(error.field, "domain");
        assert_eq!(error.kind, ValidationErrorKind::Required);
        assert!(error.message.contains("required"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = ValidationError::format("repository", "invalid characters");
        let display = format!("{error}");
        assert!(display.contains("repository"));
        assert!(display.contains("invalid characters"));
    }

    #[test]
    fn test_validation_errors_into_result() {
        assert!(ValidationErrors::new().into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add(ValidationError::required("domain"));
        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.has_field("domain"));
    }

    #[test]
    fn test_validation_errors_merge() {
        let mut first = ValidationErrors::new();
        first.add(ValidationError::required("domain"));
        let mut second = ValidationErrors::new();
        second.add(ValidationError::format("repository", "bad"));

        first.merge(second);
        let fields: Vec<_> = first.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["domain", "repository"]);
    }

    #[test]
    fn test_validation_errors_display_multiple() {
        let errors: ValidationErrors = vec![
            ValidationError::required("domain"),
            ValidationError::empty("versions"),
        ]
        .into_iter()
        .collect();

        let display = format!("{errors}");
        assert!(display.contains("2 validation errors"));
        assert!(display.contains("versions"));
    }

    #[test]
    fn test_validation_error_kind_display() {
        assert_eq!(ValidationErrorKind::Required.to_string(), "required");
        assert_eq!(ValidationErrorKind::Constraint.to_string(), "constraint");
    }

    #[test]
    fn test_field_checks_required_str() {
        let mut checks = FieldChecks::new();
        checks.required_str("domain", None, &constraints::DOMAIN_NAME);
        checks.required_str("repository", Some("ok-repo"), &constraints::REPOSITORY_NAME);
        let errors = checks.finish().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("domain"));
    }

    #[test]
    fn test_field_checks_required_list() {
        let mut checks = FieldChecks::new();
        checks.required_list::<String>("versions", Some(&Vec::new()));
        let errors = checks.finish().unwrap_err();
        assert_eq!(errors.iter().next().unwrap().kind, ValidationErrorKind::Empty);
    }

    #[test]
    fn test_field_checks_in_range() {
        let mut checks = FieldChecks::new();
        checks.in_range("durationSeconds", Some(43_200_i64), 0, 43_200);
        checks.in_range("maxResults", Some(0_i32), 1, 1000);
        let errors = checks.finish().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.has_field("maxResults"));
    }

    #[test]
    fn test_field_checks_rule() {
        let mut checks = FieldChecks::new();
        checks.rule(true, "versions", "cannot be combined with versionRevisions");
        let errors = checks.finish().unwrap_err();
        assert_eq!(errors.iter().next().unwrap().kind, ValidationErrorKind::Constraint);
    }
}
