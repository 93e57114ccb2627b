//! Closed enumerations used on the wire.
//!
//! Each type stores the typed variant and converts to and from its canonical
//! wire string. Parsing never falls back to a default: an unknown string is
//! an [`Error::UnknownVariant`](crate::Error::UnknownVariant), and
//! deserializing one fails the whole document.

use crate::wire_enum;

wire_enum! {
    /// Package format served by a repository endpoint.
    pub enum PackageFormat {
        /// JavaScript packages.
        Npm => "npm",
        /// Python packages.
        Pypi => "pypi",
        /// Java artifacts.
        Maven => "maven",
    }
}

wire_enum! {
    /// Lifecycle status of a package version.
    pub enum PackageVersionStatus {
        /// Visible and downloadable.
        Published => "Published",
        /// Publishing has started but not completed.
        Unfinished => "Unfinished",
        /// Downloadable but hidden from version listings.
        Unlisted => "Unlisted",
        /// Hidden and not downloadable; can be restored.
        Archived => "Archived",
        /// Assets removed from storage; metadata kept.
        Disposed => "Disposed",
        /// Removed together with its metadata.
        Deleted => "Deleted",
    }
}

wire_enum! {
    /// Per-version failure code reported by bulk operations.
    pub enum PackageVersionErrorCode {
        /// The version already exists in the destination.
        AlreadyExists => "ALREADY_EXISTS",
        /// The supplied revision does not match the current one.
        MismatchedRevision => "MISMATCHED_REVISION",
        /// The version is not in the expected status.
        MismatchedStatus => "MISMATCHED_STATUS",
        /// The requested transition is not allowed.
        NotAllowed => "NOT_ALLOWED",
        /// The version does not exist.
        NotFound => "NOT_FOUND",
        /// The version was skipped.
        Skipped => "SKIPPED",
    }
}

wire_enum! {
    /// Sort order for package version listings.
    pub enum PackageVersionSortType {
        /// Most recently published first.
        PublishedTime => "PUBLISHED_TIME",
    }
}

wire_enum! {
    /// Status of a domain.
    pub enum DomainStatus {
        /// The domain is usable.
        Active => "Active",
        /// The domain has been deleted.
        Deleted => "Deleted",
    }
}

wire_enum! {
    /// Digest algorithm used for asset hashes.
    pub enum HashAlgorithm {
        /// MD5.
        Md5 => "MD5",
        /// SHA-1.
        Sha1 => "SHA-1",
        /// SHA-256.
        Sha256 => "SHA-256",
        /// SHA-512.
        Sha512 => "SHA-512",
    }
}

wire_enum! {
    /// Status of a repository's external connection.
    pub enum ExternalConnectionStatus {
        /// The connection is usable.
        Available => "Available",
    }
}

wire_enum! {
    /// Kind of resource named in conflict and not-found errors.
    pub enum ResourceType {
        /// A domain.
        Domain => "domain",
        /// A repository.
        Repository => "repository",
        /// A package.
        Package => "package",
        /// A package version.
        PackageVersion => "package-version",
        /// An asset.
        Asset => "asset",
    }
}

wire_enum! {
    /// Reason attached to a validation failure.
    pub enum ValidationExceptionReason {
        /// The request body could not be parsed.
        CannotParse => "CANNOT_PARSE",
        /// The encryption key could not be used.
        EncryptionKeyError => "ENCRYPTION_KEY_ERROR",
        /// A field failed validation.
        FieldValidationFailed => "FIELD_VALIDATION_FAILED",
        /// The operation is not recognised.
        UnknownOperation => "UNKNOWN_OPERATION",
        /// Any other reason.
        Other => "OTHER",
    }
}
