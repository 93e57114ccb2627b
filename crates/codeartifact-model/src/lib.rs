//! # CodeArtifact Model
//!
//! Request, result, entity and exception types for the CodeArtifact
//! control-plane API.
//!
//! Every wire structure follows one pattern:
//!
//! - all fields are optional and start absent (`Default`)
//! - fluent `with_*` setters consume and return the value; `clear_*` makes a
//!   field absent again
//! - map-valued fields grow through `add_*` methods that refuse duplicate keys
//! - equality and hashing are structural; `Debug` lists present fields only
//! - serde uses the camelCase wire names and omits absent fields
//!
//! Closed enumerations ([`PackageFormat`], [`PackageVersionStatus`], ...)
//! reject strings outside their wire set. Constraint checks run only through
//! [`Validate`].
//!
//! ## Example
//!
//! ```rust
//! use codeartifact_model::{CopyPackageVersionsRequest, PackageFormat, Validate};
//!
//! let mut request = CopyPackageVersionsRequest::default()
//!     .with_domain("my-domain")
//!     .with_source_repository("staging")
//!     .with_destination_repository("release")
//!     .with_format(PackageFormat::Npm)
//!     .with_package("lodash");
//! request.add_version("4.17.20").add_version("4.17.21");
//! assert!(request.is_valid());
//!
//! let format: PackageFormat = "pypi".parse().unwrap();
//! assert_eq!(format.as_str(), "pypi");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bulk;
pub mod constraints;
pub mod domain;
pub mod enums;
pub mod error;
pub mod exception;
pub mod macros;
pub mod package;
pub mod policy;
pub mod repository;
pub mod time;
pub mod token;
pub mod validation;

#[cfg(test)]
mod proptest_tests;

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
}

pub use bulk::{
    BulkOutcome, CopyPackageVersionsRequest, CopyPackageVersionsResult,
    DeletePackageVersionsRequest, DeletePackageVersionsResult, DisposePackageVersionsRequest,
    DisposePackageVersionsResult, PackageVersionError, SuccessfulPackageVersionInfo,
    UpdatePackageVersionsStatusRequest, UpdatePackageVersionsStatusResult, VersionOutcome,
};
pub use domain::{
    CreateDomainRequest, CreateDomainResult, DeleteDomainRequest, DeleteDomainResult,
    DescribeDomainRequest, DescribeDomainResult, DomainDescription, DomainSummary,
    ListDomainsRequest, ListDomainsResult,
};
pub use enums::{
    DomainStatus, ExternalConnectionStatus, HashAlgorithm, PackageFormat,
    PackageVersionErrorCode, PackageVersionSortType, PackageVersionStatus, ResourceType,
    ValidationExceptionReason,
};
pub use error::{Error, Result};
pub use exception::{
    AccessDeniedException, ConflictException, InternalServerException,
    ResourceNotFoundException, ServiceError, ServiceQuotaExceededException, ThrottlingException,
    ValidationException,
};
pub use package::{
    AssetSummary, DescribePackageVersionRequest, DescribePackageVersionResult,
    GetPackageVersionAssetRequest, GetPackageVersionAssetResult, GetPackageVersionReadmeRequest,
    GetPackageVersionReadmeResult, LicenseInfo, ListPackageVersionAssetsRequest,
    ListPackageVersionAssetsResult, ListPackageVersionDependenciesRequest,
    ListPackageVersionDependenciesResult, ListPackageVersionsRequest, ListPackageVersionsResult,
    ListPackagesRequest, ListPackagesResult, PackageDependency, PackageSummary,
    PackageVersionDescription, PackageVersionSummary,
};
pub use policy::{
    DeleteDomainPermissionsPolicyRequest, DeleteDomainPermissionsPolicyResult,
    DeleteRepositoryPermissionsPolicyRequest, DeleteRepositoryPermissionsPolicyResult,
    GetDomainPermissionsPolicyRequest, GetDomainPermissionsPolicyResult,
    GetRepositoryPermissionsPolicyRequest, GetRepositoryPermissionsPolicyResult,
    PutDomainPermissionsPolicyRequest, PutDomainPermissionsPolicyResult,
    PutRepositoryPermissionsPolicyRequest, PutRepositoryPermissionsPolicyResult, ResourcePolicy,
};
pub use repository::{
    AssociateExternalConnectionRequest, AssociateExternalConnectionResult,
    CreateRepositoryRequest, CreateRepositoryResult, DeleteRepositoryRequest,
    DeleteRepositoryResult, DescribeRepositoryRequest, DescribeRepositoryResult,
    DisassociateExternalConnectionRequest, DisassociateExternalConnectionResult,
    GetRepositoryEndpointRequest, GetRepositoryEndpointResult, ListRepositoriesInDomainRequest,
    ListRepositoriesInDomainResult, ListRepositoriesRequest, ListRepositoriesResult,
    RepositoryDescription, RepositoryExternalConnectionInfo, RepositorySummary,
    UpdateRepositoryRequest, UpdateRepositoryResult, UpstreamRepository, UpstreamRepositoryInfo,
};
pub use token::{GetAuthorizationTokenRequest, GetAuthorizationTokenResult};
pub use validation::{Validate, ValidationError, ValidationErrors};
