//! Operations that act on several package versions at once.
//!
//! Copy, delete, dispose and status-update requests name their targets either
//! as a plain version list or as a version → expected-revision map. Their
//! results split the targets into two maps keyed by version: those the
//! service applied the operation to and those it did not. The two maps are
//! expected to be disjoint; [`BulkOutcome::check_disjoint`] verifies it.

use std::collections::BTreeMap;

use crate::constraints;
use crate::enums::{PackageFormat, PackageVersionErrorCode, PackageVersionStatus};
use crate::error::{Error, Result};
use crate::macros::insert_unique;
use crate::model;
use crate::validation::{FieldChecks, Validate, ValidationErrors};

model! {
    /// State of a version the bulk operation succeeded on.
    pub struct SuccessfulPackageVersionInfo {
        /// Revision of the version after the operation.
        revision: String,
        /// Status of the version after the operation.
        status: PackageVersionStatus,
    }
}

model! {
    /// Why a bulk operation did not apply to one version.
    pub struct PackageVersionError {
        /// Machine-readable reason.
        error_code: PackageVersionErrorCode,
        /// Human-readable detail.
        error_message: String,
    }
}

model! {
    /// Copies versions from one repository to another in the same domain.
    pub struct CopyPackageVersionsRequest {
        /// Domain containing both repositories.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to copy from.
        source_repository: String,
        /// Repository to copy to.
        destination_repository: String,
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Versions to copy.
        versions: Vec<String>,
        /// Versions to copy, each with the revision it must have.
        version_revisions: BTreeMap<String, String>,
        /// Overwrite versions already present in the destination.
        allow_overwrite: bool,
        /// Also copy versions only reachable through upstreams.
        include_from_upstream: bool,
    }
}

model! {
    /// Deletes versions and their assets.
    pub struct DeletePackageVersionsRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository containing the package.
        repository: String,
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Versions to delete.
        versions: Vec<String>,
        /// Only delete versions currently in this status.
        expected_status: PackageVersionStatus,
    }
}

model! {
    /// Deletes the assets of versions and marks them `Disposed`.
    pub struct DisposePackageVersionsRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository containing the package.
        repository: String,
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Versions to dispose.
        versions: Vec<String>,
        /// Versions to dispose, each with the revision it must have.
        version_revisions: BTreeMap<String, String>,
        /// Only dispose versions currently in this status.
        expected_status: PackageVersionStatus,
    }
}

model! {
    /// Changes the status of versions.
    pub struct UpdatePackageVersionsStatusRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository containing the package.
        repository: String,
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Versions to update.
        versions: Vec<String>,
        /// Versions to update, each with the revision it must have.
        version_revisions: BTreeMap<String, String>,
        /// Only update versions currently in this status.
        expected_status: PackageVersionStatus,
        /// Status to set.
        target_status: PackageVersionStatus,
    }
}

macro_rules! version_list {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Appends one version, creating the list when absent.
                pub fn add_version(&mut self, version: impl Into<String>) -> &mut Self {
                    self.versions.get_or_insert_with(Vec::new).push(version.into());
                    self
                }
            }
        )+
    };
}

macro_rules! version_revisions {
    ($($name:ident),+) => {
        $(
            impl $name {
                /// Adds a version together with the revision it must have.
                ///
                /// # Errors
                ///
                /// Returns [`Error::DuplicateKey`] if `version` is already
                /// present; its revision is left unchanged.
                pub fn add_version_revision(
                    &mut self,
                    version: impl Into<String>,
                    revision: impl Into<String>,
                ) -> Result<&mut Self> {
                    insert_unique(
                        &mut self.version_revisions,
                        "versionRevisions",
                        version.into(),
                        revision.into(),
                    )?;
                    Ok(self)
                }
            }
        )+
    };
}

version_list!(
    CopyPackageVersionsRequest,
    DeletePackageVersionsRequest,
    DisposePackageVersionsRequest,
    UpdatePackageVersionsStatusRequest
);

version_revisions!(
    CopyPackageVersionsRequest,
    DisposePackageVersionsRequest,
    UpdatePackageVersionsStatusRequest
);

/// Where one version ended up in a bulk result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOutcome<'a> {
    /// The operation applied to the version.
    Succeeded(&'a SuccessfulPackageVersionInfo),
    /// The operation did not apply to the version.
    Failed(&'a PackageVersionError),
    /// The version appears in neither map.
    Missing,
}

/// Common view over the four bulk results.
pub trait BulkOutcome {
    /// Versions the operation applied to.
    fn succeeded(&self) -> Option<&BTreeMap<String, SuccessfulPackageVersionInfo>>;

    /// Versions the operation did not apply to.
    fn failed(&self) -> Option<&BTreeMap<String, PackageVersionError>>;

    /// Returns the versions reported in both maps, in key order.
    fn overlapping_keys(&self) -> Vec<&str> {
        match (self.succeeded(), self.failed()) {
            (Some(succeeded), Some(failed)) => succeeded
                .keys()
                .filter(|key| failed.contains_key(*key))
                .map(String::as_str)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Verifies that no version is reported as both succeeded and failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OverlappingOutcome`] naming the first shared key.
    fn check_disjoint(&self) -> Result<()> {
        match self.overlapping_keys().first() {
            Some(key) => Err(Error::OverlappingOutcome {
                key: (*key).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Looks up one version. A key in both maps reports as succeeded.
    fn outcome_for(&self, version: &str) -> VersionOutcome<'_> {
        if let Some(info) = self.succeeded().and_then(|m| m.get(version)) {
            return VersionOutcome::Succeeded(info);
        }
        self.failed()
            .and_then(|m| m.get(version))
            .map_or(VersionOutcome::Missing, VersionOutcome::Failed)
    }

    /// Number of versions the operation applied to.
    fn succeeded_count(&self) -> usize {
        self.succeeded().map_or(0, BTreeMap::len)
    }

    /// Number of versions the operation did not apply to.
    fn failed_count(&self) -> usize {
        self.failed().map_or(0, BTreeMap::len)
    }

    /// Returns true if at least one version failed.
    fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

macro_rules! bulk_result {
    ($(#[$meta:meta])* $name:ident) => {
        crate::model! {
            $(#[$meta])*
            pub struct $name {
                /// Versions the operation applied to, keyed by version.
                successful_versions: BTreeMap<String, SuccessfulPackageVersionInfo>,
                /// Versions the operation did not apply to, keyed by version.
                failed_versions: BTreeMap<String, PackageVersionError>,
            }
        }

        impl $name {
            /// Records a version the operation applied to.
            ///
            /// # Errors
            ///
            /// Returns [`Error::DuplicateKey`] if `version` is already in
            /// `successfulVersions`.
            pub fn add_successful_version(
                &mut self,
                version: impl Into<String>,
                info: SuccessfulPackageVersionInfo,
            ) -> Result<&mut Self> {
                insert_unique(&mut self.successful_versions, "successfulVersions", version.into(), info)?;
                Ok(self)
            }

            /// Records a version the operation did not apply to.
            ///
            /// # Errors
            ///
            /// Returns [`Error::DuplicateKey`] if `version` is already in
            /// `failedVersions`.
            pub fn add_failed_version(
                &mut self,
                version: impl Into<String>,
                error: PackageVersionError,
            ) -> Result<&mut Self> {
                insert_unique(&mut self.failed_versions, "failedVersions", version.into(), error)?;
                Ok(self)
            }
        }

        impl BulkOutcome for $name {
            fn succeeded(&self) -> Option<&BTreeMap<String, SuccessfulPackageVersionInfo>> {
                self.successful_versions.as_ref()
            }

            fn failed(&self) -> Option<&BTreeMap<String, PackageVersionError>> {
                self.failed_versions.as_ref()
            }
        }
    };
}

bulk_result! {
    /// Result of [`CopyPackageVersionsRequest`].
    CopyPackageVersionsResult
}

bulk_result! {
    /// Result of [`DeletePackageVersionsRequest`].
    DeletePackageVersionsResult
}

bulk_result! {
    /// Result of [`DisposePackageVersionsRequest`].
    DisposePackageVersionsResult
}

bulk_result! {
    /// Result of [`UpdatePackageVersionsStatusRequest`].
    UpdatePackageVersionsStatusResult
}

/// Checks a copy selection: exactly one of `versions` and
/// `versionRevisions`, each entry well formed.
fn check_selection(
    checks: &mut FieldChecks,
    versions: Option<&Vec<String>>,
    version_revisions: Option<&BTreeMap<String, String>>,
) {
    checks.rule(
        versions.is_some() && version_revisions.is_some(),
        "versions",
        "cannot be combined with versionRevisions",
    );
    checks.rule(
        versions.is_none() && version_revisions.is_none(),
        "versions",
        "one of versions or versionRevisions is required",
    );
    if let Some(versions) = versions {
        checks.required_list("versions", Some(versions));
        checks.each_str("versions", versions, &constraints::PACKAGE_COMPONENT);
    }
    if let Some(revisions) = version_revisions {
        checks.each_str("versionRevisions", revisions.keys(), &constraints::PACKAGE_COMPONENT);
        checks.each_str("versionRevisions", revisions.values(), &constraints::REVISION);
    }
}

/// Checks a dispose or status-update selection: `versions` is required and
/// `versionRevisions` optionally pins revisions of those versions.
fn check_versions(
    checks: &mut FieldChecks,
    versions: Option<&Vec<String>>,
    version_revisions: Option<&BTreeMap<String, String>>,
) {
    checks.required_list("versions", versions);
    checks.each_str("versions", versions.into_iter().flatten(), &constraints::PACKAGE_COMPONENT);
    if let Some(revisions) = version_revisions {
        checks.each_str("versionRevisions", revisions.keys(), &constraints::PACKAGE_COMPONENT);
        checks.each_str("versionRevisions", revisions.values(), &constraints::REVISION);
    }
}

fn check_target(
    checks: &mut FieldChecks,
    domain: Option<&str>,
    domain_owner: Option<&str>,
    repository: Option<&str>,
) {
    checks.domain_scope(domain, domain_owner);
    checks.required_str("repository", repository, &constraints::REPOSITORY_NAME);
}

impl Validate for CopyPackageVersionsRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.required_str(
            "sourceRepository",
            self.source_repository.as_deref(),
            &constraints::REPOSITORY_NAME,
        );
        checks.required_str(
            "destinationRepository",
            self.destination_repository.as_deref(),
            &constraints::REPOSITORY_NAME,
        );
        checks.package_coordinates(self.format.as_ref(), self.namespace.as_deref(), self.package.as_deref());
        check_selection(&mut checks, self.versions.as_ref(), self.version_revisions.as_ref());
        checks.finish()
    }
}

impl Validate for DeletePackageVersionsRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_target(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.package_coordinates(self.format.as_ref(), self.namespace.as_deref(), self.package.as_deref());
        check_versions(&mut checks, self.versions.as_ref(), None);
        checks.finish()
    }
}

impl Validate for DisposePackageVersionsRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_target(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.package_coordinates(self.format.as_ref(), self.namespace.as_deref(), self.package.as_deref());
        check_versions(&mut checks, self.versions.as_ref(), self.version_revisions.as_ref());
        checks.finish()
    }
}

impl Validate for UpdatePackageVersionsStatusRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_target(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.package_coordinates(self.format.as_ref(), self.namespace.as_deref(), self.package.as_deref());
        check_versions(&mut checks, self.versions.as_ref(), self.version_revisions.as_ref());
        checks.required("targetStatus", self.target_status.as_ref());
        checks.finish()
    }
}
