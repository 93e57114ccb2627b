//! Packages, package versions and their assets.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::constraints;
use crate::enums::{HashAlgorithm, PackageFormat, PackageVersionSortType, PackageVersionStatus};
use crate::error::Result;
use crate::macros::insert_unique;
use crate::model;
use crate::validation::{FieldChecks, Validate, ValidationErrors};

model! {
    /// Package entry in a [`ListPackagesResult`].
    pub struct PackageSummary {
        /// Package format.
        format: PackageFormat,
        /// Namespace (npm scope, Maven group id).
        namespace: String,
        /// Package name.
        package: String,
    }
}

model! {
    /// Version entry in a [`ListPackageVersionsResult`].
    pub struct PackageVersionSummary {
        /// Version string.
        version: String,
        /// Revision of the version's assets and metadata.
        revision: String,
        /// Version status.
        status: PackageVersionStatus,
    }
}

model! {
    /// License declared by a package version.
    pub struct LicenseInfo {
        /// License name.
        name: String,
        /// URL of the license text.
        url: String,
    }
}

model! {
    /// Full description of one package version.
    pub struct PackageVersionDescription {
        /// Package format.
        format: PackageFormat,
        /// Namespace.
        namespace: String,
        /// Package name.
        package_name: String,
        /// Name shown to users.
        display_name: String,
        /// Version string.
        version: String,
        /// Short summary from the package metadata.
        summary: String,
        /// Home page URL.
        home_page: String,
        /// Source repository URL.
        source_code_repository: String,
        /// Publication time.
        #[serde(with = "crate::time::epoch_seconds")]
        published_time: DateTime<Utc>,
        /// Declared licenses.
        licenses: Vec<LicenseInfo>,
        /// Revision of the version's assets and metadata.
        revision: String,
        /// Version status.
        status: PackageVersionStatus,
    }
}

model! {
    /// A dependency declared by a package version.
    pub struct PackageDependency {
        /// Namespace of the dependency.
        namespace: String,
        /// Name of the dependency.
        package: String,
        /// Format-specific dependency type (e.g., `devDependencies`, `compile`).
        dependency_type: String,
        /// Version range the dependency accepts.
        version_requirement: String,
    }
}

model! {
    /// A file belonging to a package version.
    pub struct AssetSummary {
        /// File name.
        name: String,
        /// Size in bytes.
        size: i64,
        /// Digests of the file, keyed by algorithm.
        hashes: BTreeMap<HashAlgorithm, String>,
    }
}

impl AssetSummary {
    /// Adds one digest.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`](crate::Error::DuplicateKey) if a digest
    /// for `algorithm` is already present; the existing digest is kept.
    pub fn add_hash(&mut self, algorithm: HashAlgorithm, digest: impl Into<String>) -> Result<&mut Self> {
        insert_unique(&mut self.hashes, "hashes", algorithm, digest.into())?;
        Ok(self)
    }

    /// Returns the digest for `algorithm`, if reported.
    #[must_use]
    pub fn hash(&self, algorithm: HashAlgorithm) -> Option<&str> {
        self.hashes.as_ref()?.get(&algorithm).map(String::as_str)
    }

    /// Returns the strongest reported digest.
    #[must_use]
    pub fn strongest_hash(&self) -> Option<(HashAlgorithm, &str)> {
        self.hashes
            .as_ref()?
            .iter()
            .next_back()
            .map(|(algorithm, digest)| (*algorithm, digest.as_str()))
    }
}

model! {
    /// Lists packages in a repository.
    pub struct ListPackagesRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to list.
        repository: String,
        /// Only packages of this format.
        format: PackageFormat,
        /// Only packages in this namespace.
        namespace: String,
        /// Only packages whose name starts with this prefix.
        package_prefix: String,
        /// Page size.
        max_results: i32,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListPackagesRequest`].
    pub struct ListPackagesResult {
        /// One page of packages.
        packages: Vec<PackageSummary>,
        /// Token for the next page; absent on the last page.
        next_token: String,
    }
}

model! {
    /// Lists the versions of one package.
    pub struct ListPackageVersionsRequest {
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
        /// Only versions with this status.
        status: PackageVersionStatus,
        /// Sort order.
        sort_by: PackageVersionSortType,
        /// Page size.
        max_results: i32,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListPackageVersionsRequest`].
    pub struct ListPackageVersionsResult {
        /// Version a package manager installs by default.
        default_display_version: String,
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// One page of versions.
        versions: Vec<PackageVersionSummary>,
        /// Token for the next page; absent on the last page.
        next_token: String,
    }
}

model! {
    /// Fetches the description of one package version.
    pub struct DescribePackageVersionRequest {
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
        /// Version to describe.
        package_version: String,
    }
}

model! {
    /// Result of [`DescribePackageVersionRequest`].
    pub struct DescribePackageVersionResult {
        /// The requested version.
        package_version: PackageVersionDescription,
    }
}

model! {
    /// Lists the assets of one package version.
    pub struct ListPackageVersionAssetsRequest {
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
        /// Version whose assets are listed.
        package_version: String,
        /// Page size.
        max_results: i32,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListPackageVersionAssetsRequest`].
    pub struct ListPackageVersionAssetsResult {
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Version listed.
        version: String,
        /// Revision of the version.
        version_revision: String,
        /// Token for the next page; absent on the last page.
        next_token: String,
        /// One page of assets.
        assets: Vec<AssetSummary>,
    }
}

model! {
    /// Lists the dependencies of one package version.
    pub struct ListPackageVersionDependenciesRequest {
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
        /// Version whose dependencies are listed.
        package_version: String,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListPackageVersionDependenciesRequest`].
    pub struct ListPackageVersionDependenciesResult {
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Version listed.
        version: String,
        /// Revision of the version.
        version_revision: String,
        /// Token for the next page; absent on the last page.
        next_token: String,
        /// One page of dependencies.
        dependencies: Vec<PackageDependency>,
    }
}

model! {
    /// Fetches the readme of one package version.
    pub struct GetPackageVersionReadmeRequest {
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
        /// Version whose readme is fetched.
        package_version: String,
    }
}

model! {
    /// Result of [`GetPackageVersionReadmeRequest`].
    pub struct GetPackageVersionReadmeResult {
        /// Package format.
        format: PackageFormat,
        /// Package namespace.
        namespace: String,
        /// Package name.
        package: String,
        /// Version.
        version: String,
        /// Revision of the version.
        version_revision: String,
        /// Readme text.
        readme: String,
    }
}

model! {
    /// Downloads one asset of a package version.
    pub struct GetPackageVersionAssetRequest {
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
        /// Version containing the asset.
        package_version: String,
        /// Expected revision of the version.
        package_version_revision: String,
        /// Asset file name.
        asset: String,
    }
}

model! {
    /// Metadata returned alongside an asset download.
    ///
    /// The payload itself travels outside this structure, as a byte stream
    /// owned by the transport.
    pub struct GetPackageVersionAssetResult {
        /// Name of the downloaded asset.
        asset_name: String,
        /// Version containing the asset.
        package_version: String,
        /// Revision of the version.
        package_version_revision: String,
    }
}

/// Checks the fields shared by every request addressing one package.
fn check_package(
    checks: &mut FieldChecks,
    scope: (Option<&str>, Option<&str>, Option<&str>),
    format: Option<&PackageFormat>,
    namespace: Option<&str>,
    package: Option<&str>,
) {
    let (domain, owner, repository) = scope;
    checks.domain_scope(domain, owner);
    checks.required_str("repository", repository, &constraints::REPOSITORY_NAME);
    checks.package_coordinates(format, namespace, package);
}

impl Validate for ListPackagesRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.required_str("repository", self.repository.as_deref(), &constraints::REPOSITORY_NAME);
        checks.optional_str("namespace", self.namespace.as_deref(), &constraints::PACKAGE_COMPONENT);
        checks.optional_str(
            "packagePrefix",
            self.package_prefix.as_deref(),
            &constraints::PACKAGE_COMPONENT,
        );
        checks.pagination(self.max_results, self.next_token.as_deref());
        checks.finish()
    }
}

impl Validate for ListPackageVersionsRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_package(
            &mut checks,
            (self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref()),
            self.format.as_ref(),
            self.namespace.as_deref(),
            self.package.as_deref(),
        );
        checks.pagination(self.max_results, self.next_token.as_deref());
        checks.finish()
    }
}

impl Validate for DescribePackageVersionRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_package(
            &mut checks,
            (self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref()),
            self.format.as_ref(),
            self.namespace.as_deref(),
            self.package.as_deref(),
        );
        checks.required_str(
            "packageVersion",
            self.package_version.as_deref(),
            &constraints::PACKAGE_COMPONENT,
        );
        checks.finish()
    }
}

impl Validate for ListPackageVersionAssetsRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_package(
            &mut checks,
            (self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref()),
            self.format.as_ref(),
            self.namespace.as_deref(),
            self.package.as_deref(),
        );
        checks.required_str(
            "packageVersion",
            self.package_version.as_deref(),
            &constraints::PACKAGE_COMPONENT,
        );
        checks.pagination(self.max_results, self.next_token.as_deref());
        checks.finish()
    }
}

impl Validate for ListPackageVersionDependenciesRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_package(
            &mut checks,
            (self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref()),
            self.format.as_ref(),
            self.namespace.as_deref(),
            self.package.as_deref(),
        );
        checks.required_str(
            "packageVersion",
            self.package_version.as_deref(),
            &constraints::PACKAGE_COMPONENT,
        );
        checks.pagination(None, self.next_token.as_deref());
        checks.finish()
    }
}

impl Validate for GetPackageVersionReadmeRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_package(
            &mut checks,
            (self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref()),
            self.format.as_ref(),
            self.namespace.as_deref(),
            self.package.as_deref(),
        );
        checks.required_str(
            "packageVersion",
            self.package_version.as_deref(),
            &constraints::PACKAGE_COMPONENT,
        );
        checks.finish()
    }
}

impl Validate for GetPackageVersionAssetRequest {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_package(
            &mut checks,
            (self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref()),
            self.format.as_ref(),
            self.namespace.as_deref(),
            self.package.as_deref(),
        );
        checks.required_str(
            "packageVersion",
            self.package_version.as_deref(),
            &constraints::PACKAGE_COMPONENT,
        );
        checks.optional_str(
            "packageVersionRevision",
            self.package_version_revision.as_deref(),
            &constraints::REVISION,
        );
        checks.required_str("asset", self.asset.as_deref(), &constraints::ASSET_NAME);
        checks.finish()
    }
}
