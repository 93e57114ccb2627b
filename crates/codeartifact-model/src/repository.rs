//! Repositories, their upstreams and external connections.

use crate::constraints;
use crate::enums::{ExternalConnectionStatus, PackageFormat};
use crate::model;
use crate::validation::{FieldChecks, Validate, ValidationErrors};

model! {
    /// Upstream repository named in create/update requests.
    pub struct UpstreamRepository {
        /// Name of the upstream repository in the same domain.
        repository_name: String,
    }
}

model! {
    /// Upstream repository as reported in a [`RepositoryDescription`].
    pub struct UpstreamRepositoryInfo {
        /// Name of the upstream repository.
        repository_name: String,
    }
}

model! {
    /// External connection attached to a repository.
    pub struct RepositoryExternalConnectionInfo {
        /// Connection name (e.g., `public:npmjs`).
        external_connection_name: String,
        /// Format served through the connection.
        package_format: PackageFormat,
        /// Connection status.
        status: ExternalConnectionStatus,
    }
}

model! {
    /// Full description of a repository.
    pub struct RepositoryDescription {
        /// Repository name.
        name: String,
        /// Account that administers the repository.
        administrator_account: String,
        /// Domain containing the repository.
        domain_name: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository ARN.
        arn: String,
        /// Free-text description.
        description: String,
        /// Upstream repositories, in lookup order.
        upstreams: Vec<UpstreamRepositoryInfo>,
        /// External connections.
        external_connections: Vec<RepositoryExternalConnectionInfo>,
    }
}

model! {
    /// Repository entry in list results.
    pub struct RepositorySummary {
        /// Repository name.
        name: String,
        /// Account that administers the repository.
        administrator_account: String,
        /// Domain containing the repository.
        domain_name: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository ARN.
        arn: String,
        /// Free-text description.
        description: String,
    }
}

model! {
    /// Creates a repository in a domain.
    pub struct CreateRepositoryRequest {
        /// Domain to create the repository in.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Name of the new repository.
        repository: String,
        /// Free-text description.
        description: String,
        /// Upstream repositories, in lookup order.
        upstreams: Vec<UpstreamRepository>,
    }
}

model! {
    /// Result of [`CreateRepositoryRequest`].
    pub struct CreateRepositoryResult {
        /// The created repository.
        repository: RepositoryDescription,
    }
}

model! {
    /// Deletes a repository.
    pub struct DeleteRepositoryRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to delete.
        repository: String,
    }
}

model! {
    /// Result of [`DeleteRepositoryRequest`].
    pub struct DeleteRepositoryResult {
        /// The deleted repository.
        repository: RepositoryDescription,
    }
}

model! {
    /// Fetches a repository's description.
    pub struct DescribeRepositoryRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to describe.
        repository: String,
    }
}

model! {
    /// Result of [`DescribeRepositoryRequest`].
    pub struct DescribeRepositoryResult {
        /// The requested repository.
        repository: RepositoryDescription,
    }
}

model! {
    /// Updates a repository's description and upstreams.
    pub struct UpdateRepositoryRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to update.
        repository: String,
        /// New description.
        description: String,
        /// New upstream list, replacing the current one.
        upstreams: Vec<UpstreamRepository>,
    }
}

model! {
    /// Result of [`UpdateRepositoryRequest`].
    pub struct UpdateRepositoryResult {
        /// The updated repository.
        repository: RepositoryDescription,
    }
}

model! {
    /// Adds an external connection to a repository.
    pub struct AssociateExternalConnectionRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to connect.
        repository: String,
        /// Connection name (e.g., `public:pypi`).
        external_connection: String,
    }
}

model! {
    /// Result of [`AssociateExternalConnectionRequest`].
    pub struct AssociateExternalConnectionResult {
        /// The repository after the change.
        repository: RepositoryDescription,
    }
}

model! {
    /// Removes an external connection from a repository.
    pub struct DisassociateExternalConnectionRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to disconnect.
        repository: String,
        /// Connection name.
        external_connection: String,
    }
}

model! {
    /// Result of [`DisassociateExternalConnectionRequest`].
    pub struct DisassociateExternalConnectionResult {
        /// The repository after the change.
        repository: RepositoryDescription,
    }
}

model! {
    /// Fetches the endpoint package managers use for one format.
    pub struct GetRepositoryEndpointRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository name.
        repository: String,
        /// Format of the endpoint.
        format: PackageFormat,
    }
}

model! {
    /// Result of [`GetRepositoryEndpointRequest`].
    pub struct GetRepositoryEndpointResult {
        /// Endpoint URL.
        repository_endpoint: String,
    }
}

model! {
    /// Lists repositories owned by the calling account.
    pub struct ListRepositoriesRequest {
        /// Only repositories whose name starts with this prefix.
        repository_prefix: String,
        /// Page size.
        max_results: i32,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListRepositoriesRequest`].
    pub struct ListRepositoriesResult {
        /// One page of repositories.
        repositories: Vec<RepositorySummary>,
        /// Token for the next page; absent on the last page.
        next_token: String,
    }
}

model! {
    /// Lists repositories in one domain.
    pub struct ListRepositoriesInDomainRequest {
        /// Domain to list.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Only repositories administered by this account.
        administrator_account: String,
        /// Only repositories whose name starts with this prefix.
        repository_prefix: String,
        /// Page size.
        max_results: i32,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListRepositoriesInDomainRequest`].
    pub struct ListRepositoriesInDomainResult {
        /// One page of repositories.
        repositories: Vec<RepositorySummary>,
        /// Token for the next page; absent on the last page.
        next_token: String,
    }
}

impl CreateRepositoryRequest {
    /// Appends one upstream, creating the list when absent.
    pub fn add_upstream(&mut self, repository_name: impl Into<String>) -> &mut Self {
        push_upstream(&mut self.upstreams, repository_name.into());
        self
    }
}

impl UpdateRepositoryRequest {
    /// Appends one upstream, creating the list when absent.
    pub fn add_upstream(&mut self, repository_name: impl Into<String>) -> &mut Self {
        push_upstream(&mut self.upstreams, repository_name.into());
        self
    }
}

impl RepositoryDescription {
    /// Returns the upstream repository names in lookup order.
    #[must_use]
    pub fn upstream_names(&self) -> Vec<&str> {
        self.upstreams
            .iter()
            .flatten()
            .filter_map(|u| u.repository_name.as_deref())
            .collect()
    }
}

fn push_upstream(upstreams: &mut Option<Vec<UpstreamRepository>>, name: String) {
    upstreams
        .get_or_insert_with(Vec::new)
        .push(UpstreamRepository::default().with_repository_name(name));
}

fn check_repository(checks: &mut FieldChecks, domain: Option<&str>, owner: Option<&str>, repository: Option<&str>) {
    checks.domain_scope(domain, owner);
    checks.required_str("repository", repository, &constraints::REPOSITORY_NAME);
}

fn check_upstreams(checks: &mut FieldChecks, upstreams: Option<&Vec<UpstreamRepository>>) {
    for upstream in upstreams.into_iter().flatten() {
        checks.required_str(
            "upstreams.repositoryName",
            upstream.repository_name.as_deref(),
            &constraints::REPOSITORY_NAME,
        );
    }
}

impl Validate for CreateRepositoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.optional_str("description", self.description.as_deref(), &constraints::DESCRIPTION);
        check_upstreams(&mut checks, self.upstreams.as_ref());
        checks.finish()
    }
}

impl Validate for DeleteRepositoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.finish()
    }
}

impl Validate for DescribeRepositoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.finish()
    }
}

impl Validate for UpdateRepositoryRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.optional_str("description", self.description.as_deref(), &constraints::DESCRIPTION);
        check_upstreams(&mut checks, self.upstreams.as_ref());
        checks.finish()
    }
}

impl Validate for AssociateExternalConnectionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.required_str(
            "externalConnection",
            self.external_connection.as_deref(),
            &constraints::EXTERNAL_CONNECTION_NAME,
        );
        checks.finish()
    }
}

impl Validate for DisassociateExternalConnectionRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.required_str(
            "externalConnection",
            self.external_connection.as_deref(),
            &constraints::EXTERNAL_CONNECTION_NAME,
        );
        checks.finish()
    }
}

impl Validate for GetRepositoryEndpointRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        check_repository(&mut checks, self.domain.as_deref(), self.domain_owner.as_deref(), self.repository.as_deref());
        checks.required("format", self.format.as_ref());
        checks.finish()
    }
}

impl Validate for ListRepositoriesRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.optional_str(
            "repositoryPrefix",
            self.repository_prefix.as_deref(),
            &constraints::REPOSITORY_NAME,
        );
        checks.pagination(self.max_results, self.next_token.as_deref());
        checks.finish()
    }
}

impl Validate for ListRepositoriesInDomainRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.optional_str(
            "administratorAccount",
            self.administrator_account.as_deref(),
            &constraints::ACCOUNT_ID,
        );
        checks.optional_str(
            "repositoryPrefix",
            self.repository_prefix.as_deref(),
            &constraints::REPOSITORY_NAME,
        );
        checks.pagination(self.max_results, self.next_token.as_deref());
        checks.finish()
    }
}
