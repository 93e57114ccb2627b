//! Service client.
//!
//! [`CodeArtifactClient`] exposes one async method per operation. Every call
//! follows the same path: optional client-side validation, request
//! construction from the operation table, authentication headers, transport,
//! and decoding of either the result or the service error.

use std::sync::Arc;

use codeartifact_model::{
    self as model, BulkOutcome, GetPackageVersionAssetRequest, GetPackageVersionAssetResult,
    ServiceError,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::asset::{
    AssetContent, HEADER_ASSET_NAME, HEADER_PACKAGE_VERSION, HEADER_PACKAGE_VERSION_REVISION,
};
use crate::config::{ClientAuth, ClientConfig, ValidationMode};
use crate::error::ClientError;
use crate::operation::{build_request, decode_output, Operation};
use crate::transport::{HttpResponse, ReqwestTransport, Transport};

const JSON: &str = "application/json";

/// Client for the CodeArtifact control-plane API.
#[derive(Debug, Clone)]
pub struct CodeArtifactClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

macro_rules! simple_operations {
    ($(
        $(#[$meta:meta])*
        $method:ident($request:ident) -> $output:ident;
    )+) => {
        $(
            $(#[$meta])*
            ///
            /// # Errors
            ///
            /// Returns a validation, transport or service error.
            pub async fn $method(
                &self,
                request: &model::$request,
            ) -> Result<model::$output, ClientError> {
                self.execute(request).await
            }
        )+
    };
}

impl CodeArtifactClient {
    /// Creates a client that sends requests over HTTPS.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is invalid or the HTTP client cannot
    /// be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use codeartifact_client::{ClientConfig, CodeArtifactClient};
    ///
    /// let config = ClientConfig::for_region("us-west-2");
    /// let client = CodeArtifactClient::new(config)?;
    /// # Ok::<(), codeartifact_client::ClientError>(())
    /// ```
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Creates a client that sends requests through `transport`.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    simple_operations! {
        /// Adds an external connection to a repository.
        associate_external_connection(AssociateExternalConnectionRequest) -> AssociateExternalConnectionResult;
        /// Creates a domain.
        create_domain(CreateDomainRequest) -> CreateDomainResult;
        /// Creates a repository.
        create_repository(CreateRepositoryRequest) -> CreateRepositoryResult;
        /// Deletes a domain.
        delete_domain(DeleteDomainRequest) -> DeleteDomainResult;
        /// Deletes the policy attached to a domain.
        delete_domain_permissions_policy(DeleteDomainPermissionsPolicyRequest) -> DeleteDomainPermissionsPolicyResult;
        /// Deletes a repository.
        delete_repository(DeleteRepositoryRequest) -> DeleteRepositoryResult;
        /// Deletes the policy attached to a repository.
        delete_repository_permissions_policy(DeleteRepositoryPermissionsPolicyRequest) -> DeleteRepositoryPermissionsPolicyResult;
        /// Describes a domain.
        describe_domain(DescribeDomainRequest) -> DescribeDomainResult;
        /// Describes one package version.
        describe_package_version(DescribePackageVersionRequest) -> DescribePackageVersionResult;
        /// Describes a repository.
        describe_repository(DescribeRepositoryRequest) -> DescribeRepositoryResult;
        /// Removes an external connection from a repository.
        disassociate_external_connection(DisassociateExternalConnectionRequest) -> DisassociateExternalConnectionResult;
        /// Requests a temporary authorization token for a domain.
        get_authorization_token(GetAuthorizationTokenRequest) -> GetAuthorizationTokenResult;
        /// Fetches the policy attached to a domain.
        get_domain_permissions_policy(GetDomainPermissionsPolicyRequest) -> GetDomainPermissionsPolicyResult;
        /// Fetches the readme of a package version.
        get_package_version_readme(GetPackageVersionReadmeRequest) -> GetPackageVersionReadmeResult;
        /// Fetches the endpoint package managers use for one format.
        get_repository_endpoint(GetRepositoryEndpointRequest) -> GetRepositoryEndpointResult;
        /// Fetches the policy attached to a repository.
        get_repository_permissions_policy(GetRepositoryPermissionsPolicyRequest) -> GetRepositoryPermissionsPolicyResult;
        /// Lists one page of domains.
        list_domains(ListDomainsRequest) -> ListDomainsResult;
        /// Lists one page of assets of a package version.
        list_package_version_assets(ListPackageVersionAssetsRequest) -> ListPackageVersionAssetsResult;
        /// Lists one page of dependencies of a package version.
        list_package_version_dependencies(ListPackageVersionDependenciesRequest) -> ListPackageVersionDependenciesResult;
        /// Lists one page of versions of a package.
        list_package_versions(ListPackageVersionsRequest) -> ListPackageVersionsResult;
        /// Lists one page of packages in a repository.
        list_packages(ListPackagesRequest) -> ListPackagesResult;
        /// Lists one page of repositories owned by the caller.
        list_repositories(ListRepositoriesRequest) -> ListRepositoriesResult;
        /// Lists one page of repositories in a domain.
        list_repositories_in_domain(ListRepositoriesInDomainRequest) -> ListRepositoriesInDomainResult;
        /// Sets the policy attached to a domain.
        put_domain_permissions_policy(PutDomainPermissionsPolicyRequest) -> PutDomainPermissionsPolicyResult;
        /// Sets the policy attached to a repository.
        put_repository_permissions_policy(PutRepositoryPermissionsPolicyRequest) -> PutRepositoryPermissionsPolicyResult;
        /// Updates a repository's description and upstreams.
        update_repository(UpdateRepositoryRequest) -> UpdateRepositoryResult;
    }

    /// Copies package versions between repositories of one domain.
    ///
    /// # Errors
    ///
    /// Returns a validation, transport or service error. Per-version
    /// failures are reported in the result, not as an error.
    pub async fn copy_package_versions(
        &self,
        request: &model::CopyPackageVersionsRequest,
    ) -> Result<model::CopyPackageVersionsResult, ClientError> {
        let result = self.execute(request).await?;
        log_bulk_outcome(<model::CopyPackageVersionsRequest as Operation>::NAME, &result);
        Ok(result)
    }

    /// Deletes package versions.
    ///
    /// # Errors
    ///
    /// Returns a validation, transport or service error. Per-version
    /// failures are reported in the result, not as an error.
    pub async fn delete_package_versions(
        &self,
        request: &model::DeletePackageVersionsRequest,
    ) -> Result<model::DeletePackageVersionsResult, ClientError> {
        let result = self.execute(request).await?;
        log_bulk_outcome(<model::DeletePackageVersionsRequest as Operation>::NAME, &result);
        Ok(result)
    }

    /// Disposes package versions, deleting their assets.
    ///
    /// # Errors
    ///
    /// Returns a validation, transport or service error. Per-version
    /// failures are reported in the result, not as an error.
    pub async fn dispose_package_versions(
        &self,
        request: &model::DisposePackageVersionsRequest,
    ) -> Result<model::DisposePackageVersionsResult, ClientError> {
        let result = self.execute(request).await?;
        log_bulk_outcome(<model::DisposePackageVersionsRequest as Operation>::NAME, &result);
        Ok(result)
    }

    /// Changes the status of package versions.
    ///
    /// # Errors
    ///
    /// Returns a validation, transport or service error. Per-version
    /// failures are reported in the result, not as an error.
    pub async fn update_package_versions_status(
        &self,
        request: &model::UpdatePackageVersionsStatusRequest,
    ) -> Result<model::UpdatePackageVersionsStatusResult, ClientError> {
        let result = self.execute(request).await?;
        log_bulk_outcome(
            <model::UpdatePackageVersionsStatusRequest as Operation>::NAME,
            &result,
        );
        Ok(result)
    }

    /// Downloads one asset of a package version.
    ///
    /// The returned content streams the payload; read it with
    /// [`AssetContent::bytes`] or [`AssetContent::write_to`].
    ///
    /// # Errors
    ///
    /// Returns a validation, transport or service error.
    pub async fn get_package_version_asset(
        &self,
        request: &GetPackageVersionAssetRequest,
    ) -> Result<AssetContent, ClientError> {
        let response = self.dispatch(request).await?;
        let header = |name: &str| response.header(name).map(ToString::to_string);
        let metadata = GetPackageVersionAssetResult {
            asset_name: header(HEADER_ASSET_NAME),
            package_version: header(HEADER_PACKAGE_VERSION),
            package_version_revision: header(HEADER_PACKAGE_VERSION_REVISION),
        };
        Ok(AssetContent::new(metadata, response.body))
    }

    /// Sends any operation and decodes its result.
    ///
    /// # Errors
    ///
    /// Returns a validation, transport or service error, or a JSON error if
    /// the result cannot be decoded.
    pub async fn execute<O: Operation>(&self, request: &O) -> Result<O::Output, ClientError> {
        let response = self.dispatch(request).await?;
        let body = response.bytes().await?;
        decode_output::<O>(&body)
    }

    /// Validates, sends and checks the status of one call.
    async fn dispatch<O: Operation>(&self, request: &O) -> Result<HttpResponse, ClientError> {
        if self.config.validation == ValidationMode::ClientSide {
            request.validate().map_err(|errors| ClientError::Validation {
                operation: O::NAME,
                source: errors,
            })?;
        }

        let mut http = build_request(request)?;
        http.headers = self.request_headers(http.body.is_some())?;

        tracing::debug!(
            operation = O::NAME,
            method = %http.method,
            path = http.path,
            "Sending request"
        );

        let response = self.transport.send(http).await?;
        if response.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let error_type = response.header("x-amzn-errortype").map(ToString::to_string);
        let retry_after = response.header("retry-after").map(ToString::to_string);
        let body = response.bytes().await.unwrap_or_default();
        let error = ServiceError::from_http(status, error_type.as_deref(), retry_after.as_deref(), &body);

        tracing::warn!(
            operation = O::NAME,
            status,
            code = error.code(),
            retryable = error.is_retryable(),
            "Service returned an error"
        );

        Err(ClientError::Service {
            operation: O::NAME,
            source: error,
        })
    }

    /// Creates the headers sent with every request.
    fn request_headers(&self, has_body: bool) -> Result<HeaderMap, ClientError> {
        let mut headers = self.auth_headers()?;
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }
        Ok(headers)
    }

    /// Creates authentication headers based on configuration.
    fn auth_headers(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();

        match &self.config.auth {
            ClientAuth::None => {}
            ClientAuth::Bearer { token } => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                    ClientError::Auth {
                        message: "Invalid token".to_string(),
                    }
                })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
        }

        Ok(headers)
    }
}

fn log_bulk_outcome(operation: &'static str, outcome: &impl BulkOutcome) {
    let overlapping = outcome.overlapping_keys();
    if !overlapping.is_empty() {
        tracing::warn!(
            operation,
            versions = ?overlapping,
            "Package versions reported as both succeeded and failed"
        );
    }
    if outcome.has_failures() {
        tracing::info!(
            operation,
            succeeded = outcome.succeeded_count(),
            failed = outcome.failed_count(),
            "Bulk operation partially failed"
        );
    }
}
