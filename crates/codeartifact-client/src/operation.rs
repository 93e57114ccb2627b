//! Operation descriptors.
//!
//! Each request type knows its HTTP method, path and which of its members
//! travel in the query string. Everything else is sent as the JSON body of
//! `POST` and `PUT` requests. [`build_request`] performs that split on the
//! serialized request, so the mapping lives in one table below.

use std::fmt;

use bytes::Bytes;
use codeartifact_model as model;
use model::Validate;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ClientError;
use crate::transport::HttpRequest;

/// Static description of one service operation.
pub trait Operation: Serialize + Validate + fmt::Debug + Send + Sync {
    /// Operation name (e.g., `CreateDomain`).
    const NAME: &'static str;
    /// HTTP method.
    const METHOD: Method;
    /// Path relative to the endpoint.
    const PATH: &'static str;
    /// Members sent in the query string, as `(wire name, query key)`.
    const QUERY: &'static [(&'static str, &'static str)];

    /// Result type decoded from a successful response.
    type Output: DeserializeOwned + fmt::Debug + Send;
}

/// Turns a request into an [`HttpRequest`] without headers.
///
/// # Errors
///
/// Returns an error if the request cannot be serialized, or if a query
/// member is not a scalar.
pub fn build_request<O: Operation>(operation: &O) -> Result<HttpRequest, ClientError> {
    let mut members = match serde_json::to_value(operation)? {
        Value::Object(members) => members,
        other => {
            return Err(ClientError::Config {
                message: format!("{} did not serialize to an object: {other}", O::NAME),
            })
        }
    };

    let mut query = Vec::new();
    for (wire, key) in O::QUERY {
        if let Some(value) = members.remove(*wire) {
            query.push(((*key).to_string(), query_value(O::NAME, wire, value)?));
        }
    }

    let body = if O::METHOD == Method::POST || O::METHOD == Method::PUT {
        Some(Bytes::from(serde_json::to_vec(&Value::Object(members))?))
    } else {
        None
    };

    Ok(HttpRequest {
        operation: O::NAME,
        method: O::METHOD,
        path: O::PATH,
        query,
        headers: HeaderMap::new(),
        body,
    })
}

/// Decodes a successful response body. An empty body decodes as `{}`.
///
/// # Errors
///
/// Returns an error if the body does not match the result type.
pub fn decode_output<O: Operation>(body: &[u8]) -> Result<O::Output, ClientError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Object(Map::new())).map_err(Into::into);
    }
    serde_json::from_slice(body).map_err(Into::into)
}

fn query_value(operation: &str, wire: &str, value: Value) -> Result<String, ClientError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(ClientError::Config {
            message: format!("{operation}.{wire} cannot be sent as a query parameter: {other}"),
        }),
    }
}

macro_rules! operations {
    ($(
        $name:literal: $request:ident => $output:ident,
        $method:ident $path:literal
        [$($wire:literal => $key:literal),* $(,)?];
    )+) => {
        $(
            impl Operation for model::$request {
                const NAME: &'static str = $name;
                const METHOD: Method = Method::$method;
                const PATH: &'static str = $path;
                const QUERY: &'static [(&'static str, &'static str)] = &[$(($wire, $key)),*];

                type Output = model::$output;
            }
        )+

        /// Every operation name, in table order.
        pub const OPERATION_NAMES: &[&str] = &[$($name),+];
    };
}

operations! {
    "AssociateExternalConnection": AssociateExternalConnectionRequest => AssociateExternalConnectionResult,
    POST "/v1/repository/external-connection"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "externalConnection" => "external-connection"];

    "CopyPackageVersions": CopyPackageVersionsRequest => CopyPackageVersionsResult,
    POST "/v1/package/versions/copy"
    ["domain" => "domain", "domainOwner" => "domain-owner",
     "sourceRepository" => "source-repository", "destinationRepository" => "destination-repository",
     "format" => "format", "namespace" => "namespace", "package" => "package"];

    "CreateDomain": CreateDomainRequest => CreateDomainResult,
    POST "/v1/domain"
    ["domain" => "domain"];

    "CreateRepository": CreateRepositoryRequest => CreateRepositoryResult,
    POST "/v1/repository"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository"];

    "DeleteDomain": DeleteDomainRequest => DeleteDomainResult,
    DELETE "/v1/domain"
    ["domain" => "domain", "domainOwner" => "domain-owner"];

    "DeleteDomainPermissionsPolicy": DeleteDomainPermissionsPolicyRequest => DeleteDomainPermissionsPolicyResult,
    DELETE "/v1/domain/permissions/policy"
    ["domain" => "domain", "domainOwner" => "domain-owner", "policyRevision" => "policy-revision"];

    "DeletePackageVersions": DeletePackageVersionsRequest => DeletePackageVersionsResult,
    POST "/v1/package/versions/delete"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package"];

    "DeleteRepository": DeleteRepositoryRequest => DeleteRepositoryResult,
    DELETE "/v1/repository"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository"];

    "DeleteRepositoryPermissionsPolicy": DeleteRepositoryPermissionsPolicyRequest => DeleteRepositoryPermissionsPolicyResult,
    DELETE "/v1/repository/permissions/policies"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "policyRevision" => "policy-revision"];

    "DescribeDomain": DescribeDomainRequest => DescribeDomainResult,
    GET "/v1/domain"
    ["domain" => "domain", "domainOwner" => "domain-owner"];

    "DescribePackageVersion": DescribePackageVersionRequest => DescribePackageVersionResult,
    GET "/v1/package/version"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package",
     "packageVersion" => "version"];

    "DescribeRepository": DescribeRepositoryRequest => DescribeRepositoryResult,
    GET "/v1/repository"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository"];

    "DisassociateExternalConnection": DisassociateExternalConnectionRequest => DisassociateExternalConnectionResult,
    DELETE "/v1/repository/external-connection"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "externalConnection" => "external-connection"];

    "DisposePackageVersions": DisposePackageVersionsRequest => DisposePackageVersionsResult,
    POST "/v1/package/versions/dispose"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package"];

    "GetAuthorizationToken": GetAuthorizationTokenRequest => GetAuthorizationTokenResult,
    POST "/v1/authorization-token"
    ["domain" => "domain", "domainOwner" => "domain-owner", "durationSeconds" => "duration"];

    "GetDomainPermissionsPolicy": GetDomainPermissionsPolicyRequest => GetDomainPermissionsPolicyResult,
    GET "/v1/domain/permissions/policy"
    ["domain" => "domain", "domainOwner" => "domain-owner"];

    "GetPackageVersionAsset": GetPackageVersionAssetRequest => GetPackageVersionAssetResult,
    GET "/v1/package/version/asset"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package",
     "packageVersion" => "version", "packageVersionRevision" => "revision", "asset" => "asset"];

    "GetPackageVersionReadme": GetPackageVersionReadmeRequest => GetPackageVersionReadmeResult,
    GET "/v1/package/version/readme"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package",
     "packageVersion" => "version"];

    "GetRepositoryEndpoint": GetRepositoryEndpointRequest => GetRepositoryEndpointResult,
    GET "/v1/repository/endpoint"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format"];

    "GetRepositoryPermissionsPolicy": GetRepositoryPermissionsPolicyRequest => GetRepositoryPermissionsPolicyResult,
    GET "/v1/repository/permissions/policy"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository"];

    "ListDomains": ListDomainsRequest => ListDomainsResult,
    POST "/v1/domains"
    [];

    "ListPackageVersionAssets": ListPackageVersionAssetsRequest => ListPackageVersionAssetsResult,
    POST "/v1/package/version/assets"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package",
     "packageVersion" => "version", "maxResults" => "max-results", "nextToken" => "next-token"];

    "ListPackageVersionDependencies": ListPackageVersionDependenciesRequest => ListPackageVersionDependenciesResult,
    POST "/v1/package/version/dependencies"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package",
     "packageVersion" => "version", "nextToken" => "next-token"];

    "ListPackageVersions": ListPackageVersionsRequest => ListPackageVersionsResult,
    POST "/v1/package/versions"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package",
     "status" => "status", "sortBy" => "sortBy", "maxResults" => "max-results",
     "nextToken" => "next-token"];

    "ListPackages": ListPackagesRequest => ListPackagesResult,
    POST "/v1/packages"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "packagePrefix" => "package-prefix",
     "maxResults" => "max-results", "nextToken" => "next-token"];

    "ListRepositories": ListRepositoriesRequest => ListRepositoriesResult,
    POST "/v1/repositories"
    ["repositoryPrefix" => "repository-prefix", "maxResults" => "max-results",
     "nextToken" => "next-token"];

    "ListRepositoriesInDomain": ListRepositoriesInDomainRequest => ListRepositoriesInDomainResult,
    POST "/v1/domain/repositories"
    ["domain" => "domain", "domainOwner" => "domain-owner",
     "administratorAccount" => "administrator-account", "repositoryPrefix" => "repository-prefix",
     "maxResults" => "max-results", "nextToken" => "next-token"];

    "PutDomainPermissionsPolicy": PutDomainPermissionsPolicyRequest => PutDomainPermissionsPolicyResult,
    PUT "/v1/domain/permissions/policy"
    [];

    "PutRepositoryPermissionsPolicy": PutRepositoryPermissionsPolicyRequest => PutRepositoryPermissionsPolicyResult,
    PUT "/v1/repository/permissions/policy"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository"];

    "UpdatePackageVersionsStatus": UpdatePackageVersionsStatusRequest => UpdatePackageVersionsStatusResult,
    POST "/v1/package/versions/update_status"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository",
     "format" => "format", "namespace" => "namespace", "package" => "package"];

    "UpdateRepository": UpdateRepositoryRequest => UpdateRepositoryResult,
    PUT "/v1/repository"
    ["domain" => "domain", "domainOwner" => "domain-owner", "repository" => "repository"];
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{
        CopyPackageVersionsRequest, DescribeDomainRequest, GetAuthorizationTokenRequest,
        ListDomainsRequest, ListPackageVersionsRequest, PackageFormat, PackageVersionStatus,
        PutDomainPermissionsPolicyRequest,
    };

    #[test]
    fn test_every_operation_is_described() {
        assert_eq!(OPERATION_NAMES.len(), 31);
        let mut sorted = OPERATION_NAMES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 31);
    }

    #[test]
    fn test_get_has_query_and_no_body() {
        let request = DescribeDomainRequest::default()
            .with_domain("my-domain")
            .with_domain_owner("111122223333");
        let http = build_request(&request).unwrap();

        assert_eq!(http.method, Method::GET);
        assert_eq!(http.path, "/v1/domain");
        assert_eq!(
            http.query,
            vec![
                ("domain".to_string(), "my-domain".to_string()),
                ("domain-owner".to_string(), "111122223333".to_string()),
            ]
        );
        assert!(http.body.is_none());
    }

    #[test]
    fn test_absent_query_members_are_omitted() {
        let http = build_request(&DescribeDomainRequest::default().with_domain("d1")).unwrap();
        assert_eq!(http.query_param("domain"), Some("d1"));
        assert_eq!(http.query_param("domain-owner"), None);
    }

    #[test]
    fn test_post_splits_query_and_body() {
        let mut request = CopyPackageVersionsRequest::default()
            .with_domain("my-domain")
            .with_source_repository("staging")
            .with_destination_repository("release")
            .with_format(PackageFormat::Npm)
            .with_package("lodash")
            .with_allow_overwrite(true);
        request.add_version("4.17.20");

        let http = build_request(&request).unwrap();
        assert_eq!(http.query_param("source-repository"), Some("staging"));
        assert_eq!(http.query_param("format"), Some("npm"));
        assert_eq!(
            http.body_json().unwrap().unwrap(),
            serde_json::json!({"versions": ["4.17.20"], "allowOverwrite": true})
        );
    }

    #[test]
    fn test_post_without_body_members_sends_empty_object() {
        let http = build_request(&ListDomainsRequest::default()).unwrap();
        assert_eq!(http.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn test_numeric_and_enum_query_values() {
        let request = ListPackageVersionsRequest::default()
            .with_domain("my-domain")
            .with_repository("my-repo")
            .with_format(PackageFormat::Pypi)
            .with_package("requests")
            .with_status(PackageVersionStatus::Published)
            .with_max_results(50);
        let http = build_request(&request).unwrap();
        assert_eq!(http.query_param("status"), Some("Published"));
        assert_eq!(http.query_param("max-results"), Some("50"));

        let token = build_request(
            &GetAuthorizationTokenRequest::default()
                .with_domain("my-domain")
                .with_duration_seconds(900),
        )
        .unwrap();
        assert_eq!(token.query_param("duration"), Some("900"));
    }

    #[test]
    fn test_put_domain_policy_is_body_only() {
        let request = PutDomainPermissionsPolicyRequest::default()
            .with_domain("my-domain")
            .with_policy_document("{}");
        let http = build_request(&request).unwrap();
        assert!(http.query.is_empty());
        assert_eq!(
            http.body_json().unwrap().unwrap(),
            serde_json::json!({"domain": "my-domain", "policyDocument": "{}"})
        );
    }

    #[test]
    fn test_decode_empty_body() {
        let result = decode_output::<DescribeDomainRequest>(b"").unwrap();
        assert!(result.domain.is_none());
    }

    #[test]
    fn test_decode_rejects_unknown_enum() {
        let body = br#"{"domain": {"status": "Melting"}}"#;
        assert!(matches!(
            decode_output::<DescribeDomainRequest>(body),
            Err(ClientError::Json { .. })
        ));
    }
}
