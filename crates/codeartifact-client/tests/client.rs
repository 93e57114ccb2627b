//! Integration tests for the CodeArtifact client.
//!
//! These tests use wiremock to mock the service and verify the requests the
//! client sends and how it decodes responses.

use std::time::Duration;

use codeartifact_client::model::{
    BulkOutcome, CopyPackageVersionsRequest, CreateDomainRequest, DescribeDomainRequest, DomainStatus,
    GetAuthorizationTokenRequest, GetPackageVersionAssetRequest, HashAlgorithm, ListDomainsRequest,
    PackageFormat, PackageVersionErrorCode, PackageVersionStatus,
    PutDomainPermissionsPolicyRequest, ServiceError, VersionOutcome,
};
use codeartifact_client::{ClientAuth, ClientConfig, ClientError, CodeArtifactClient, ValidationMode};
use sha2::{Digest, Sha256};
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CodeArtifactClient {
    let config = ClientConfig::new(server.uri()).with_auth(ClientAuth::bearer("test-token"));
    CodeArtifactClient::new(config).expect("client")
}

/// DescribeDomain sends its members as query parameters with the bearer token.
#[tokio::test]
async fn test_describe_domain_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/domain"))
        .and(query_param("domain", "my-domain"))
        .and(query_param("domain-owner", "111122223333"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "domain": {
                "name": "my-domain",
                "owner": "111122223333",
                "status": "Active",
                "createdTime": 1_594_246_400,
                "repositoryCount": 2
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .describe_domain(
            &DescribeDomainRequest::default()
                .with_domain("my-domain")
                .with_domain_owner("111122223333"),
        )
        .await
        .expect("describe domain");

    let domain = result.domain.expect("domain");
    assert_eq!(domain.name.as_deref(), Some("my-domain"));
    assert_eq!(domain.status, Some(DomainStatus::Active));
    assert_eq!(domain.repository_count, Some(2));
    assert_eq!(domain.created_time.map(|t| t.timestamp()), Some(1_594_246_400));
}

/// ListDomains is a POST whose members all travel in an empty JSON body.
#[tokio::test]
async fn test_list_domains_sends_empty_object() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/domains"))
        .and(body_json(serde_json::json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "domains": [{"name": "a"}, {"name": "b"}],
            "nextToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .list_domains(&ListDomainsRequest::default())
        .await
        .expect("list domains");

    assert_eq!(result.domains.map(|d| d.len()), Some(2));
    assert_eq!(result.next_token.as_deref(), Some("page-2"));
}

/// A 429 with an error type header and Retry-After becomes a throttling error.
#[tokio::test]
async fn test_throttling_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/domain"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("x-amzn-ErrorType", "ThrottlingException:http://internal.amazon.com/coral/")
                .insert_header("Retry-After", "7")
                .set_body_json(serde_json::json!({"message": "Rate exceeded"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .describe_domain(&DescribeDomainRequest::default().with_domain("my-domain"))
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(matches!(err, ClientError::Service { operation: "DescribeDomain", .. }));
    let service = err.service_error().expect("service error");
    assert!(matches!(service, ServiceError::Throttling(_)));
    assert_eq!(service.message(), Some("Rate exceeded"));
    assert_eq!(service.retry_after(), Some(Duration::from_secs(7)));
}

/// Unknown error types are kept with their code and status.
#[tokio::test]
async fn test_unknown_error_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/domain"))
        .respond_with(ResponseTemplate::new(402).set_body_json(serde_json::json!({
            "__type": "com.amazonaws.codeartifact#PaymentRequiredException",
            "message": "Account suspended"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_domain(&CreateDomainRequest::default().with_domain("my-domain"))
        .await
        .unwrap_err();

    assert!(!err.is_retryable());
    match err.service_error() {
        Some(ServiceError::Unknown { code, status, message }) => {
            assert_eq!(code, "PaymentRequiredException");
            assert_eq!(*status, 402);
            assert_eq!(message, "Account suspended");
        }
        other => panic!("expected unknown service error, got {other:?}"),
    }
}

/// Invalid requests never reach the service in client-side mode.
#[tokio::test]
async fn test_client_side_validation_blocks_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .describe_domain(&DescribeDomainRequest::default().with_domain("Not A Domain"))
        .await
        .unwrap_err();

    match err {
        ClientError::Validation { operation, source } => {
            assert_eq!(operation, "DescribeDomain");
            assert!(source.iter().any(|e| e.field == "domain"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// Server-side mode sends requests as built.
#[tokio::test]
async fn test_server_side_validation_sends_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/domain"))
        .and(query_param_is_missing("domain"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "__type": "ValidationException",
            "message": "domain is required",
            "reason": "FIELD_VALIDATION_FAILED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri()).with_validation(ValidationMode::ServerSide);
    let client = CodeArtifactClient::new(config).expect("client");

    let err = client
        .describe_domain(&DescribeDomainRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err.service_error(),
        Some(ServiceError::Validation(e)) if e.message.as_deref() == Some("domain is required")
    ));
}

/// Copy splits coordinates into the query and selection into the body, and
/// per-version outcomes are reported in the result.
#[tokio::test]
async fn test_copy_package_versions() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/package/versions/copy"))
        .and(query_param("domain", "my-domain"))
        .and(query_param("source-repository", "staging"))
        .and(query_param("destination-repository", "release"))
        .and(query_param("format", "npm"))
        .and(query_param("package", "lodash"))
        .and(body_json(serde_json::json!({
            "versions": ["4.17.20", "4.17.21"],
            "allowOverwrite": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "successfulVersions": {
                "4.17.20": {"revision": "REVISION-1", "status": "Published"}
            },
            "failedVersions": {
                "4.17.21": {"errorCode": "ALREADY_EXISTS", "errorMessage": "Version exists"}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut request = CopyPackageVersionsRequest::default()
        .with_domain("my-domain")
        .with_source_repository("staging")
        .with_destination_repository("release")
        .with_format(PackageFormat::Npm)
        .with_package("lodash")
        .with_allow_overwrite(false);
    request.add_version("4.17.20").add_version("4.17.21");

    let result = client_for(&server)
        .copy_package_versions(&request)
        .await
        .expect("copy");

    assert!(result.has_failures());
    assert_eq!(result.succeeded_count(), 1);
    assert!(matches!(
        result.outcome_for("4.17.20"),
        VersionOutcome::Succeeded(info) if info.status == Some(PackageVersionStatus::Published)
    ));
    assert!(matches!(
        result.outcome_for("4.17.21"),
        VersionOutcome::Failed(error) if error.error_code == Some(PackageVersionErrorCode::AlreadyExists)
    ));
    assert!(matches!(result.outcome_for("1.0.0"), VersionOutcome::Missing));
}

/// PutDomainPermissionsPolicy is a PUT with every member in the body.
#[tokio::test]
async fn test_put_domain_permissions_policy() {
    let server = MockServer::start().await;
    let document = r#"{"Version":"2012-10-17","Statement":[]}"#;

    Mock::given(method("PUT"))
        .and(path("/v1/domain/permissions/policy"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "domain": "my-domain",
            "policyDocument": document
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "policy": {"revision": "rev-2", "document": document}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .put_domain_permissions_policy(
            &PutDomainPermissionsPolicyRequest::default()
                .with_domain("my-domain")
                .with_policy_document(document),
        )
        .await
        .expect("put policy");

    assert_eq!(result.policy.and_then(|p| p.revision).as_deref(), Some("rev-2"));
}

/// Token requests carry the duration as a query parameter.
#[tokio::test]
async fn test_get_authorization_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/authorization-token"))
        .and(query_param("domain", "my-domain"))
        .and(query_param("duration", "900"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "authorizationToken": "secret-token",
            "expiration": 1_594_247_300
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .get_authorization_token(
            &GetAuthorizationTokenRequest::default()
                .with_domain("my-domain")
                .with_duration(Duration::from_secs(900)),
        )
        .await
        .expect("token");

    assert_eq!(result.authorization_token.as_deref(), Some("secret-token"));
    assert!(!format!("{result:?}").contains("secret-token"));
}

/// Assets stream their payload and report metadata from headers.
#[tokio::test]
async fn test_get_package_version_asset() {
    let server = MockServer::start().await;
    let payload = b"package tarball bytes".to_vec();
    let digest = hex::encode(Sha256::digest(&payload));

    Mock::given(method("GET"))
        .and(path("/v1/package/version/asset"))
        .and(query_param("version", "4.17.21"))
        .and(query_param("asset", "lodash-4.17.21.tgz"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-assetname", "lodash-4.17.21.tgz")
                .insert_header("x-packageversion", "4.17.21")
                .insert_header("x-packageversionrevision", "REVISION-1")
                .set_body_bytes(payload.clone()),
        )
        .mount(&server)
        .await;

    let request = GetPackageVersionAssetRequest::default()
        .with_domain("my-domain")
        .with_repository("release")
        .with_format(PackageFormat::Npm)
        .with_package("lodash")
        .with_package_version("4.17.21")
        .with_asset("lodash-4.17.21.tgz");
    let client = client_for(&server);

    let asset = client.get_package_version_asset(&request).await.expect("asset");
    assert_eq!(asset.metadata().asset_name.as_deref(), Some("lodash-4.17.21.tgz"));
    assert_eq!(asset.metadata().package_version_revision.as_deref(), Some("REVISION-1"));

    let body = asset
        .expect_digest(HashAlgorithm::Sha256, digest)
        .expect("sha256 supported")
        .bytes()
        .await
        .expect("body");
    assert_eq!(body.as_ref(), payload.as_slice());

    let mismatch = client
        .get_package_version_asset(&request)
        .await
        .expect("asset")
        .expect_digest(HashAlgorithm::Sha256, "00")
        .expect("sha256 supported")
        .bytes()
        .await
        .unwrap_err();
    assert!(matches!(mismatch, ClientError::ChecksumMismatch { .. }));
}
