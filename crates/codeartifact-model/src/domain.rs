//! Domains and the operations that manage them.
//!
//! A domain groups repositories under one administrative and billing
//! boundary. Assets are stored once per domain even when several of its
//! repositories contain them.

use chrono::{DateTime, Utc};

use crate::enums::DomainStatus;
use crate::model;
use crate::validation::{FieldChecks, Validate, ValidationErrors};
use crate::constraints;

model! {
    /// Full description of a domain, as returned by describe/create/delete.
    pub struct DomainDescription {
        /// Domain name.
        name: String,
        /// Account that owns the domain.
        owner: String,
        /// Domain ARN.
        arn: String,
        /// Current status.
        status: DomainStatus,
        /// Creation time.
        #[serde(with = "crate::time::epoch_seconds")]
        created_time: DateTime<Utc>,
        /// Key used to encrypt the domain's assets.
        encryption_key: String,
        /// Number of repositories in the domain.
        repository_count: i32,
        /// Total size of all assets in the domain.
        asset_size_bytes: i64,
    }
}

model! {
    /// Domain entry in a [`ListDomainsResult`].
    pub struct DomainSummary {
        /// Domain name.
        name: String,
        /// Account that owns the domain.
        owner: String,
        /// Domain ARN.
        arn: String,
        /// Current status.
        status: DomainStatus,
        /// Creation time.
        #[serde(with = "crate::time::epoch_seconds")]
        created_time: DateTime<Utc>,
        /// Key used to encrypt the domain's assets.
        encryption_key: String,
    }
}

model! {
    /// Creates a domain.
    pub struct CreateDomainRequest {
        /// Name of the new domain.
        domain: String,
        /// Encryption key ARN; the service default key is used when absent.
        encryption_key: String,
    }
}

model! {
    /// Result of [`CreateDomainRequest`].
    pub struct CreateDomainResult {
        /// The created domain.
        domain: DomainDescription,
    }
}

model! {
    /// Deletes a domain. The domain must not contain repositories.
    pub struct DeleteDomainRequest {
        /// Domain to delete.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
    }
}

model! {
    /// Result of [`DeleteDomainRequest`].
    pub struct DeleteDomainResult {
        /// The deleted domain.
        domain: DomainDescription,
    }
}

model! {
    /// Fetches a domain's description.
    pub struct DescribeDomainRequest {
        /// Domain to describe.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
    }
}

model! {
    /// Result of [`DescribeDomainRequest`].
    pub struct DescribeDomainResult {
        /// The requested domain.
        domain: DomainDescription,
    }
}

model! {
    /// Lists the domains visible to the caller.
    pub struct ListDomainsRequest {
        /// Page size.
        max_results: i32,
        /// Continuation token from a previous page.
        next_token: String,
    }
}

model! {
    /// Result of [`ListDomainsRequest`].
    pub struct ListDomainsResult {
        /// One page of domains.
        domains: Vec<DomainSummary>,
        /// Token for the next page; absent on the last page.
        next_token: String,
    }
}

impl Validate for CreateDomainRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.required_str("domain", self.domain.as_deref(), &constraints::DOMAIN_NAME);
        checks.optional_str(
            "encryptionKey",
            self.encryption_key.as_deref(),
            &constraints::ENCRYPTION_KEY,
        );
        checks.finish()
    }
}

impl Validate for DeleteDomainRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.finish()
    }
}

impl Validate for DescribeDomainRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.finish()
    }
}

impl Validate for ListDomainsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.pagination(self.max_results, self.next_token.as_deref());
        checks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_is_empty() {
        let request = DescribeDomainRequest::default();
        assert!(request.domain.is_none());
        assert!(request.domain_owner.is_none());
        assert_eq!(serde_json::to_string(&request).unwrap(), "{}");
    }

    #[test]
    fn test_request_serializes_wire_names() {
        let request = DescribeDomainRequest::default()
            .with_domain("my-domain")
            .with_domain_owner("111122223333");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"domain": "my-domain", "domainOwner": "111122223333"})
        );
    }

    #[test]
    fn test_debug_lists_present_fields_only() {
        let request = DescribeDomainRequest::default().with_domain("my-domain");
        assert_eq!(
            format!("{request:?}"),
            r#"DescribeDomainRequest { domain: "my-domain" }"#
        );
        assert_eq!(format!("{:?}", DescribeDomainRequest::default()), "DescribeDomainRequest");
    }

    #[test]
    fn test_clear_makes_field_absent() {
        let request = CreateDomainRequest::default()
            .with_domain("my-domain")
            .with_encryption_key("arn:aws:kms:us-west-2:111122223333:key/abc")
            .clear_encryption_key();
        assert!(request.encryption_key.is_none());
        assert_eq!(request, CreateDomainRequest::default().with_domain("my-domain"));
    }

    #[test]
    fn test_describe_result_deserializes() {
        let json = r#"{
            "domain": {
                "name": "my-domain",
                "owner": "111122223333",
                "arn": "arn:aws:codeartifact:us-west-2:111122223333:domain/my-domain",
                "status": "Active",
                "createdTime": 1594246400,
                "encryptionKey": "arn:aws:kms:us-west-2:111122223333:key/abc",
                "repositoryCount": 2,
                "assetSizeBytes": 1024
            }
        }"#;
        let result: DescribeDomainResult = serde_json::from_str(json).unwrap();
        let domain = result.domain.unwrap();
        assert_eq!(domain.status, Some(DomainStatus::Active));
        assert_eq!(domain.repository_count, Some(2));
        assert_eq!(
            domain.created_time,
            Utc.timestamp_opt(1_594_246_400, 0).single()
        );
    }

    #[test]
    fn test_unknown_domain_status_is_rejected() {
        let json = r#"{"domain": {"name": "d", "status": "Frozen"}}"#;
        let result: Result<DescribeDomainResult, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_domains_result() {
        let json = r#"{"domains": [{"name": "a1"}, {"name": "b2"}], "nextToken": "tok"}"#;
        let result: ListDomainsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.domains.as_ref().map(Vec::len), Some(2));
        assert_eq!(result.next_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_validate_describe_domain() {
        assert!(DescribeDomainRequest::default().with_domain("my-domain").is_valid());

        let errors = DescribeDomainRequest::default()
            .with_domain("My_Domain")
            .with_domain_owner("123")
            .validate()
            .unwrap_err();
        assert!(errors.has_field("domain"));
        assert!(errors.has_field("domainOwner"));
    }

    #[test]
    fn test_validate_list_domains_bounds() {
        assert!(ListDomainsRequest::default().is_valid());
        assert!(!ListDomainsRequest::default().with_max_results(0).is_valid());
        assert!(!ListDomainsRequest::default().with_next_token("has space").is_valid());
    }
}
