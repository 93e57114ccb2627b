//! Resource policies attached to domains and repositories.

use crate::constraints;
use crate::model;
use crate::validation::{FieldChecks, Validate, ValidationErrors};

model! {
    /// A resource-based permissions policy.
    pub struct ResourcePolicy {
        /// ARN of the resource the policy is attached to.
        resource_arn: String,
        /// Revision of the policy; changes on every update.
        revision: String,
        /// Policy JSON document.
        document: String,
    }
}

model! {
    /// Deletes the policy attached to a domain.
    pub struct DeleteDomainPermissionsPolicyRequest {
        /// Domain the policy is attached to.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Expected current revision; the call fails if it differs.
        policy_revision: String,
    }
}

model! {
    /// Result of [`DeleteDomainPermissionsPolicyRequest`].
    pub struct DeleteDomainPermissionsPolicyResult {
        /// The deleted policy.
        policy: ResourcePolicy,
    }
}

model! {
    /// Deletes the policy attached to a repository.
    pub struct DeleteRepositoryPermissionsPolicyRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository the policy is attached to.
        repository: String,
        /// Expected current revision; the call fails if it differs.
        policy_revision: String,
    }
}

model! {
    /// Result of [`DeleteRepositoryPermissionsPolicyRequest`].
    pub struct DeleteRepositoryPermissionsPolicyResult {
        /// The deleted policy.
        policy: ResourcePolicy,
    }
}

model! {
    /// Fetches the policy attached to a domain.
    pub struct GetDomainPermissionsPolicyRequest {
        /// Domain the policy is attached to.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
    }
}

model! {
    /// Result of [`GetDomainPermissionsPolicyRequest`].
    pub struct GetDomainPermissionsPolicyResult {
        /// The current policy.
        policy: ResourcePolicy,
    }
}

model! {
    /// Fetches the policy attached to a repository.
    pub struct GetRepositoryPermissionsPolicyRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository the policy is attached to.
        repository: String,
    }
}

model! {
    /// Result of [`GetRepositoryPermissionsPolicyRequest`].
    pub struct GetRepositoryPermissionsPolicyResult {
        /// The current policy.
        policy: ResourcePolicy,
    }
}

model! {
    /// Sets the policy attached to a domain.
    pub struct PutDomainPermissionsPolicyRequest {
        /// Domain to attach the policy to.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Expected current revision, for optimistic concurrency.
        policy_revision: String,
        /// Policy JSON document.
        policy_document: String,
    }
}

model! {
    /// Result of [`PutDomainPermissionsPolicyRequest`].
    pub struct PutDomainPermissionsPolicyResult {
        /// The stored policy.
        policy: ResourcePolicy,
    }
}

model! {
    /// Sets the policy attached to a repository.
    pub struct PutRepositoryPermissionsPolicyRequest {
        /// Domain containing the repository.
        domain: String,
        /// Account that owns the domain.
        domain_owner: String,
        /// Repository to attach the policy to.
        repository: String,
        /// Expected current revision, for optimistic concurrency.
        policy_revision: String,
        /// Policy JSON document.
        policy_document: String,
    }
}

model! {
    /// Result of [`PutRepositoryPermissionsPolicyRequest`].
    pub struct PutRepositoryPermissionsPolicyResult {
        /// The stored policy.
        policy: ResourcePolicy,
    }
}

impl Validate for DeleteDomainPermissionsPolicyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.optional_str(
            "policyRevision",
            self.policy_revision.as_deref(),
            &constraints::POLICY_REVISION,
        );
        checks.finish()
    }
}

impl Validate for DeleteRepositoryPermissionsPolicyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.required_str("repository", self.repository.as_deref(), &constraints::REPOSITORY_NAME);
        checks.optional_str(
            "policyRevision",
            self.policy_revision.as_deref(),
            &constraints::POLICY_REVISION,
        );
        checks.finish()
    }
}

impl Validate for GetDomainPermissionsPolicyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.finish()
    }
}

impl Validate for GetRepositoryPermissionsPolicyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.required_str("repository", self.repository.as_deref(), &constraints::REPOSITORY_NAME);
        checks.finish()
    }
}

impl Validate for PutDomainPermissionsPolicyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.optional_str(
            "policyRevision",
            self.policy_revision.as_deref(),
            &constraints::POLICY_REVISION,
        );
        checks.required_str(
            "policyDocument",
            self.policy_document.as_deref(),
            &constraints::POLICY_DOCUMENT,
        );
        checks.finish()
    }
}

impl Validate for PutRepositoryPermissionsPolicyRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut checks = FieldChecks::new();
        checks.domain_scope(self.domain.as_deref(), self.domain_owner.as_deref());
        checks.required_str("repository", self.repository.as_deref(), &constraints::REPOSITORY_NAME);
        checks.optional_str(
            "policyRevision",
            self.policy_revision.as_deref(),
            &constraints::POLICY_REVISION,
        );
        checks.required_str(
            "policyDocument",
            self.policy_document.as_deref(),
            &constraints::POLICY_DOCUMENT,
        );
        checks.finish()
    }
}
