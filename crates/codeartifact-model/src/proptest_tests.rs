//! Property-based tests for the model types.
//!
//! These tests use proptest to check the equality, hashing, copy and
//! duplicate-key laws across many randomly generated values.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;

use crate::{
    constraints, CopyPackageVersionsRequest, Error, ExternalConnectionStatus, PackageFormat,
    PackageVersionStatus, RepositoryDescription, RepositoryExternalConnectionInfo,
    UpdatePackageVersionsStatusRequest, UpdateRepositoryRequest, UpstreamRepository,
    UpstreamRepositoryInfo,
};

/// Strategy for generating domain names.
fn domain_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,20}[a-z0-9]"
}

/// Strategy for generating version strings.
fn version_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}"
}

/// Strategy for generating package formats.
fn format_strategy() -> impl Strategy<Value = PackageFormat> {
    prop::sample::select(PackageFormat::ALL)
}

/// Strategy for generating copy requests with any subset of fields present.
fn copy_request_strategy() -> impl Strategy<Value = CopyPackageVersionsRequest> {
    (
        prop::option::of(domain_strategy()),
        prop::option::of("[0-9]{12}"),
        prop::option::of(format_strategy()),
        prop::option::of("[a-z]{1,10}"),
        prop::option::of(prop::collection::vec(version_strategy(), 0..4)),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(domain, owner, format, package, versions, overwrite)| {
            CopyPackageVersionsRequest {
                domain,
                domain_owner: owner,
                format,
                package,
                versions,
                allow_overwrite: overwrite,
                ..CopyPackageVersionsRequest::default()
            }
        })
}

/// Strategy for generating external connections with any subset of fields.
fn connection_strategy() -> impl Strategy<Value = RepositoryExternalConnectionInfo> {
    (
        prop::option::of("public:[a-z]{2,10}"),
        prop::option::of(format_strategy()),
        prop::option::of(prop::sample::select(ExternalConnectionStatus::ALL)),
    )
        .prop_map(|(name, format, status)| RepositoryExternalConnectionInfo {
            external_connection_name: name,
            package_format: format,
            status,
        })
}

/// Strategy for generating repository descriptions with nested lists.
fn repository_strategy() -> impl Strategy<Value = RepositoryDescription> {
    (
        prop::option::of("[a-z]{2,12}"),
        prop::option::of(domain_strategy()),
        prop::option::of(prop::collection::vec(
            prop::option::of("[a-z]{2,12}")
                .prop_map(|name| UpstreamRepositoryInfo { repository_name: name }),
            0..4,
        )),
        prop::option::of(prop::collection::vec(connection_strategy(), 0..3)),
    )
        .prop_map(|(name, domain, upstreams, connections)| RepositoryDescription {
            name,
            domain_name: domain,
            upstreams,
            external_connections: connections,
            ..RepositoryDescription::default()
        })
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    /// Equality is reflexive and symmetric, and equal values hash equally.
    #[test]
    fn equality_and_hash_agree(a in copy_request_strategy(), b in copy_request_strategy()) {
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
        prop_assert_eq!(hash_of(&a), hash_of(&a.clone()));
    }

    /// Absent and present fields never compare equal.
    #[test]
    fn absent_differs_from_present(request in copy_request_strategy(), domain in domain_strategy()) {
        let without = request.clone().clear_domain();
        let with = request.with_domain(domain);
        prop_assert_ne!(without, with);
    }

    /// Equality and hashing agree on nested values.
    #[test]
    fn nested_equality_and_hash_agree(a in repository_strategy(), b in repository_strategy()) {
        prop_assert_eq!(&a, &a.clone());
        prop_assert_eq!(a == b, b == a);
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    /// Clearing a field inside a nested element changes equality, if it was set.
    #[test]
    fn nested_absent_differs_from_present(
        repository in repository_strategy(),
        connection in connection_strategy(),
        status in prop::sample::select(ExternalConnectionStatus::ALL),
    ) {
        let present = connection.with_status(status);
        let absent = present.clone().clear_status();

        let with = repository.clone().with_external_connections(vec![present.clone()]);
        let without = repository.with_external_connections(vec![absent]);
        prop_assert_ne!(&with, &without);

        let present_again = with.clone().with_external_connections(vec![present]);
        prop_assert_eq!(hash_of(&with), hash_of(&present_again));
    }

    /// An empty nested list is present, not absent.
    #[test]
    fn nested_empty_list_differs_from_absent(repository in repository_strategy()) {
        let empty = repository.clone().with_upstreams(Vec::<UpstreamRepositoryInfo>::new());
        let absent = repository.clear_upstreams();
        prop_assert_ne!(empty, absent);
    }

    /// Changing the caller's list after setting it is not observed.
    #[test]
    fn list_setter_copies_input(
        names in prop::collection::vec("[a-z]{2,10}", 1..5),
        extra in "[a-z]{2,10}",
    ) {
        let mut upstreams: Vec<UpstreamRepository> = names
            .iter()
            .map(|n| UpstreamRepository::default().with_repository_name(n.clone()))
            .collect();
        let request = UpdateRepositoryRequest::default().with_upstreams(upstreams.clone());
        upstreams.push(UpstreamRepository::default().with_repository_name(extra));

        prop_assert_eq!(request.upstreams.as_ref().map(Vec::len), Some(names.len()));
    }

    /// A duplicate key fails and the first revision survives.
    #[test]
    fn duplicate_version_revision_keeps_original(
        version in version_strategy(),
        first in "[A-Za-z0-9]{1,20}",
        second in "[A-Za-z0-9]{1,20}",
    ) {
        let mut request = UpdatePackageVersionsStatusRequest::default();
        request.add_version_revision(version.clone(), first.clone()).unwrap();

        let err = request.add_version_revision(version.clone(), second).unwrap_err();
        let is_duplicate = matches!(err, Error::DuplicateKey { field: "versionRevisions", .. });
        prop_assert!(is_duplicate);

        let revisions = request.version_revisions.unwrap_or_default();
        prop_assert_eq!(revisions.len(), 1);
        prop_assert_eq!(revisions.get(&version), Some(&first));
    }

    /// Distinct keys all land in the map.
    #[test]
    fn distinct_version_revisions_accumulate(
        entries in prop::collection::btree_map(version_strategy(), "[A-Za-z0-9]{1,20}", 0..8),
    ) {
        let mut request = UpdatePackageVersionsStatusRequest::default();
        for (version, revision) in &entries {
            request.add_version_revision(version.clone(), revision.clone()).unwrap();
        }
        prop_assert_eq!(request.version_revisions.unwrap_or_default(), entries);
    }

    /// Every status survives the wire string and serde.
    #[test]
    fn status_wire_round_trip(status in prop::sample::select(PackageVersionStatus::ALL)) {
        prop_assert_eq!(status.as_str().parse::<PackageVersionStatus>().unwrap(), status);
        let json = serde_json::to_string(&status).unwrap();
        prop_assert_eq!(serde_json::from_str::<PackageVersionStatus>(&json).unwrap(), status);
    }

    /// Strings outside the wire set never parse.
    #[test]
    fn unknown_format_is_rejected(value in "[a-z]{1,12}") {
        prop_assume!(!PackageFormat::WIRE_VALUES.contains(&value.as_str()));
        prop_assert!(value.parse::<PackageFormat>().is_err());
    }

    /// Serialization never emits absent fields.
    #[test]
    fn serialization_omits_absent(request in copy_request_strategy()) {
        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();
        prop_assert_eq!(object.contains_key("domain"), request.domain.is_some());
        prop_assert_eq!(object.contains_key("versions"), request.versions.is_some());
        prop_assert!(!object.contains_key("versionRevisions"));
    }

    /// Generated domain names satisfy the domain constraint.
    #[test]
    fn generated_domains_are_valid(domain in domain_strategy()) {
        prop_assert!(constraints::DOMAIN_NAME.matches(&domain));
    }
}

#[test]
fn test_default_equals_default() {
    let a = CopyPackageVersionsRequest::default();
    let b = CopyPackageVersionsRequest::default();
    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}
