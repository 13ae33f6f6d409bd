//! Storage abstraction for the configuration registry
//!
//! Every resource handler talks to a single [`ConfigStore`] trait object, so
//! the backend can be swapped without touching the API layer:
//! - [`MemoryStore`]: default, process-local, lost on restart
//! - `PostgresStore`: persistent, behind the `postgres` feature
//!
//! Backends assign numeric ids on insert and enforce uniqueness of each
//! entity's natural key. A failed call must leave the store unchanged.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use async_trait::async_trait;
use direct_config_core::{
    Anchor, CertPolicy, CertPolicyGroup, CertPolicyGroupUse, DnsRecord, Domain, EntityStatus,
    Setting,
};
use std::fmt::Debug;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Optional filters for anchor lookups by owner
#[derive(Debug, Clone, Default)]
pub struct AnchorFilter {
    pub incoming: Option<bool>,
    pub outgoing: Option<bool>,
    pub thumbprint: Option<String>,
}

impl AnchorFilter {
    pub fn matches(&self, anchor: &Anchor) -> bool {
        self.incoming.is_none_or(|v| anchor.incoming == v)
            && self.outgoing.is_none_or(|v| anchor.outgoing == v)
            && self
                .thumbprint
                .as_deref()
                .is_none_or(|t| anchor.thumbprint.eq_ignore_ascii_case(t))
    }
}

/// Optional filters for DNS record listings
#[derive(Debug, Clone, Default)]
pub struct DnsFilter {
    pub record_type: Option<u16>,
    pub name: Option<String>,
}

impl DnsFilter {
    pub fn matches(&self, record: &DnsRecord) -> bool {
        self.record_type.is_none_or(|t| record.record_type == t)
            && self.name.as_deref().is_none_or(|n| {
                record.name.trim_end_matches('.').eq_ignore_ascii_case(n.trim_end_matches('.'))
            })
    }
}

/// Optional filters for domain listings
#[derive(Debug, Clone, Default)]
pub struct DomainFilter {
    /// Case-insensitive substring of the domain name
    pub name_contains: Option<String>,
    pub status: Option<EntityStatus>,
}

impl DomainFilter {
    pub fn matches(&self, domain: &Domain) -> bool {
        self.status.is_none_or(|s| domain.status == s)
            && self.name_contains.as_deref().is_none_or(|n| {
                domain
                    .domain_name
                    .to_ascii_lowercase()
                    .contains(&n.to_ascii_lowercase())
            })
    }
}

/// Repository trait for registry state
///
/// Implementations must be thread-safe and support concurrent access.
/// Lists are returned in insertion (id) order.
#[async_trait]
pub trait ConfigStore: Send + Sync + Debug {
    // =========================================================================
    // Anchors
    // =========================================================================

    /// Store an anchor; fails with `AlreadyExists` for a known owner/thumbprint
    async fn add_anchor(&self, anchor: Anchor) -> Result<Anchor, StorageError>;

    async fn list_anchors(&self) -> Result<Vec<Anchor>, StorageError>;

    async fn list_anchors_for_owner(
        &self,
        owner: &str,
        filter: &AnchorFilter,
    ) -> Result<Vec<Anchor>, StorageError>;

    /// Delete anchors by id, returning how many were removed
    async fn delete_anchors(&self, ids: &[i64]) -> Result<u64, StorageError>;

    async fn delete_anchors_for_owner(&self, owner: &str) -> Result<u64, StorageError>;

    // =========================================================================
    // Certificate Policies
    // =========================================================================

    async fn add_policy(&self, policy: CertPolicy) -> Result<CertPolicy, StorageError>;

    async fn list_policies(&self) -> Result<Vec<CertPolicy>, StorageError>;

    async fn get_policy(&self, name: &str) -> Result<Option<CertPolicy>, StorageError>;

    /// Delete a policy and every group use that references it
    async fn delete_policy(&self, name: &str) -> Result<bool, StorageError>;

    // =========================================================================
    // Certificate Policy Groups
    // =========================================================================

    /// Store a group; every use must reference an already stored policy
    async fn add_policy_group(&self, group: CertPolicyGroup)
        -> Result<CertPolicyGroup, StorageError>;

    async fn list_policy_groups(&self) -> Result<Vec<CertPolicyGroup>, StorageError>;

    async fn get_policy_group(&self, name: &str) -> Result<Option<CertPolicyGroup>, StorageError>;

    async fn delete_policy_group(&self, name: &str) -> Result<bool, StorageError>;

    /// Append a use to a group; `NotFound` if the group does not exist
    async fn add_policy_use(
        &self,
        group_name: &str,
        policy_use: CertPolicyGroupUse,
    ) -> Result<(), StorageError>;

    /// Remove the first matching use; `NotFound` if the group does not exist
    async fn remove_policy_use(
        &self,
        group_name: &str,
        policy_use: &CertPolicyGroupUse,
    ) -> Result<bool, StorageError>;

    async fn associate_group_domain(
        &self,
        group_name: &str,
        domain_name: &str,
    ) -> Result<(), StorageError>;

    async fn disassociate_group_domain(
        &self,
        group_name: &str,
        domain_name: &str,
    ) -> Result<bool, StorageError>;

    async fn list_groups_for_domain(
        &self,
        domain_name: &str,
    ) -> Result<Vec<CertPolicyGroup>, StorageError>;

    // =========================================================================
    // DNS Records
    // =========================================================================

    async fn add_dns_record(&self, record: DnsRecord) -> Result<DnsRecord, StorageError>;

    async fn list_dns_records(&self, filter: &DnsFilter) -> Result<Vec<DnsRecord>, StorageError>;

    async fn get_dns_record(&self, id: i64) -> Result<Option<DnsRecord>, StorageError>;

    /// Replace the record with the given id, keeping its id and create time
    async fn update_dns_record(
        &self,
        id: i64,
        record: DnsRecord,
    ) -> Result<Option<DnsRecord>, StorageError>;

    async fn delete_dns_records(&self, ids: &[i64]) -> Result<u64, StorageError>;

    // =========================================================================
    // Domains
    // =========================================================================

    async fn add_domain(&self, domain: Domain) -> Result<Domain, StorageError>;

    async fn get_domain(&self, name: &str) -> Result<Option<Domain>, StorageError>;

    async fn list_domains(&self, filter: &DomainFilter) -> Result<Vec<Domain>, StorageError>;

    /// Replace the domain with the same name; `None` if it does not exist
    async fn update_domain(&self, domain: Domain) -> Result<Option<Domain>, StorageError>;

    /// Delete a domain together with its policy group associations
    async fn delete_domain(&self, name: &str) -> Result<bool, StorageError>;

    // =========================================================================
    // Settings
    // =========================================================================

    async fn add_setting(&self, name: &str, value: &str) -> Result<Setting, StorageError>;

    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError>;

    async fn get_setting(&self, name: &str) -> Result<Option<Setting>, StorageError>;

    async fn update_setting(&self, name: &str, value: &str)
        -> Result<Option<Setting>, StorageError>;

    async fn delete_setting(&self, name: &str) -> Result<bool, StorageError>;
}
