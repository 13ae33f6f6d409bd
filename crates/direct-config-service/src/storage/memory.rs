//! In-memory storage backend
//!
//! Default storage implementation using insertion-ordered vectors.
//! Suitable for development, tests and single-instance deployments.
//! Data is lost on restart.
//!
//! Lock order: policies, groups, domains, group_domains.

use async_trait::async_trait;
use chrono::Utc;
use direct_config_core::{
    Anchor, CertPolicy, CertPolicyGroup, CertPolicyGroupUse, DnsRecord, Domain, Setting,
};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use super::{AnchorFilter, ConfigStore, DnsFilter, DomainFilter, StorageError};

/// In-memory config store implementation
#[derive(Debug)]
pub struct MemoryStore {
    next_id: AtomicI64,
    anchors: RwLock<Vec<Anchor>>,
    policies: RwLock<Vec<CertPolicy>>,
    groups: RwLock<Vec<CertPolicyGroup>>,
    /// (group name, domain name) pairs
    group_domains: RwLock<Vec<(String, String)>>,
    dns_records: RwLock<Vec<DnsRecord>>,
    domains: RwLock<Vec<Domain>>,
    settings: RwLock<Vec<Setting>>,
}

impl MemoryStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            anchors: RwLock::new(Vec::new()),
            policies: RwLock::new(Vec::new()),
            groups: RwLock::new(Vec::new()),
            group_domains: RwLock::new(Vec::new()),
            dns_records: RwLock::new(Vec::new()),
            domains: RwLock::new(Vec::new()),
            settings: RwLock::new(Vec::new()),
        }
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StorageError> {
    lock.read()
        .map_err(|_| StorageError::Database("store lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StorageError> {
    lock.write()
        .map_err(|_| StorageError::Database("store lock poisoned".into()))
}

/// Replace each use's policy with the stored one, by name
fn resolve_uses(
    policies: &[CertPolicy],
    uses: Vec<CertPolicyGroupUse>,
) -> Result<Vec<CertPolicyGroupUse>, StorageError> {
    uses.into_iter()
        .map(|mut u| -> Result<CertPolicyGroupUse, StorageError> {
            let stored = policies
                .iter()
                .find(|p| p.policy_name.eq_ignore_ascii_case(&u.policy.policy_name))
                .ok_or_else(|| StorageError::NotFound(format!("policy {}", u.policy.policy_name)))?;
            u.policy = stored.clone();
            Ok(u)
        })
        .collect()
}

#[async_trait]
impl ConfigStore for MemoryStore {
    // =========================================================================
    // Anchors
    // =========================================================================

    async fn add_anchor(&self, mut anchor: Anchor) -> Result<Anchor, StorageError> {
        let mut anchors = write(&self.anchors)?;
        anchor.refresh_thumbprint();
        if anchors.iter().any(|a| a.same_key(&anchor)) {
            return Err(StorageError::AlreadyExists(format!(
                "anchor {} for {}",
                anchor.thumbprint, anchor.owner
            )));
        }
        anchor.id = self.allocate_id();
        info!(id = anchor.id, owner = %anchor.owner, thumbprint = %anchor.thumbprint, "Adding anchor");
        anchors.push(anchor.clone());
        Ok(anchor)
    }

    async fn list_anchors(&self) -> Result<Vec<Anchor>, StorageError> {
        Ok(read(&self.anchors)?.clone())
    }

    async fn list_anchors_for_owner(
        &self,
        owner: &str,
        filter: &AnchorFilter,
    ) -> Result<Vec<Anchor>, StorageError> {
        let anchors = read(&self.anchors)?;
        Ok(anchors
            .iter()
            .filter(|a| a.owner.eq_ignore_ascii_case(owner) && filter.matches(a))
            .cloned()
            .collect())
    }

    async fn delete_anchors(&self, ids: &[i64]) -> Result<u64, StorageError> {
        let mut anchors = write(&self.anchors)?;
        let before = anchors.len();
        anchors.retain(|a| !ids.contains(&a.id));
        let removed = (before - anchors.len()) as u64;
        info!(ids = ?ids, removed, "Deleted anchors");
        Ok(removed)
    }

    async fn delete_anchors_for_owner(&self, owner: &str) -> Result<u64, StorageError> {
        let mut anchors = write(&self.anchors)?;
        let before = anchors.len();
        anchors.retain(|a| !a.owner.eq_ignore_ascii_case(owner));
        let removed = (before - anchors.len()) as u64;
        info!(owner = %owner, removed, "Deleted anchors for owner");
        Ok(removed)
    }

    // =========================================================================
    // Certificate Policies
    // =========================================================================

    async fn add_policy(&self, mut policy: CertPolicy) -> Result<CertPolicy, StorageError> {
        let mut policies = write(&self.policies)?;
        if policies
            .iter()
            .any(|p| p.policy_name.eq_ignore_ascii_case(&policy.policy_name))
        {
            return Err(StorageError::AlreadyExists(format!("policy {}", policy.policy_name)));
        }
        policy.id = self.allocate_id();
        info!(id = policy.id, name = %policy.policy_name, lexicon = %policy.lexicon, "Adding policy");
        policies.push(policy.clone());
        Ok(policy)
    }

    async fn list_policies(&self) -> Result<Vec<CertPolicy>, StorageError> {
        Ok(read(&self.policies)?.clone())
    }

    async fn get_policy(&self, name: &str) -> Result<Option<CertPolicy>, StorageError> {
        let policies = read(&self.policies)?;
        Ok(policies
            .iter()
            .find(|p| p.policy_name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn delete_policy(&self, name: &str) -> Result<bool, StorageError> {
        let mut policies = write(&self.policies)?;
        let mut groups = write(&self.groups)?;

        let before = policies.len();
        policies.retain(|p| !p.policy_name.eq_ignore_ascii_case(name));
        let removed = policies.len() != before;

        if removed {
            for group in groups.iter_mut() {
                group
                    .policies
                    .retain(|u| !u.policy.policy_name.eq_ignore_ascii_case(name));
            }
            info!(name = %name, "Deleted policy");
        }
        Ok(removed)
    }

    // =========================================================================
    // Certificate Policy Groups
    // =========================================================================

    async fn add_policy_group(
        &self,
        mut group: CertPolicyGroup,
    ) -> Result<CertPolicyGroup, StorageError> {
        let policies = read(&self.policies)?;
        let mut groups = write(&self.groups)?;

        if groups
            .iter()
            .any(|g| g.policy_group_name.eq_ignore_ascii_case(&group.policy_group_name))
        {
            return Err(StorageError::AlreadyExists(format!(
                "policy group {}",
                group.policy_group_name
            )));
        }

        group.policies = resolve_uses(&policies, group.policies)?;
        group.id = self.allocate_id();
        info!(
            id = group.id,
            name = %group.policy_group_name,
            uses = group.policies.len(),
            "Adding policy group"
        );
        groups.push(group.clone());
        Ok(group)
    }

    async fn list_policy_groups(&self) -> Result<Vec<CertPolicyGroup>, StorageError> {
        Ok(read(&self.groups)?.clone())
    }

    async fn get_policy_group(&self, name: &str) -> Result<Option<CertPolicyGroup>, StorageError> {
        let groups = read(&self.groups)?;
        Ok(groups
            .iter()
            .find(|g| g.policy_group_name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn delete_policy_group(&self, name: &str) -> Result<bool, StorageError> {
        let mut groups = write(&self.groups)?;
        let mut group_domains = write(&self.group_domains)?;

        let before = groups.len();
        groups.retain(|g| !g.policy_group_name.eq_ignore_ascii_case(name));
        let removed = groups.len() != before;

        if removed {
            group_domains.retain(|(g, _)| !g.eq_ignore_ascii_case(name));
            info!(name = %name, "Deleted policy group");
        }
        Ok(removed)
    }

    async fn add_policy_use(
        &self,
        group_name: &str,
        policy_use: CertPolicyGroupUse,
    ) -> Result<(), StorageError> {
        let policies = read(&self.policies)?;
        let mut groups = write(&self.groups)?;

        let group = groups
            .iter_mut()
            .find(|g| g.policy_group_name.eq_ignore_ascii_case(group_name))
            .ok_or_else(|| StorageError::NotFound(format!("policy group {}", group_name)))?;

        let mut resolved = resolve_uses(&policies, vec![policy_use])?;
        if let Some(policy_use) = resolved.pop() {
            info!(
                group = %group_name,
                policy = %policy_use.policy.policy_name,
                usage = %policy_use.usage,
                "Adding policy to group"
            );
            group.policies.push(policy_use);
        }
        Ok(())
    }

    async fn remove_policy_use(
        &self,
        group_name: &str,
        policy_use: &CertPolicyGroupUse,
    ) -> Result<bool, StorageError> {
        let mut groups = write(&self.groups)?;

        let group = groups
            .iter_mut()
            .find(|g| g.policy_group_name.eq_ignore_ascii_case(group_name))
            .ok_or_else(|| StorageError::NotFound(format!("policy group {}", group_name)))?;

        match group.policies.iter().position(|u| u.matches(policy_use)) {
            Some(index) => {
                group.policies.remove(index);
                info!(
                    group = %group_name,
                    policy = %policy_use.policy.policy_name,
                    "Removed policy from group"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn associate_group_domain(
        &self,
        group_name: &str,
        domain_name: &str,
    ) -> Result<(), StorageError> {
        let groups = read(&self.groups)?;
        let domains = read(&self.domains)?;
        let mut group_domains = write(&self.group_domains)?;

        let group = groups
            .iter()
            .find(|g| g.policy_group_name.eq_ignore_ascii_case(group_name))
            .ok_or_else(|| StorageError::NotFound(format!("policy group {}", group_name)))?;
        let domain = domains
            .iter()
            .find(|d| d.is_named(domain_name))
            .ok_or_else(|| StorageError::NotFound(format!("domain {}", domain_name)))?;

        let exists = group_domains.iter().any(|(g, d)| {
            g.eq_ignore_ascii_case(&group.policy_group_name) && domain.is_named(d)
        });
        if exists {
            return Err(StorageError::AlreadyExists(format!(
                "association {} -> {}",
                group_name, domain_name
            )));
        }

        group_domains.push((group.policy_group_name.clone(), domain.domain_name.clone()));
        info!(group = %group_name, domain = %domain_name, "Associated policy group with domain");
        Ok(())
    }

    async fn disassociate_group_domain(
        &self,
        group_name: &str,
        domain_name: &str,
    ) -> Result<bool, StorageError> {
        let mut group_domains = write(&self.group_domains)?;
        let before = group_domains.len();
        group_domains.retain(|(g, d)| {
            !(g.eq_ignore_ascii_case(group_name) && d.eq_ignore_ascii_case(domain_name))
        });
        Ok(group_domains.len() != before)
    }

    async fn list_groups_for_domain(
        &self,
        domain_name: &str,
    ) -> Result<Vec<CertPolicyGroup>, StorageError> {
        let groups = read(&self.groups)?;
        let group_domains = read(&self.group_domains)?;

        Ok(groups
            .iter()
            .filter(|g| {
                group_domains.iter().any(|(gn, dn)| {
                    gn.eq_ignore_ascii_case(&g.policy_group_name)
                        && dn.eq_ignore_ascii_case(domain_name)
                })
            })
            .cloned()
            .collect())
    }

    // =========================================================================
    // DNS Records
    // =========================================================================

    async fn add_dns_record(&self, mut record: DnsRecord) -> Result<DnsRecord, StorageError> {
        let mut records = write(&self.dns_records)?;
        if records.iter().any(|r| r.same_record(&record)) {
            return Err(StorageError::AlreadyExists(format!(
                "{} record {}",
                record.record_type, record.name
            )));
        }
        record.id = self.allocate_id();
        info!(id = record.id, name = %record.name, record_type = record.record_type, "Adding DNS record");
        records.push(record.clone());
        Ok(record)
    }

    async fn list_dns_records(&self, filter: &DnsFilter) -> Result<Vec<DnsRecord>, StorageError> {
        let records = read(&self.dns_records)?;
        Ok(records.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    async fn get_dns_record(&self, id: i64) -> Result<Option<DnsRecord>, StorageError> {
        let records = read(&self.dns_records)?;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn update_dns_record(
        &self,
        id: i64,
        mut record: DnsRecord,
    ) -> Result<Option<DnsRecord>, StorageError> {
        let mut records = write(&self.dns_records)?;
        let Some(index) = records.iter().position(|r| r.id == id) else {
            return Ok(None);
        };
        if records.iter().any(|r| r.id != id && r.same_record(&record)) {
            return Err(StorageError::AlreadyExists(format!(
                "{} record {}",
                record.record_type, record.name
            )));
        }
        record.id = id;
        record.create_time = records[index].create_time;
        records[index] = record.clone();
        info!(id, name = %record.name, "Updated DNS record");
        Ok(Some(record))
    }

    async fn delete_dns_records(&self, ids: &[i64]) -> Result<u64, StorageError> {
        let mut records = write(&self.dns_records)?;
        let before = records.len();
        records.retain(|r| !ids.contains(&r.id));
        let removed = (before - records.len()) as u64;
        info!(ids = ?ids, removed, "Deleted DNS records");
        Ok(removed)
    }

    // =========================================================================
    // Domains
    // =========================================================================

    async fn add_domain(&self, mut domain: Domain) -> Result<Domain, StorageError> {
        let mut domains = write(&self.domains)?;
        if domains.iter().any(|d| d.is_named(&domain.domain_name)) {
            return Err(StorageError::AlreadyExists(format!("domain {}", domain.domain_name)));
        }
        let now = Utc::now();
        domain.id = self.allocate_id();
        domain.create_time = now;
        domain.update_time = now;
        info!(id = domain.id, name = %domain.domain_name, "Adding domain");
        domains.push(domain.clone());
        Ok(domain)
    }

    async fn get_domain(&self, name: &str) -> Result<Option<Domain>, StorageError> {
        let domains = read(&self.domains)?;
        Ok(domains.iter().find(|d| d.is_named(name)).cloned())
    }

    async fn list_domains(&self, filter: &DomainFilter) -> Result<Vec<Domain>, StorageError> {
        let domains = read(&self.domains)?;
        Ok(domains.iter().filter(|d| filter.matches(d)).cloned().collect())
    }

    async fn update_domain(&self, mut domain: Domain) -> Result<Option<Domain>, StorageError> {
        let mut domains = write(&self.domains)?;
        let Some(existing) = domains.iter_mut().find(|d| d.is_named(&domain.domain_name)) else {
            return Ok(None);
        };
        domain.id = existing.id;
        domain.domain_name = existing.domain_name.clone();
        domain.create_time = existing.create_time;
        domain.update_time = Utc::now();
        *existing = domain.clone();
        info!(id = domain.id, name = %domain.domain_name, "Updated domain");
        Ok(Some(domain))
    }

    async fn delete_domain(&self, name: &str) -> Result<bool, StorageError> {
        let mut domains = write(&self.domains)?;
        let mut group_domains = write(&self.group_domains)?;

        let before = domains.len();
        domains.retain(|d| !d.is_named(name));
        let removed = domains.len() != before;

        if removed {
            group_domains.retain(|(_, d)| !d.eq_ignore_ascii_case(name));
            info!(name = %name, "Deleted domain");
        }
        Ok(removed)
    }

    // =========================================================================
    // Settings
    // =========================================================================

    async fn add_setting(&self, name: &str, value: &str) -> Result<Setting, StorageError> {
        let mut settings = write(&self.settings)?;
        if settings.iter().any(|s| s.is_named(name)) {
            return Err(StorageError::AlreadyExists(format!("setting {}", name)));
        }
        let mut setting = Setting::new(name, value);
        setting.id = self.allocate_id();
        info!(id = setting.id, name = %name, "Adding setting");
        settings.push(setting.clone());
        Ok(setting)
    }

    async fn list_settings(&self) -> Result<Vec<Setting>, StorageError> {
        Ok(read(&self.settings)?.clone())
    }

    async fn get_setting(&self, name: &str) -> Result<Option<Setting>, StorageError> {
        let settings = read(&self.settings)?;
        Ok(settings.iter().find(|s| s.is_named(name)).cloned())
    }

    async fn update_setting(
        &self,
        name: &str,
        value: &str,
    ) -> Result<Option<Setting>, StorageError> {
        let mut settings = write(&self.settings)?;
        let Some(existing) = settings.iter_mut().find(|s| s.is_named(name)) else {
            return Ok(None);
        };
        existing.value = value.to_string();
        existing.update_time = Utc::now();
        info!(name = %name, "Updated setting");
        Ok(Some(existing.clone()))
    }

    async fn delete_setting(&self, name: &str) -> Result<bool, StorageError> {
        let mut settings = write(&self.settings)?;
        let before = settings.len();
        settings.retain(|s| !s.is_named(name));
        let removed = settings.len() != before;
        if removed {
            info!(name = %name, "Deleted setting");
        }
        Ok(removed)
    }
}
