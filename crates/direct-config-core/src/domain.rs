//! Mail domains and their addresses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::EntityStatus;

/// An address registered under a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub email_address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Delivery endpoint (e.g. an XD or SMTP URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_type: Option<String>,

    #[serde(default)]
    pub status: EntityStatus,
}

impl Address {
    pub fn new(email_address: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
            display_name: None,
            endpoint: None,
            address_type: None,
            status: EntityStatus::New,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// A registered mail domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub id: i64,

    pub domain_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postmaster_address: Option<Address>,

    #[serde(default)]
    pub addresses: Vec<Address>,

    #[serde(default)]
    pub status: EntityStatus,

    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub update_time: DateTime<Utc>,
}

impl Domain {
    pub fn new(domain_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            domain_name: domain_name.into(),
            postmaster_address: None,
            addresses: Vec::new(),
            status: EntityStatus::New,
            create_time: now,
            update_time: now,
        }
    }

    pub fn with_postmaster(mut self, address: Address) -> Self {
        self.postmaster_address = Some(address);
        self
    }

    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = status;
        self
    }

    /// Case-insensitive comparison against a domain name
    pub fn is_named(&self, name: &str) -> bool {
        self.domain_name.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_json_shape() {
        let domain = Domain::new("test.com")
            .with_postmaster(Address::new("postmaster@test.com").with_display_name("Postmaster"))
            .with_status(EntityStatus::Enabled);

        let json = serde_json::to_value(&domain).unwrap();
        assert_eq!(json["domain_name"], "test.com");
        assert_eq!(json["postmaster_address"]["email_address"], "postmaster@test.com");
        assert_eq!(json["status"], "ENABLED");
        assert!(json["addresses"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_minimal_domain_body() {
        let domain: Domain = serde_json::from_str(r#"{"domain_name":"test.com"}"#).unwrap();
        assert!(domain.postmaster_address.is_none());
        assert_eq!(domain.status, EntityStatus::New);
        assert!(domain.is_named("TEST.com"));
    }
}
