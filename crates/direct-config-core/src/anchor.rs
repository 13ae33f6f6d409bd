//! Trust anchors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::thumbprint::Thumbprint;
use crate::types::{base64_bytes, EntityStatus};

/// A trust-anchor certificate bound to an owner
///
/// The owner is either a domain (`example.com`) or a single address
/// (`user@example.com`). Anchors with `incoming` set validate messages
/// received from peers; `outgoing` ones validate recipients we send to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Store-assigned identifier
    #[serde(default)]
    pub id: i64,

    /// Domain or address this anchor belongs to
    pub owner: String,

    /// SHA-1 hex digest of `certificate_data`
    #[serde(default)]
    pub thumbprint: String,

    /// DER-encoded certificate
    #[serde(with = "base64_bytes")]
    pub certificate_data: Vec<u8>,

    /// Identifier of the certificate record this anchor was imported from
    #[serde(default)]
    pub cert_id: i64,

    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_start_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: EntityStatus,

    #[serde(default)]
    pub incoming: bool,

    #[serde(default)]
    pub outgoing: bool,
}

impl Anchor {
    /// Create an unsaved anchor for the given owner and certificate
    pub fn new(owner: impl Into<String>, certificate_data: Vec<u8>) -> Self {
        let thumbprint = Thumbprint::of(&certificate_data).to_hex();
        Self {
            id: 0,
            owner: owner.into(),
            thumbprint,
            certificate_data,
            cert_id: 0,
            create_time: Utc::now(),
            valid_start_date: None,
            valid_end_date: None,
            status: EntityStatus::New,
            incoming: false,
            outgoing: false,
        }
    }

    pub fn with_incoming(mut self, incoming: bool) -> Self {
        self.incoming = incoming;
        self
    }

    pub fn with_outgoing(mut self, outgoing: bool) -> Self {
        self.outgoing = outgoing;
        self
    }

    pub fn with_status(mut self, status: EntityStatus) -> Self {
        self.status = status;
        self
    }

    /// Recompute the thumbprint from the certificate bytes
    ///
    /// Whatever thumbprint the record carried before is discarded.
    pub fn refresh_thumbprint(&mut self) {
        self.thumbprint = Thumbprint::of(&self.certificate_data).to_hex();
    }

    /// Whether two anchors describe the same owner/certificate pair
    pub fn same_key(&self, other: &Anchor) -> bool {
        self.owner.eq_ignore_ascii_case(&other.owner) && self.thumbprint == other.thumbprint
    }
}
