//! Stored DNS resource records
//!
//! Records are kept in wire form: the owner name as text, the record data
//! (RDATA) as the exact bytes a DNS server would put on the wire. The typed
//! constructors below build RDATA for the record types the Direct directory
//! service publishes (A, MX, CERT).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

use crate::error::{ModelError, Result};
use crate::types::base64_bytes;

/// Numeric resource record types (RFC 1035, RFC 3596, RFC 4398)
pub mod rtype {
    pub const A: u16 = 1;
    pub const NS: u16 = 2;
    pub const CNAME: u16 = 5;
    pub const SOA: u16 = 6;
    pub const MX: u16 = 15;
    pub const TXT: u16 = 16;
    pub const AAAA: u16 = 28;
    pub const SRV: u16 = 33;
    pub const CERT: u16 = 37;

    /// Mnemonic for a known type
    pub fn name(record_type: u16) -> Option<&'static str> {
        Some(match record_type {
            A => "A",
            NS => "NS",
            CNAME => "CNAME",
            SOA => "SOA",
            MX => "MX",
            TXT => "TXT",
            AAAA => "AAAA",
            SRV => "SRV",
            CERT => "CERT",
            _ => return None,
        })
    }
}

/// The Internet class
pub const CLASS_IN: u16 = 1;

/// CERT record certificate types (RFC 4398 §2.1)
pub mod cert_type {
    /// X.509 as in PKIX
    pub const PKIX: u16 = 1;
    /// URL of an X.509 data object
    pub const IPKIX: u16 = 4;
}

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 255;

/// A stored DNS resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default)]
    pub id: i64,

    /// Fully qualified owner name with trailing dot
    pub name: String,

    /// Numeric record type, see [`rtype`]
    pub record_type: u16,

    #[serde(default = "default_class")]
    pub dclass: u16,

    pub ttl: u32,

    /// RDATA in wire format
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,

    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,
}

fn default_class() -> u16 {
    CLASS_IN
}

impl DnsRecord {
    /// Create a record from raw RDATA
    pub fn new(name: &str, record_type: u16, ttl: u32, data: Vec<u8>) -> Result<Self> {
        Ok(Self {
            id: 0,
            name: normalize_name(name)?,
            record_type,
            dclass: CLASS_IN,
            ttl,
            data,
            create_time: Utc::now(),
        })
    }

    /// IPv4 address record
    pub fn a(name: &str, ttl: u32, address: Ipv4Addr) -> Result<Self> {
        Self::new(name, rtype::A, ttl, address.octets().to_vec())
    }

    /// Mail exchanger record
    pub fn mx(name: &str, ttl: u32, preference: u16, exchange: &str) -> Result<Self> {
        let mut data = preference.to_be_bytes().to_vec();
        data.extend(encode_name(exchange)?);
        Self::new(name, rtype::MX, ttl, data)
    }

    /// Certificate record carrying a DER certificate (RFC 4398)
    pub fn cert(
        name: &str,
        ttl: u32,
        certificate_type: u16,
        key_tag: u16,
        algorithm: u8,
        certificate: &[u8],
    ) -> Result<Self> {
        if certificate.is_empty() {
            return Err(ModelError::InvalidRecord("CERT record needs certificate bytes".into()));
        }
        let mut data = Vec::with_capacity(5 + certificate.len());
        data.extend_from_slice(&certificate_type.to_be_bytes());
        data.extend_from_slice(&key_tag.to_be_bytes());
        data.push(algorithm);
        data.extend_from_slice(certificate);
        Self::new(name, rtype::CERT, ttl, data)
    }

    pub fn type_name(&self) -> Option<&'static str> {
        rtype::name(self.record_type)
    }

    /// Whether another record has the same name, type, class and data
    pub fn same_record(&self, other: &DnsRecord) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.record_type == other.record_type
            && self.dclass == other.dclass
            && self.data == other.data
    }

    /// Decode the address of an A record
    pub fn as_ipv4(&self) -> Option<Ipv4Addr> {
        if self.record_type != rtype::A {
            return None;
        }
        let octets: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }
}

/// Lowercase a name and make it fully qualified
pub fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".into(),
        });
    }
    let mut normalized = trimmed.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    // Validate by encoding; the bytes themselves are not needed here.
    encode_name(&normalized)?;
    Ok(normalized)
}

/// Encode a domain name in uncompressed wire format (RFC 1035 §3.1)
pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    let invalid = |reason: &str| ModelError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let body = name.strip_suffix('.').unwrap_or(name);
    let mut wire = Vec::with_capacity(body.len() + 2);

    if !body.is_empty() {
        for label in body.split('.') {
            if label.is_empty() {
                return Err(invalid("empty label"));
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(invalid("label longer than 63 octets"));
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(label.as_bytes());
        }
    }
    wire.push(0);

    if wire.len() > MAX_NAME_LEN {
        return Err(invalid("name longer than 255 octets"));
    }
    Ok(wire)
}
