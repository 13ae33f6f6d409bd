//! # Direct Config Core
//!
//! Entity model for the Direct configuration registry: the records a
//! Direct-protocol deployment keeps about who it trusts and how it is
//! reached.
//!
//! ## Entities
//!
//! - **Anchor**: trust-anchor certificate bound to an owner (domain or address)
//! - **CertPolicy** / **CertPolicyGroup**: named certificate-validation policies
//! - **DnsRecord**: stored DNS resource records (A, MX, CERT, ...)
//! - **Domain**: a registered mail domain and its postmaster contact
//! - **Setting**: a name/value configuration pair
//!
//! Every entity carries a numeric `id` assigned by the store. An `id` of `0`
//! means the record has not been persisted yet.

pub mod anchor;
pub mod certpolicy;
pub mod dns;
pub mod domain;
pub mod error;
pub mod setting;
pub mod thumbprint;
pub mod types;

pub use anchor::Anchor;
pub use certpolicy::{CertPolicy, CertPolicyGroup, CertPolicyGroupUse, CertPolicyUse, PolicyLexicon};
pub use dns::DnsRecord;
pub use domain::{Address, Domain};
pub use error::{ModelError, Result};
pub use setting::Setting;
pub use thumbprint::Thumbprint;
pub use types::EntityStatus;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
