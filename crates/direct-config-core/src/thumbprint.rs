//! Certificate thumbprints
//!
//! A thumbprint is the SHA-1 digest of a certificate's DER encoding, rendered
//! as lowercase hex. Stores derive it from the certificate bytes; it is never
//! accepted from a client.

use sha1::{Digest, Sha1};
use std::fmt;

/// SHA-1 digest of a certificate's encoded bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Thumbprint([u8; 20]);

impl Thumbprint {
    /// Compute the thumbprint of DER-encoded certificate bytes
    pub fn of(certificate_data: &[u8]) -> Self {
        let digest = Sha1::digest(certificate_data);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex rendering, 40 characters
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Display for Thumbprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
