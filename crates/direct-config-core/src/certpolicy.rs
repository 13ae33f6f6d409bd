//! Certificate policies and policy groups
//!
//! A policy is an opaque expression (in one of the supported lexicons) that a
//! certificate must satisfy. Groups bundle policies together with how they are
//! used (trust validation or resolver selection) and in which direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::types::base64_bytes;

/// Language a policy expression is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyLexicon {
    Xml,
    JavaSer,
    SimpleTextV1,
}

impl PolicyLexicon {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyLexicon::Xml => "XML",
            PolicyLexicon::JavaSer => "JAVA_SER",
            PolicyLexicon::SimpleTextV1 => "SIMPLE_TEXT_V1",
        }
    }
}

impl fmt::Display for PolicyLexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyLexicon {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "XML" => Ok(PolicyLexicon::Xml),
            "JAVA_SER" => Ok(PolicyLexicon::JavaSer),
            "SIMPLE_TEXT_V1" => Ok(PolicyLexicon::SimpleTextV1),
            _ => Err(ModelError::UnknownValue {
                kind: "policy lexicon",
                value: s.to_string(),
            }),
        }
    }
}

/// What a policy is applied to within a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertPolicyUse {
    /// Anchor/chain validation
    Trust,
    /// Selecting certificates from private resolvers
    PrivateResolver,
    /// Selecting certificates from public resolvers
    PublicResolver,
}

impl CertPolicyUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            CertPolicyUse::Trust => "TRUST",
            CertPolicyUse::PrivateResolver => "PRIVATE_RESOLVER",
            CertPolicyUse::PublicResolver => "PUBLIC_RESOLVER",
        }
    }
}

impl fmt::Display for CertPolicyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertPolicyUse {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRUST" => Ok(CertPolicyUse::Trust),
            "PRIVATE_RESOLVER" => Ok(CertPolicyUse::PrivateResolver),
            "PUBLIC_RESOLVER" => Ok(CertPolicyUse::PublicResolver),
            _ => Err(ModelError::UnknownValue {
                kind: "policy use",
                value: s.to_string(),
            }),
        }
    }
}

/// A named certificate policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertPolicy {
    #[serde(default)]
    pub id: i64,

    pub policy_name: String,

    pub lexicon: PolicyLexicon,

    /// Raw policy expression
    #[serde(with = "base64_bytes")]
    pub policy_data: Vec<u8>,

    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,
}

impl CertPolicy {
    pub fn new(policy_name: impl Into<String>, lexicon: PolicyLexicon, policy_data: Vec<u8>) -> Self {
        Self {
            id: 0,
            policy_name: policy_name.into(),
            lexicon,
            policy_data,
            create_time: Utc::now(),
        }
    }
}

/// A policy's membership in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertPolicyGroupUse {
    pub policy: CertPolicy,
    pub usage: CertPolicyUse,
    #[serde(default)]
    pub incoming: bool,
    #[serde(default)]
    pub outgoing: bool,
}

impl CertPolicyGroupUse {
    pub fn new(policy: CertPolicy, usage: CertPolicyUse, incoming: bool, outgoing: bool) -> Self {
        Self {
            policy,
            usage,
            incoming,
            outgoing,
        }
    }

    /// Same policy applied the same way, regardless of stored ids
    pub fn matches(&self, other: &CertPolicyGroupUse) -> bool {
        self.policy.policy_name.eq_ignore_ascii_case(&other.policy.policy_name)
            && self.usage == other.usage
            && self.incoming == other.incoming
            && self.outgoing == other.outgoing
    }
}

/// A named, ordered collection of policy uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertPolicyGroup {
    #[serde(default)]
    pub id: i64,

    pub policy_group_name: String,

    #[serde(default)]
    pub policies: Vec<CertPolicyGroupUse>,

    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,
}

impl CertPolicyGroup {
    pub fn new(policy_group_name: impl Into<String>) -> Self {
        Self {
            id: 0,
            policy_group_name: policy_group_name.into(),
            policies: Vec::new(),
            create_time: Utc::now(),
        }
    }

    pub fn with_use(mut self, policy_use: CertPolicyGroupUse) -> Self {
        self.policies.push(policy_use);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&PolicyLexicon::SimpleTextV1).unwrap(),
            "\"SIMPLE_TEXT_V1\""
        );
        assert_eq!(
            serde_json::to_string(&CertPolicyUse::PrivateResolver).unwrap(),
            "\"PRIVATE_RESOLVER\""
        );
        assert_eq!("JAVA_SER".parse::<PolicyLexicon>().unwrap(), PolicyLexicon::JavaSer);
        assert!("YAML".parse::<PolicyLexicon>().is_err());
    }

    #[test]
    fn test_use_matching_ignores_ids() {
        let mut stored = CertPolicy::new("KeyUsage", PolicyLexicon::SimpleTextV1, b"1".to_vec());
        stored.id = 42;
        let requested = CertPolicy::new("keyusage", PolicyLexicon::SimpleTextV1, Vec::new());

        let a = CertPolicyGroupUse::new(stored, CertPolicyUse::Trust, true, false);
        let b = CertPolicyGroupUse::new(requested.clone(), CertPolicyUse::Trust, true, false);
        let c = CertPolicyGroupUse::new(requested, CertPolicyUse::Trust, true, true);

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn test_group_without_policies_deserializes() {
        let group: CertPolicyGroup =
            serde_json::from_str(r#"{"policy_group_name":"Group1"}"#).unwrap();
        assert!(group.policies.is_empty());
        assert_eq!(group.id, 0);
    }
}
