//! Common types shared by the configuration entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Lifecycle status of a stored entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityStatus {
    /// Created but not yet activated
    #[default]
    New,
    /// In use
    Enabled,
    /// Kept on record but ignored
    Disabled,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::New => "NEW",
            EntityStatus::Enabled => "ENABLED",
            EntityStatus::Disabled => "DISABLED",
        }
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NEW" => Ok(EntityStatus::New),
            "ENABLED" => Ok(EntityStatus::Enabled),
            "DISABLED" => Ok(EntityStatus::Disabled),
            _ => Err(ModelError::UnknownValue {
                kind: "entity status",
                value: s.to_string(),
            }),
        }
    }
}

/// Serde adapter for byte fields carried as standard base64 strings
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("enabled".parse::<EntityStatus>().unwrap(), EntityStatus::Enabled);
        assert_eq!("DISABLED".parse::<EntityStatus>().unwrap(), EntityStatus::Disabled);
        assert!("retired".parse::<EntityStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&EntityStatus::Enabled).unwrap();
        assert_eq!(json, "\"ENABLED\"");
    }
}
