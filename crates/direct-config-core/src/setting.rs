//! Name/value settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configuration setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    #[serde(default)]
    pub id: i64,

    pub name: String,

    pub value: String,

    #[serde(default = "Utc::now")]
    pub create_time: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    pub update_time: DateTime<Utc>,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            value: value.into(),
            create_time: now,
            update_time: now,
        }
    }

    /// Setting names compare case-insensitively
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
