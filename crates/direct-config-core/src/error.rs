//! Error types for the configuration model

use thiserror::Error;

/// Result type alias using ModelError
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building or interpreting model records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A DNS owner or target name is malformed
    #[error("Invalid DNS name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Record data does not fit the wire format of its type
    #[error("Invalid record data: {0}")]
    InvalidRecord(String),

    /// An enumerated value could not be parsed
    #[error("Unknown {kind} value: {value}")]
    UnknownValue { kind: &'static str, value: String },
}
