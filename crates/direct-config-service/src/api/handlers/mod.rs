//! API request handlers, one module per resource

pub mod anchor;
pub mod certpolicy;
pub mod dns;
pub mod domain;
pub mod setting;

use std::sync::Arc;

use crate::api::error::ApiError;
use crate::storage::ConfigStore;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Repository backing every resource
    pub store: Arc<dyn ConfigStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

/// Parse a comma-separated id list such as `3,7,12`
pub(crate) fn parse_ids(raw: &str) -> Result<Vec<i64>, ApiError> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid id '{}'", s)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(ApiError::BadRequest("No ids given".into()));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1,2, 3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_ids("42").unwrap(), vec![42]);
        assert!(parse_ids("1,x").is_err());
        assert!(parse_ids(",,").is_err());
    }
}
