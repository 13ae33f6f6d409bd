//! Direct Configuration Service
//!
//! REST registry for the configuration a Direct-protocol deployment needs:
//! trust anchors, mail domains, DNS records, certificate policies and
//! free-form settings. Every resource follows the same contract:
//! - `PUT` adds (201, or 409 when the natural key exists)
//! - `GET` lists or fetches (404 for an absent key)
//! - `DELETE` removes (200)
//! - any repository fault surfaces as 500
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `PUT /anchor`, `GET /anchor`, `GET /anchor/{owner}`
//! - `DELETE /anchor/ids/{ids}`, `DELETE /anchor/{owner}`
//! - `PUT|GET /certpolicy`, `GET|DELETE /certpolicy/{name}`
//! - `PUT|GET /certpolicy/groups`, `GET|DELETE /certpolicy/groups/{name}`
//! - `POST /certpolicy/groups/uses/{group}/addPolicy|removePolicy`
//! - `GET /certpolicy/groups/domain/{domain}`
//! - `POST|DELETE /certpolicy/groups/domain/{group}/{domain}`
//! - `PUT|GET /dns`, `GET|POST /dns/{id}`, `DELETE /dns/{ids}`
//! - `PUT|GET|POST /domain`, `GET|DELETE /domain/{domainName}`
//! - `GET /setting`, `GET|DELETE /setting/{name}`, `PUT|POST /setting/{name}/{value}`

pub mod api;
pub mod config;
pub mod storage;

pub use api::create_router;
pub use api::error::ApiError;
pub use api::handlers::AppState;
pub use config::{ConfigError, ServiceConfig};
pub use storage::{ConfigStore, MemoryStore, StorageError};
#[cfg(feature = "postgres")]
pub use storage::PostgresStore;
