//! serialstore - A thread-safe key-value container without exposed locks
//!
//! One worker thread owns the map. Every operation is a request sent over a
//! channel and answered before the next request is taken, so all callers see
//! the same total order of operations:
//! - `store` holds the map, the request protocol, the worker and the handle
//! - `config` describes how a store is started
//! - `error` lists the ways an operation can fail

pub mod config;
pub mod error;
pub mod store;

/// Re-export commonly used types
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use store::{SerialStore, StoreMap, StoreStats};
