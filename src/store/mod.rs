//! Serialized store
//!
//! A single worker thread owns the map; handles send it requests over a
//! channel and wait for the reply. The map itself is never shared.

mod handle;
mod memory;
mod request;
mod worker;

pub use handle::SerialStore;
pub use memory::{MemoryStore, StoreMap};
pub use request::StoreStats;
