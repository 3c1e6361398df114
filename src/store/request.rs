//! Request messages sent to the store worker
//!
//! Each variant carries its own typed reply channel, so the answer a caller
//! waits for is known statically from the request it sent.

use super::memory::StoreMap;
use tokio::sync::oneshot;

/// Statistics reported by the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    /// Entries currently in the map
    pub entries: usize,

    /// Requests applied before the stats request
    pub requests_served: u64,
}

/// One operation for the worker, consumed exactly once
pub enum Request<K, V> {
    Set {
        key: K,
        value: V,
        reply: oneshot::Sender<()>,
    },
    Get {
        key: K,
        reply: oneshot::Sender<V>,
    },
    Delete {
        key: K,
        reply: oneshot::Sender<()>,
    },
    Exist {
        key: K,
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<StoreMap<K, V>>,
    },
    Length {
        reply: oneshot::Sender<usize>,
    },
    Clear {
        reply: oneshot::Sender<()>,
    },
    Stats {
        reply: oneshot::Sender<StoreStats>,
    },
    /// Stop the worker after acknowledging
    Close {
        reply: oneshot::Sender<()>,
    },
}

impl<K, V> Request<K, V> {
    /// Request kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Set { .. } => "SET",
            Request::Get { .. } => "GET",
            Request::Delete { .. } => "DELETE",
            Request::Exist { .. } => "EXIST",
            Request::Snapshot { .. } => "SNAPSHOT",
            Request::Length { .. } => "LENGTH",
            Request::Clear { .. } => "CLEAR",
            Request::Stats { .. } => "STATS",
            Request::Close { .. } => "CLOSE",
        }
    }
}
