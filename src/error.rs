//! Error types for store operations

/// Errors returned by [`SerialStore`](crate::SerialStore) operations.
///
/// Looking up or deleting a missing key is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The handle was not built by a constructor, so it has no worker.
    #[error("uninitialized container: store must be created with SerialStore::new")]
    Uninitialized,

    /// The worker has stopped (after `close`, or while the request was queued).
    #[error("store is closed")]
    Closed,

    /// The configuration was rejected.
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// The worker thread could not be started.
    #[error("failed to spawn store worker: {0}")]
    Spawn(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
