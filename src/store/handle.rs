//! Public store handle
//!
//! Every operation is turned into one [`Request`] and sent to the worker; the
//! caller then waits on the request's own reply channel. Operations come in an
//! async flavor and a `blocking_` flavor sharing the same request path.

use super::memory::{MemoryStore, StoreMap};
use super::request::{Request, StoreStats};
use super::worker::Worker;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use std::collections::hash_map::{IntoIter, IntoKeys};
use std::fmt;
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};

/// Thread-safe key-value container served by a single worker thread
///
/// Handles are cheap to clone and every clone talks to the same worker.
/// A handle built with [`Default`] has no worker: every operation on it
/// returns [`StoreError::Uninitialized`].
///
/// The `blocking_` methods must not be called from inside an async runtime;
/// use the async methods there.
pub struct SerialStore<K, V> {
    /// Channel to the worker, absent when the handle bypassed the constructors
    sender: Option<mpsc::Sender<Request<K, V>>>,
}

impl<K, V> SerialStore<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Default + Clone + Send + 'static,
{
    /// Create an empty store and start its worker
    pub fn new() -> Self {
        let config = StoreConfig::default();
        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let worker = Worker::new(config.name, MemoryStore::new(), receiver);

        std::thread::spawn(move || worker.run());

        SerialStore {
            sender: Some(sender),
        }
    }

    /// Create an empty store from a configuration and start a named worker thread
    pub fn with_config(config: StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let (sender, receiver) = mpsc::channel(config.channel_capacity);
        let store = MemoryStore::with_capacity(config.initial_capacity);
        let worker = Worker::new(config.name.clone(), store, receiver);

        std::thread::Builder::new()
            .name(config.name)
            .spawn(move || worker.run())
            .map_err(|e| StoreError::Spawn(e.to_string()))?;

        Ok(SerialStore {
            sender: Some(sender),
        })
    }

    /// Insert or overwrite a value. Returns once the write is applied.
    pub async fn set(&self, key: K, value: V) -> StoreResult<()> {
        self.call(|reply| Request::Set { key, value, reply }).await
    }

    /// Current value for `key`, or `V::default()` when absent
    pub async fn get(&self, key: K) -> StoreResult<V> {
        self.call(|reply| Request::Get { key, reply }).await
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub async fn delete(&self, key: K) -> StoreResult<()> {
        self.call(|reply| Request::Delete { key, reply }).await
    }

    pub async fn exist(&self, key: K) -> StoreResult<bool> {
        self.call(|reply| Request::Exist { key, reply }).await
    }

    /// Number of entries
    pub async fn length(&self) -> StoreResult<usize> {
        self.call(|reply| Request::Length { reply }).await
    }

    pub async fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.length().await? == 0)
    }

    /// Independent copy of the whole map at the moment the worker handles the request
    pub async fn snapshot(&self) -> StoreResult<StoreMap<K, V>> {
        self.call(|reply| Request::Snapshot { reply }).await
    }

    /// Keys of a fresh snapshot
    ///
    /// ```no_run
    /// # async fn demo() -> serialstore::StoreResult<()> {
    /// let store = serialstore::SerialStore::<u32, u32>::new();
    /// store.set(1, 2).await?;
    /// for key in store.keys().await? {
    ///     println!("{}", key);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn keys(&self) -> StoreResult<IntoKeys<K, V>> {
        Ok(self.snapshot().await?.into_keys())
    }

    /// Key-value pairs of a fresh snapshot
    pub async fn all(&self) -> StoreResult<IntoIter<K, V>> {
        Ok(self.snapshot().await?.into_iter())
    }

    /// Remove every entry
    pub async fn clear(&self) -> StoreResult<()> {
        self.call(|reply| Request::Clear { reply }).await
    }

    pub async fn stats(&self) -> StoreResult<StoreStats> {
        self.call(|reply| Request::Stats { reply }).await
    }

    /// Stop the worker. Every later operation, on any clone, returns [`StoreError::Closed`].
    pub async fn close(&self) -> StoreResult<()> {
        self.call(|reply| Request::Close { reply }).await
    }

    pub fn blocking_set(&self, key: K, value: V) -> StoreResult<()> {
        self.blocking_call(|reply| Request::Set { key, value, reply })
    }

    pub fn blocking_get(&self, key: K) -> StoreResult<V> {
        self.blocking_call(|reply| Request::Get { key, reply })
    }

    pub fn blocking_delete(&self, key: K) -> StoreResult<()> {
        self.blocking_call(|reply| Request::Delete { key, reply })
    }

    pub fn blocking_exist(&self, key: K) -> StoreResult<bool> {
        self.blocking_call(|reply| Request::Exist { key, reply })
    }

    pub fn blocking_length(&self) -> StoreResult<usize> {
        self.blocking_call(|reply| Request::Length { reply })
    }

    pub fn blocking_is_empty(&self) -> StoreResult<bool> {
        Ok(self.blocking_length()? == 0)
    }

    pub fn blocking_snapshot(&self) -> StoreResult<StoreMap<K, V>> {
        self.blocking_call(|reply| Request::Snapshot { reply })
    }

    pub fn blocking_keys(&self) -> StoreResult<IntoKeys<K, V>> {
        Ok(self.blocking_snapshot()?.into_keys())
    }

    pub fn blocking_all(&self) -> StoreResult<IntoIter<K, V>> {
        Ok(self.blocking_snapshot()?.into_iter())
    }

    pub fn blocking_clear(&self) -> StoreResult<()> {
        self.blocking_call(|reply| Request::Clear { reply })
    }

    pub fn blocking_stats(&self) -> StoreResult<StoreStats> {
        self.blocking_call(|reply| Request::Stats { reply })
    }

    pub fn blocking_close(&self) -> StoreResult<()> {
        self.blocking_call(|reply| Request::Close { reply })
    }

    /// Whether the worker has stopped. Always false for an uninitialized handle.
    pub fn is_closed(&self) -> bool {
        self.sender.as_ref().map_or(false, |sender| sender.is_closed())
    }

    /// Whether this handle was built by a constructor
    pub fn is_initialized(&self) -> bool {
        self.sender.is_some()
    }

    fn sender(&self) -> StoreResult<&mpsc::Sender<Request<K, V>>> {
        self.sender.as_ref().ok_or(StoreError::Uninitialized)
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> Request<K, V>,
    ) -> StoreResult<R> {
        let sender = self.sender()?;
        let (tx, rx) = oneshot::channel();

        sender.send(build(tx)).await.map_err(|_| StoreError::Closed)?;
        rx.await.map_err(|_| StoreError::Closed)
    }

    fn blocking_call<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> Request<K, V>,
    ) -> StoreResult<R> {
        let sender = self.sender()?;
        let (tx, rx) = oneshot::channel();

        sender
            .blocking_send(build(tx))
            .map_err(|_| StoreError::Closed)?;
        rx.blocking_recv().map_err(|_| StoreError::Closed)
    }
}

impl<K, V> Default for SerialStore<K, V> {
    fn default() -> Self {
        SerialStore { sender: None }
    }
}

impl<K, V> Clone for SerialStore<K, V> {
    fn clone(&self) -> Self {
        SerialStore {
            sender: self.sender.clone(),
        }
    }
}

impl<K, V> fmt::Debug for SerialStore<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialStore")
            .field("initialized", &self.sender.is_some())
            .field(
                "closed",
                &self.sender.as_ref().map_or(false, |sender| sender.is_closed()),
            )
            .finish()
    }
}
