//! Store worker
//!
//! The worker runs on its own thread and is the only code that ever touches
//! the map. Requests are taken one at a time and each gets exactly one reply
//! before the next is received, which gives every caller the same total order.

use super::memory::MemoryStore;
use super::request::{Request, StoreStats};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Owner of the map and the receiving end of the request channel
pub(crate) struct Worker<K, V> {
    /// Label used in logs
    name: String,

    /// The map, reachable only from this worker
    store: MemoryStore<K, V>,

    /// Incoming requests
    requests: mpsc::Receiver<Request<K, V>>,

    /// Number of requests applied so far
    served: u64,
}

impl<K, V> Worker<K, V>
where
    K: Eq + Hash + Clone,
    V: Default + Clone,
{
    pub(crate) fn new(
        name: String,
        store: MemoryStore<K, V>,
        requests: mpsc::Receiver<Request<K, V>>,
    ) -> Self {
        Worker {
            name,
            store,
            requests,
            served: 0,
        }
    }

    /// The main loop. Blocks the current thread until the store is closed or
    /// every handle has been dropped.
    pub(crate) fn run(mut self) {
        info!("Store worker '{}' starting", self.name);

        while let Some(request) = self.requests.blocking_recv() {
            debug!("Store worker '{}' received {}", self.name, request.kind());

            if !self.apply(request) {
                info!("Store worker '{}' closed by request", self.name);
                break;
            }
        }

        // Dropping the receiver fails any request still queued with `Closed`.
        info!(
            "Store worker '{}' shutting down after {} requests",
            self.name, self.served
        );
    }

    /// Apply one request and send its reply. Returns false when the worker must stop.
    fn apply(&mut self, request: Request<K, V>) -> bool {
        let kind = request.kind();
        let keep_running = match request {
            Request::Set { key, value, reply } => {
                self.store.set(key, value);
                self.respond(kind, reply, ());
                true
            }
            Request::Get { key, reply } => {
                let value = self.store.get(&key);
                self.respond(kind, reply, value);
                true
            }
            Request::Delete { key, reply } => {
                self.store.delete(&key);
                self.respond(kind, reply, ());
                true
            }
            Request::Exist { key, reply } => {
                let exists = self.store.exists(&key);
                self.respond(kind, reply, exists);
                true
            }
            Request::Snapshot { reply } => {
                self.respond(kind, reply, self.store.snapshot());
                true
            }
            Request::Length { reply } => {
                self.respond(kind, reply, self.store.len());
                true
            }
            Request::Clear { reply } => {
                let removed = self.store.clear();
                debug!("Store worker '{}' cleared {} entries", self.name, removed);
                self.respond(kind, reply, ());
                true
            }
            Request::Stats { reply } => {
                let stats = StoreStats {
                    entries: self.store.len(),
                    requests_served: self.served,
                };
                self.respond(kind, reply, stats);
                true
            }
            Request::Close { reply } => {
                self.respond(kind, reply, ());
                false
            }
        };

        self.served += 1;
        keep_running
    }

    fn respond<T>(&self, kind: &'static str, reply: oneshot::Sender<T>, value: T) {
        if reply.send(value).is_err() {
            warn!(
                "Store worker '{}': caller dropped before {} reply",
                self.name, kind
            );
        }
    }
}
