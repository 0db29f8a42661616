//! KV Client Module
//!
//! Minimal capability interface over the backing key-value store, plus an
//! in-process implementation backed by [`MemoryEngine`].
//!
//! The trait is the seam real deployments implement against a networked
//! store; every higher layer (entry store, call wrappers, replay, web cache)
//! holds only a client handle and no state of its own.

mod engine;
mod memory;
mod record;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use engine::MemoryEngine;
pub use memory::MemoryClient;
pub use record::StoredRecord;

// == KV Client Trait ==
/// Capability set required from the backing key-value store.
///
/// Each operation is atomic at single-key/single-list granularity; no
/// cross-key transactions are offered or required. Implementations surface
/// [`CacheError::StoreUnavailable`](crate::error::CacheError::StoreUnavailable)
/// when the backing connection is lost; reconnection is the implementation's
/// concern and is transparent to callers.
#[async_trait]
pub trait KvClient: Send + Sync {
    /// Stores `value` under `key` with no expiry, overwriting any existing
    /// value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Reads the value under `key`. Absent keys read as `None`, not as an
    /// error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically increments the counter under `name`, creating it at zero
    /// first if absent, and returns the new value.
    async fn incr(&self, name: &str) -> Result<i64>;

    /// Appends `item` to the tail of the list under `list`.
    async fn rpush(&self, list: &str, item: &[u8]) -> Result<()>;

    /// Stores `value` under `key`, expiring it after `ttl`.
    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Reads the inclusive range `[start, stop]` of the list under `list`.
    /// Negative indices count from the tail; `(0, -1)` reads the whole list.
    async fn lrange(&self, list: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>>;

    /// Removes every key in the store.
    ///
    /// Destructive full wipe. Callers expose this only through explicitly
    /// named initialization paths, never as a side effect of construction.
    async fn flush_all(&self) -> Result<()>;
}
