//! Memory Client Module
//!
//! In-process [`KvClient`] implementation sharing a [`MemoryEngine`] behind
//! `Arc<RwLock<_>>`, so any number of cache layers and background tasks can
//! hold clones of one client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::client::{KvClient, MemoryEngine};
use crate::error::Result;

// == Memory Client ==
/// Thread-safe handle to an in-process memory engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryClient {
    engine: Arc<RwLock<MemoryEngine>>,
}

impl MemoryClient {
    /// Creates a client over a fresh, empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared engine handle, for wiring up the background
    /// expiry sweep.
    pub fn engine(&self) -> Arc<RwLock<MemoryEngine>> {
        Arc::clone(&self.engine)
    }
}

#[async_trait]
impl KvClient for MemoryClient {
    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut engine = self.engine.write().await;
        engine.set(key, value.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // Write lock: expired records are removed on read
        let mut engine = self.engine.write().await;
        engine.get(key)
    }

    async fn incr(&self, name: &str) -> Result<i64> {
        let mut engine = self.engine.write().await;
        engine.incr(name)
    }

    async fn rpush(&self, list: &str, item: &[u8]) -> Result<()> {
        let mut engine = self.engine.write().await;
        engine.rpush(list, item.to_vec())?;
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut engine = self.engine.write().await;
        engine.set_ex(key, value.to_vec(), ttl);
        Ok(())
    }

    async fn lrange(&self, list: &str, start: i64, stop: i64) -> Result<Vec<Vec<u8>>> {
        let engine = self.engine.read().await;
        engine.lrange(list, start, stop)
    }

    async fn flush_all(&self) -> Result<()> {
        let mut engine = self.engine.write().await;
        engine.flush_all();
        Ok(())
    }
}
