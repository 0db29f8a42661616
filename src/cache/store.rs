//! Entry Store Module
//!
//! The instrumented entry store: writes scalar values under fresh random
//! keys and reads them back with optional typed decoding. The store path is
//! wrapped with call counting and history recording at construction time.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::cache::scalar::{decode_float, decode_int, decode_text};
use crate::cache::Scalar;
use crate::client::KvClient;
use crate::error::Result;
use crate::trace::{Counted, Recorded, StoreOp};

// == Operation Identity ==
/// Stable name of the instrumented store operation.
pub const STORE_OP_NAME: &str = "Cache::store";

// == Raw Store Operation ==
/// The uninstrumented store primitive: generate a fresh key, write the
/// value, return the key.
pub struct RawStore {
    kv: Arc<dyn KvClient>,
}

impl RawStore {
    /// Creates the store primitive over `kv`.
    pub fn new(kv: Arc<dyn KvClient>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl StoreOp for RawStore {
    fn name(&self) -> &'static str {
        STORE_OP_NAME
    }

    async fn invoke(&self, value: Scalar) -> Result<String> {
        // 128-bit random identifier; collisions are negligible and keys are
        // never reused
        let key = Uuid::new_v4().to_string();
        self.kv.set(&key, &value.to_bytes()).await?;
        debug!(key = %key, "stored entry");
        Ok(key)
    }
}

// == Cache ==
/// The instrumented key-value cache.
///
/// Holds no state of its own beyond the client handle; all persisted state
/// (entries, counters, history logs) lives in the backing store.
pub struct Cache {
    kv: Arc<dyn KvClient>,
    // Composition fixed here: history outermost, counter inside it, so a
    // call is logged and counted before the store primitive runs
    store_op: Recorded<Counted<RawStore>>,
}

impl Cache {
    /// Creates a cache over the given client.
    ///
    /// Construction never touches the store. To start from a blank store,
    /// call [`Cache::wipe_and_init`] explicitly.
    pub fn new(kv: Arc<dyn KvClient>) -> Self {
        let store_op = Recorded::new(
            Counted::new(RawStore::new(kv.clone()), kv.clone()),
            kv.clone(),
        );
        Self { kv, store_op }
    }

    /// Wipes the entire backing store and leaves it empty.
    ///
    /// Destructive: every entry, counter and history log is removed,
    /// including state written by other cache instances sharing the store.
    /// Call at most once per process lifetime, before normal use.
    pub async fn wipe_and_init(&self) -> Result<()> {
        warn!("wiping backing store");
        self.kv.flush_all().await
    }

    /// Stores a scalar value under a fresh random key and returns the key.
    ///
    /// Each call generates a new key, even for identical values. The call is
    /// counted and recorded in the history logs under
    /// [`STORE_OP_NAME`].
    pub async fn store(&self, value: impl Into<Scalar> + Send) -> Result<String> {
        self.store_op.invoke(value.into()).await
    }

    /// Reads the raw bytes under `key`. Absent keys read as `None`.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.kv.get(key).await
    }

    /// Reads the value under `key` and applies `decode` to it.
    ///
    /// Absent keys read as `None` without invoking `decode`; a decode
    /// failure is propagated to the caller.
    pub async fn get_with<T, F>(&self, key: &str, decode: F) -> Result<Option<T>>
    where
        F: FnOnce(Vec<u8>) -> Result<T> + Send,
    {
        match self.kv.get(key).await? {
            Some(bytes) => Ok(Some(decode(bytes)?)),
            None => Ok(None),
        }
    }

    /// Reads the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get_with(key, decode_text).await
    }

    /// Reads the value under `key` as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_with(key, decode_int).await
    }

    /// Reads the value under `key` as a decimal floating-point number.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get_with(key, decode_float).await
    }

    /// Returns the underlying client handle, e.g. for replaying history.
    pub fn client(&self) -> Arc<dyn KvClient> {
        Arc::clone(&self.kv)
    }
}
