//! Call Counter Wrapper
//!
//! Wraps a store operation so that every invocation increments a persistent
//! counter keyed by the operation's name.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::cache::Scalar;
use crate::client::KvClient;
use crate::error::Result;
use crate::trace::StoreOp;

// == Counted Wrapper ==
/// Counts invocations of the wrapped operation.
///
/// The increment happens before the wrapped call runs, so the counter
/// reflects invocation attempts, not verified completions. The increment is
/// fire-and-forget: a store failure here is logged and never blocks or fails
/// the wrapped call.
pub struct Counted<Op> {
    inner: Op,
    kv: Arc<dyn KvClient>,
}

impl<Op: StoreOp> Counted<Op> {
    /// Wraps `inner`, counting its invocations through `kv`.
    pub fn new(inner: Op, kv: Arc<dyn KvClient>) -> Self {
        Self { inner, kv }
    }
}

#[async_trait]
impl<Op: StoreOp> StoreOp for Counted<Op> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn invoke(&self, value: Scalar) -> Result<String> {
        if let Err(err) = self.kv.incr(self.name()).await {
            warn!(op = self.name(), %err, "call counter increment failed");
        }
        self.inner.invoke(value).await
    }
}
