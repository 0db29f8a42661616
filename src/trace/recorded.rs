//! Call History Wrapper
//!
//! Wraps a store operation so that every invocation appends its serialized
//! input and output to two ordered, paired history logs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::Scalar;
use crate::client::KvClient;
use crate::error::Result;
use crate::trace::{input_key, output_key, CallRecord, ResultRecord, StoreOp};

// == Recorded Wrapper ==
/// Records the input and output of every invocation of the wrapped
/// operation.
///
/// The input is appended before the wrapped call runs and the output after
/// it returns, as two independent list appends. The i-th input pairs with
/// the i-th output in call order. When the wrapped call fails, no output is
/// appended, so the logs stay momentarily unpaired; the replay reporter
/// tolerates that by rendering only matched pairs.
pub struct Recorded<Op> {
    inner: Op,
    kv: Arc<dyn KvClient>,
}

impl<Op: StoreOp> Recorded<Op> {
    /// Wraps `inner`, logging its call history through `kv`.
    pub fn new(inner: Op, kv: Arc<dyn KvClient>) -> Self {
        Self { inner, kv }
    }
}

#[async_trait]
impl<Op: StoreOp> StoreOp for Recorded<Op> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn invoke(&self, value: Scalar) -> Result<String> {
        let name = self.inner.name();

        let input = CallRecord::new(vec![value.clone()]).encode()?;
        self.kv.rpush(&input_key(name), &input).await?;

        let result = self.inner.invoke(value).await?;

        let output = ResultRecord::new(result.clone()).encode()?;
        self.kv.rpush(&output_key(name), &output).await?;

        Ok(result)
    }
}
