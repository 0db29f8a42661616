//! Call Tracing Module
//!
//! Composable wrappers that instrument a named store operation: [`Counted`]
//! keeps a persistent per-operation invocation counter, [`Recorded`] appends
//! every call's input and output to a pair of ordered history logs. Wrappers
//! implement the same [`StoreOp`] signature as the operation they wrap, so
//! they stack at construction time and composition order decides audit order.

mod counted;
mod recorded;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cache::Scalar;
use crate::error::{CacheError, Result};

pub use counted::Counted;
pub use recorded::Recorded;

// == Store Operation Trait ==
/// A named store operation taking one scalar argument and returning the key
/// it was stored under.
///
/// The name is the operation's stable identity: it keys the invocation
/// counter and both history logs across process restarts.
#[async_trait]
pub trait StoreOp: Send + Sync {
    /// Stable operation identity, e.g. `"Cache::store"`.
    fn name(&self) -> &'static str;

    /// Invokes the operation.
    async fn invoke(&self, value: Scalar) -> Result<String>;
}

// == History Log Keys ==
/// List key holding the serialized inputs of operation `name`.
pub fn input_key(name: &str) -> String {
    format!("{name}:inputs")
}

/// List key holding the serialized outputs of operation `name`.
pub fn output_key(name: &str) -> String {
    format!("{name}:outputs")
}

// == History Codec ==
/// Version tag written into every history record, so the log stays
/// parseable if the record layout ever changes.
pub const HISTORY_VERSION: u32 = 1;

/// One recorded invocation's argument tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Codec version
    pub v: u32,
    /// The argument tuple, in positional order
    pub args: Vec<Scalar>,
}

impl CallRecord {
    /// Wraps an argument tuple in the current codec version.
    pub fn new(args: Vec<Scalar>) -> Self {
        Self {
            v: HISTORY_VERSION,
            args,
        }
    }

    /// Canonical JSON encoding appended to the inputs log.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CacheError::Codec(e.to_string()))
    }

    /// Decodes a log entry written by [`CallRecord::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Codec(e.to_string()))
    }
}

/// One recorded invocation's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Codec version
    pub v: u32,
    /// The returned entry key
    pub result: String,
}

impl ResultRecord {
    /// Wraps an operation result in the current codec version.
    pub fn new(result: String) -> Self {
        Self {
            v: HISTORY_VERSION,
            result,
        }
    }

    /// Canonical JSON encoding appended to the outputs log.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CacheError::Codec(e.to_string()))
    }

    /// Decodes a log entry written by [`ResultRecord::encode`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CacheError::Codec(e.to_string()))
    }
}
