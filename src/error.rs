//! Error types for the instrumented cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for all cache layers.
///
/// Absent keys are not errors: retrieval operations return `Ok(None)` and
/// callers must check for absence explicitly.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backing key-value store is unreachable
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Stored bytes do not match the requested scalar type
    #[error("decode error: {0}")]
    Decode(String),

    /// Operation applied to a key holding the wrong kind of value
    /// (e.g. a list operation on a string record)
    #[error("wrong type for key '{0}'")]
    WrongType(String),

    /// History record could not be encoded
    #[error("history codec error: {0}")]
    Codec(String),

    /// Outbound page fetch failed
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
