//! kvtrace - An instrumented key-value cache
//!
//! A thin persistence layer over a key-value store, with per-operation call
//! counters, paired input/output history logs, a replay reporter and a
//! read-through web page cache with TTL expiry.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod replay;
pub mod tasks;
pub mod trace;
pub mod web;

pub use cache::{Cache, Scalar};
pub use client::{KvClient, MemoryClient};
pub use config::Config;
pub use error::{CacheError, Result};
pub use replay::replay;
pub use tasks::spawn_sweep_task;
pub use web::PageCache;
