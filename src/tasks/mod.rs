//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the cache is in use.
//!
//! # Tasks
//! - Expiry sweep: reclaims expired memory-engine records at configured intervals

mod sweep;

pub use sweep::spawn_sweep_task;
