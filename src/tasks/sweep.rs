//! Expiry Sweep Task
//!
//! Background task that periodically removes expired records from the memory
//! engine. Reads already expire lazily; the sweep reclaims memory for
//! records nothing reads again (old cached pages, mostly).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::client::MemoryEngine;

/// Spawns a background task that periodically sweeps expired records.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between sweeps. It acquires a write lock on the engine to remove expired
/// records.
///
/// # Arguments
/// * `engine` - Shared engine handle (see [`MemoryClient::engine`](crate::client::MemoryClient::engine))
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
pub fn spawn_sweep_task(
    engine: Arc<RwLock<MemoryEngine>>,
    sweep_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(sweep_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut engine_guard = engine.write().await;
                engine_guard.sweep_expired()
            };

            if removed > 0 {
                info!("Expiry sweep: removed {} expired records", removed);
            } else {
                debug!("Expiry sweep: no expired records found");
            }
        }
    })
}
