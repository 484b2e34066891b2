//! TTL Sweep Task
//!
//! Background task that periodically evicts expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheTable;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between passes. Each pass acquires the table write lock and removes every
/// entry whose expiry has passed. Eviction never surfaces errors.
///
/// # Arguments
/// * `table` - Shared reference to the cache table
/// * `interval_secs` - Interval in seconds between sweep passes
///
/// # Returns
/// A JoinHandle for the spawned task; the engine aborts it on teardown.
pub fn spawn_sweep_task(table: Arc<RwLock<CacheTable>>, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!("Starting TTL sweep task with interval of {} seconds", interval_secs);

        loop {
            tokio::time::sleep(interval).await;

            // The sweep holds the write lock for the whole pass; there is no
            // await point inside, so a pass either completes or never starts
            let removed = {
                let mut table_guard = table.write().await;
                table_guard.sweep_expired()
            };

            if removed > 0 {
                info!("TTL sweep: evicted {} expired entries", removed);
            } else {
                debug!("TTL sweep: no expired entries found");
            }
        }
    })
}
