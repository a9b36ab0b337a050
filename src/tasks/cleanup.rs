//! Expiry Sweep Task
//!
//! Periodically drops expired values from the local store so memory does not
//! grow with entries nobody reads again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::store::MemoryStore;

/// Spawns the sweep, running every `interval_secs` seconds.
///
/// The returned handle is aborted on shutdown.
pub fn spawn_cleanup_task(store: Arc<RwLock<MemoryStore>>, interval_secs: u64) -> JoinHandle<()> {
    let period = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(interval_secs = period.as_secs(), "Starting expiry sweep task");

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = store.write().await.cleanup_expired();
            if removed > 0 {
                info!(removed, "Expiry sweep removed values");
            } else {
                debug!("Expiry sweep found nothing to remove");
            }
        }
    })
}
