use std::sync::Arc;
use std::time::Duration;

use aerosearch_engine::ResultCache;
use tokio::task::JoinHandle;
use tracing::debug;

/// Evicts expired cache entries every `every`, so routes nobody asks for
/// again don't sit in memory.
pub fn spawn_cache_sweeper(cache: Arc<ResultCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            interval.tick().await;
            let evicted = cache.purge_expired().await;
            if evicted > 0 {
                debug!("Cache sweep evicted {} route(s), {} left", evicted, cache.len().await);
            }
        }
    })
}
