use crate::models::RawResultRow;
use crate::services::timing::{TimingClient, TimingError};
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

/// Memoized, TTL-bounded wrapper around the timing client
///
/// Results are cached per category for a short window (default 5s) so
/// polling spectators share one upstream fetch. Lookups are
/// single-flight: concurrent misses for the same category coalesce
/// into one in-flight request instead of stampeding the provider.
/// Readers inside the TTL window may see stale-but-consistent rows.
pub struct FeedCache {
    client: Arc<TimingClient>,
    cache: Cache<String, Arc<Vec<RawResultRow>>>,
}

impl FeedCache {
    /// Create a feed cache with the given TTL and category capacity
    pub fn new(client: Arc<TimingClient>, ttl_secs: u64, max_categories: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_categories)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { client, cache }
    }

    /// Get the raw rows for a category, fetching upstream at most once
    /// per TTL window
    ///
    /// A failed fetch is logged and degrades to an empty row set; the
    /// failure is not cached, so the next poll retries the provider.
    /// Never returns an error: a stale or empty leaderboard beats no
    /// leaderboard during a live event.
    pub async fn get(&self, category_id: &str, endpoint_url: &str) -> Arc<Vec<RawResultRow>> {
        let result = self
            .cache
            .try_get_with(category_id.to_string(), async {
                let rows = self.client.fetch_results(endpoint_url).await?;
                Ok::<_, TimingError>(Arc::new(rows))
            })
            .await;

        match result {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Timing fetch failed for category {}: {}", category_id, e);
                Arc::new(Vec::new())
            }
        }
    }

    /// Drop the cached rows for a category
    pub async fn invalidate(&self, category_id: &str) {
        self.cache.invalidate(category_id).await;
    }

    /// Force-refresh a category and return the new row count
    ///
    /// Used by the background refresh worker to repopulate the cache
    /// off the interactive path.
    pub async fn refresh(&self, category_id: &str, endpoint_url: &str) -> usize {
        self.invalidate(category_id).await;
        self.get(category_id, endpoint_url).await.len()
    }

    /// Number of categories currently cached
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
