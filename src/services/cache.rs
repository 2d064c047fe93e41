use moka::future::{Cache, CacheBuilder};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::models::MatchmakingResult;

/// Shared, immutable batch of results for every stored student
pub type ResultSet = Arc<Vec<MatchmakingResult>>;

/// In-process cache of matching results
///
/// Entries are keyed by store revision, so a result set computed before a
/// write is never served after it. Writes still call
/// [`MatchCache::invalidate_all`] to release memory early.
pub struct MatchCache {
    results: Cache<String, ResultSet>,
}

impl MatchCache {
    /// Create a new cache
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let results = CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { results }
    }

    /// Return cached results for `revision`, computing them on a miss
    ///
    /// Concurrent misses for the same revision run `compute` once.
    pub async fn get_or_compute<F>(&self, revision: u64, compute: F) -> ResultSet
    where
        F: Future<Output = Vec<MatchmakingResult>>,
    {
        let key = CacheKey::all_results(revision);
        self.results
            .get_with(key, async move { Arc::new(compute.await) })
            .await
    }

    pub fn invalidate_all(&self) {
        self.results.invalidate_all();
        tracing::debug!("Invalidated match cache");
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the results of every stored student
    pub fn all_results(revision: u64) -> String {
        format!("results:{}", revision)
    }
}
