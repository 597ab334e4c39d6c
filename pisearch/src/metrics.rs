use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Counts corpus loads and searches.
///
/// Clones share the same counters, so one instance can be handed to every
/// worker of a batch.
#[derive(Debug, Clone)]
pub struct SearchMetrics {
    corpus_fetches: Arc<AtomicU64>,
    fetch_failures: Arc<AtomicU64>,
    cache_hits: Arc<AtomicU64>,
    searches: Arc<AtomicU64>,
    found: Arc<AtomicU64>,
    not_found: Arc<AtomicU64>,
    candidates_tried: Arc<AtomicU64>,
}

impl SearchMetrics {
    pub fn new() -> Self {
        Self {
            corpus_fetches: Arc::new(AtomicU64::new(0)),
            fetch_failures: Arc::new(AtomicU64::new(0)),
            cache_hits: Arc::new(AtomicU64::new(0)),
            searches: Arc::new(AtomicU64::new(0)),
            found: Arc::new(AtomicU64::new(0)),
            not_found: Arc::new(AtomicU64::new(0)),
            candidates_tried: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records an attempt to fetch the corpus from its source
    pub fn record_fetch(&self) {
        self.corpus_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a request served from the already-loaded corpus
    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a completed search and how many candidates it carried
    pub fn record_search(&self, found: bool, candidates: usize) {
        self.searches.fetch_add(1, Ordering::Relaxed);
        self.candidates_tried
            .fetch_add(candidates as u64, Ordering::Relaxed);
        if found {
            self.found.fetch_add(1, Ordering::Relaxed);
        } else {
            self.not_found.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn get_stats(&self) -> SearchStats {
        SearchStats {
            corpus_fetches: self.corpus_fetches.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            searches: self.searches.load(Ordering::Relaxed),
            found: self.found.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            candidates_tried: self.candidates_tried.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Search stats:\n\
             Corpus fetches/failures: {}/{}\n\
             Cache hits: {}\n\
             Searches (found/not found): {} ({}/{})\n\
             Candidates tried: {}",
            stats.corpus_fetches,
            stats.fetch_failures,
            stats.cache_hits,
            stats.searches,
            stats.found,
            stats.not_found,
            stats.candidates_tried
        );
    }
}

impl Default for SearchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`SearchMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub corpus_fetches: u64,
    pub fetch_failures: u64,
    pub cache_hits: u64,
    pub searches: u64,
    pub found: u64,
    pub not_found: u64,
    pub candidates_tried: u64,
}
