/// This module ties the pieces together behind [`PiSearcher`].
///
/// A request flows through four steps:
///
/// 1. **Candidates** - the date or name is turned into an ordered list of digit
///    strings ([`crate::candidates`]).
/// 2. **Corpus** - the digits are loaded once and shared through a
///    [`CorpusCache`]; concurrent first requests wait on the same load.
/// 3. **Matching** - [`engine::search`] returns the first candidate that occurs.
/// 4. **Context** - [`context::build_report`] adds the surrounding digits and
///    the percentage offset.
///
/// Only step 2 awaits. Everything else is a synchronous function over the
/// shared, immutable corpus, which is why batch searches can fan out over a
/// rayon pool once the corpus is in memory:
/// ```rust,ignore
/// let corpus = searcher.corpus().await?;
/// let entries: Vec<_> = inputs.par_iter().map(|q| search(&corpus, &candidates_for(q))).collect();
/// ```
pub mod context;
pub mod engine;

pub use context::{build_report, format_context, percentage, percentage_label};
pub use engine::search;

use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::PiConfig;
use crate::corpus::{Corpus, CorpusCache};
use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;
use crate::query::{DateQuery, Query};
use crate::results::{MatchReport, MatchResult};
use crate::source::{CorpusSource, FileCorpusSource};

/// One line of a batch and what came of it
#[derive(Debug)]
pub struct BatchEntry {
    pub input: String,
    pub outcome: SearchResult<MatchReport>,
}

/// Searches dates and names against a lazily loaded corpus.
///
/// Each searcher starts with a cache of its own. Searchers over the same
/// source can share one through [`PiSearcher::with_cache`], so the corpus is
/// fetched once no matter how many of them run.
#[derive(Debug)]
pub struct PiSearcher<S> {
    source: S,
    cache: Arc<CorpusCache>,
    context_radius: usize,
    thread_count: NonZeroUsize,
    metrics: SearchMetrics,
}

impl PiSearcher<FileCorpusSource> {
    /// Creates a searcher reading the corpus file named in `config`
    pub fn from_config(config: &PiConfig) -> Self {
        PiSearcher::new(FileCorpusSource::new(&config.corpus_path))
            .with_context_radius(config.context_radius)
            .with_thread_count(config.thread_count)
    }
}

impl<S: CorpusSource> PiSearcher<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Arc::new(CorpusCache::new()),
            context_radius: context::DEFAULT_CONTEXT_RADIUS,
            thread_count: NonZeroUsize::MIN,
            metrics: SearchMetrics::new(),
        }
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_thread_count(mut self, threads: NonZeroUsize) -> Self {
        self.thread_count = threads;
        self
    }

    /// Uses `cache` instead of a private one, e.g. [`CorpusCache::global`]
    pub fn with_cache(mut self, cache: Arc<CorpusCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &Arc<CorpusCache> {
        &self.cache
    }

    pub fn metrics(&self) -> &SearchMetrics {
        &self.metrics
    }

    pub fn context_radius(&self) -> usize {
        self.context_radius
    }

    /// The corpus, loading it on first use
    pub async fn corpus(&self) -> SearchResult<Arc<Corpus>> {
        self.cache.get_or_load(&self.source, &self.metrics).await
    }

    /// Searches a candidate list, rejecting an empty one as an input error
    pub async fn search_candidates(&self, candidates: Vec<String>) -> SearchResult<MatchResult> {
        ensure_candidates(&candidates)?;
        let corpus = self.corpus().await?;
        Ok(run_search(&corpus, &candidates, &self.metrics))
    }

    /// Looks for a month/day/year date, trying its encodings in priority order
    pub async fn search_date(&self, month: u32, day: u32, year: u32) -> SearchResult<MatchResult> {
        let date = DateQuery::new(month, day, year)?;
        info!("Searching for date {}", date);
        self.search_candidates(date.candidates()).await
    }

    /// Looks for the letter-position encoding of a name
    pub async fn search_name(&self, name: &str) -> SearchResult<MatchResult> {
        let query = Query::name(name)?;
        info!("Searching for {}", query);
        self.search_candidates(query.candidates()).await
    }

    pub async fn search_query(&self, query: &Query) -> SearchResult<MatchResult> {
        info!("Searching for {}", query);
        self.search_candidates(query.candidates()).await
    }

    /// Adds context and percentage to a result using the cached corpus
    pub async fn report(&self, result: MatchResult) -> SearchResult<MatchReport> {
        let corpus = self.corpus().await?;
        Ok(build_report(&corpus, result, self.context_radius))
    }

    /// Parses and searches every input against one shared corpus.
    ///
    /// The corpus is loaded first; a load failure fails the whole batch. After
    /// that each input is independent: a bad line becomes an error entry and
    /// the rest still run. Entries come back in input order.
    ///
    /// The rayon pool runs on a blocking thread so the async runtime keeps
    /// serving other tasks while the batch is in progress.
    pub async fn search_batch(&self, inputs: &[String]) -> SearchResult<Vec<BatchEntry>> {
        let corpus = self.corpus().await?;
        let inputs = inputs.to_vec();
        let metrics = self.metrics.clone();
        let radius = self.context_radius;
        let threads = self.thread_count;

        info!("Running batch of {} queries on {} threads", inputs.len(), threads);

        let entries = tokio::task::spawn_blocking(move || {
            run_batch(&corpus, &inputs, radius, threads, &metrics)
        })
        .await??;

        self.metrics.log_stats();
        Ok(entries)
    }
}

fn run_batch(
    corpus: &Corpus,
    inputs: &[String],
    radius: usize,
    threads: NonZeroUsize,
    metrics: &SearchMetrics,
) -> SearchResult<Vec<BatchEntry>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.get())
        .build()
        .map_err(|e| SearchError::config_error(format!("thread pool: {e}")))?;

    Ok(pool.install(|| {
        inputs
            .par_iter()
            .map(|input| BatchEntry {
                input: input.clone(),
                outcome: Query::parse(input).and_then(|query| {
                    let candidates = query.candidates();
                    ensure_candidates(&candidates)?;
                    let result = run_search(corpus, &candidates, metrics);
                    Ok(build_report(corpus, result, radius))
                }),
            })
            .collect::<Vec<_>>()
    }))
}

fn ensure_candidates(candidates: &[String]) -> SearchResult<()> {
    if candidates.is_empty() {
        return Err(SearchError::input_error("nothing to search for"));
    }
    Ok(())
}

fn run_search(corpus: &Corpus, candidates: &[String], metrics: &SearchMetrics) -> MatchResult {
    let result = search(corpus, candidates);
    metrics.record_search(result.is_found(), candidates.len());
    debug!("Search outcome: {:?}", result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticCorpusSource;

    // 31415926535897932384626433832795028841971693993751
    const FIFTY_DIGITS: &str = "3.14159265358979323846\n2643383279502884197169399375\n1";

    fn searcher() -> PiSearcher<StaticCorpusSource> {
        PiSearcher::new(StaticCorpusSource::new(FIFTY_DIGITS)).with_context_radius(5)
    }

    #[tokio::test]
    async fn test_search_name_found() {
        let searcher = searcher();
        // "O" encodes to "15", first seen at offset 3
        let result = searcher.search_name("O").await.unwrap();
        assert_eq!(result.candidate(), Some("15"));
        assert_eq!(result.position(), Some(3));
    }

    #[tokio::test]
    async fn test_search_name_without_letters_is_input_error() {
        let searcher = searcher();
        let err = searcher.search_name("1234").await.unwrap_err();
        assert!(err.is_input_error());
        assert!(!searcher.cache.is_loaded(), "no load for a rejected query");
    }

    #[tokio::test]
    async fn test_search_date_out_of_range_is_input_error() {
        let searcher = searcher();
        assert!(searcher.search_date(9, 79, 1991).await.unwrap_err().is_input_error());
        assert!(searcher.search_date(13, 1, 1991).await.unwrap_err().is_input_error());
        assert!(searcher.search_date(1, 1, 0).await.unwrap_err().is_input_error());
    }

    #[tokio::test]
    async fn test_search_date_not_found_lists_all_candidates() {
        let searcher = searcher();
        let result = searcher.search_date(5, 30, 2384).await.unwrap();
        assert_eq!(
            result,
            MatchResult::NotFound {
                tried: vec![
                    "05302384".to_string(),
                    "5302384".to_string(),
                    "053084".to_string(),
                    "53084".to_string(),
                ]
            }
        );
    }

    #[tokio::test]
    async fn test_search_date_falls_through_to_later_candidates() {
        let searcher = searcher();

        let result = searcher.search_date(3, 27, 9502).await.unwrap();
        assert_eq!(result.candidate(), Some("3279502"));
        assert_eq!(result.position(), Some(27));

        let result = searcher.search_date(3, 23, 1984).await.unwrap();
        assert_eq!(result.candidate(), Some("32384"));
        assert_eq!(result.position(), Some(15));
        assert_eq!(result.tried().len(), 4);
    }

    #[tokio::test]
    async fn test_report_adds_context() {
        let searcher = searcher();
        let result = searcher.search_name("O").await.unwrap();
        match searcher.report(result).await.unwrap() {
            MatchReport::Found(found) => {
                assert_eq!(found.context.before, "314");
                assert_eq!(found.context.matched, "15");
                assert_eq!(found.context.after, "92653");
                assert_eq!(found.corpus_len, 50);
                assert_eq!(found.percentage_label(), "6.00");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_corpus_loaded_once_across_searches() {
        let searcher = searcher();
        searcher.search_name("ada").await.unwrap();
        searcher.search_name("zed").await.unwrap();
        searcher.search_date(1, 1, 2000).await.unwrap();

        let stats = searcher.metrics().get_stats();
        assert_eq!(stats.corpus_fetches, 1);
        assert_eq!(stats.cache_hits, 2);
        assert_eq!(stats.searches, 3);
    }

    #[tokio::test]
    async fn test_empty_candidate_list_is_rejected() {
        let searcher = searcher();
        assert!(searcher
            .search_candidates(Vec::new())
            .await
            .unwrap_err()
            .is_input_error());
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_errors() {
        let searcher = searcher().with_thread_count(NonZeroUsize::new(2).unwrap());
        let inputs = vec![
            "O".to_string(),
            "123".to_string(),
            "3/23/1984".to_string(),
            "13/1/2000".to_string(),
        ];

        let entries = searcher.search_batch(&inputs).await.unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].input, "O");
        assert!(entries[0].outcome.as_ref().unwrap().is_found());
        assert!(entries[1].outcome.as_ref().unwrap_err().is_input_error());
        assert!(entries[2].outcome.as_ref().unwrap().is_found());
        assert!(entries[3].outcome.as_ref().unwrap_err().is_input_error());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_batch_leaves_runtime_free_for_other_tasks() {
        let searcher = searcher().with_thread_count(NonZeroUsize::new(2).unwrap());
        let inputs: Vec<String> = (0..64).map(|i| format!("{}/1/2000", i % 12 + 1)).collect();

        let ticker = tokio::spawn(async {
            tokio::task::yield_now().await;
            "ticked"
        });
        let entries = searcher.search_batch(&inputs).await.unwrap();

        assert_eq!(ticker.await.unwrap(), "ticked");
        assert_eq!(entries.len(), 64);
        assert_eq!(searcher.metrics().get_stats().searches, 64);
    }

    #[tokio::test]
    async fn test_searchers_sharing_a_cache_fetch_once() {
        let cache = Arc::new(CorpusCache::new());
        let first = searcher().with_cache(Arc::clone(&cache));
        let second = searcher().with_cache(Arc::clone(&cache));

        first.search_name("O").await.unwrap();
        second.search_name("ada").await.unwrap();

        assert!(Arc::ptr_eq(first.cache(), second.cache()));
        assert_eq!(first.metrics().get_stats().corpus_fetches, 1);
        assert_eq!(second.metrics().get_stats().corpus_fetches, 0);
        assert_eq!(second.metrics().get_stats().cache_hits, 1);
    }

    #[tokio::test]
    async fn test_batch_fails_when_corpus_unavailable() {
        let searcher = PiSearcher::new(FileCorpusSource::new("/definitely/not/here/pi.txt"));
        let err = searcher.search_batch(&["ada".to_string()]).await.unwrap_err();
        assert!(matches!(err, SearchError::CorpusUnavailable { .. }));
    }
}
