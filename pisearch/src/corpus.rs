use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::{SearchError, SearchResult};
use crate::metrics::SearchMetrics;
use crate::source::CorpusSource;

/// Removes every whitespace character from `raw`, keeping everything else in order.
///
/// Digits are not validated here. Already-normalized input is borrowed back
/// unchanged, which also makes the function idempotent.
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if raw.chars().any(char::is_whitespace) {
        Cow::Owned(raw.chars().filter(|c| !c.is_whitespace()).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// An immutable sequence of ASCII decimal digits.
///
/// Every character is one byte, so byte offsets and digit positions coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    digits: Box<str>,
}

impl Corpus {
    /// Builds a corpus from raw source text.
    ///
    /// Whitespace is stripped, then any leading non-digit marker (a BOM, a
    /// label) and a decimal point right after the first digit are dropped, so
    /// `"3.14159 26535"` becomes `"31415926535"`. Whatever remains must be a
    /// non-empty run of ASCII digits.
    pub fn from_raw(raw: &str) -> SearchResult<Self> {
        let normalized = normalize(raw);
        let body = normalized.trim_start_matches(|c: char| !c.is_ascii_digit());

        let digits: Box<str> = match body.as_bytes() {
            [first, b'.', ..] if first.is_ascii_digit() => {
                let mut joined = String::with_capacity(body.len() - 1);
                joined.push_str(&body[..1]);
                joined.push_str(&body[2..]);
                joined.into_boxed_str()
            }
            _ => body.into(),
        };

        if digits.is_empty() {
            return Err(SearchError::invalid_corpus("no digits found in corpus text"));
        }
        if let Some((offset, ch)) = digits.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(SearchError::invalid_corpus(format!(
                "unexpected character {ch:?} at digit offset {offset}"
            )));
        }

        Ok(Self { digits })
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Leftmost occurrence of `needle`
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.digits.find(needle)
    }

    /// Returns the digits in `range`, clamped to the corpus bounds
    pub fn slice(&self, range: Range<usize>) -> &str {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        &self.digits[start..end]
    }
}

static PROCESS_CACHE: Lazy<Arc<CorpusCache>> = Lazy::new(|| Arc::new(CorpusCache::new()));

/// Cell holding the loaded corpus.
///
/// The cell is either empty, being filled by exactly one in-flight load that
/// concurrent callers wait on, or filled. A failed load leaves it empty so the
/// next caller fetches again.
///
/// A cache is not keyed by source: every searcher handed the same cache must
/// read the same corpus. [`CorpusCache::global`] is the one cache for the
/// whole process.
#[derive(Debug, Default)]
pub struct CorpusCache {
    cell: OnceCell<Arc<Corpus>>,
}

impl CorpusCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache; every call returns the same instance
    pub fn global() -> Arc<CorpusCache> {
        Arc::clone(&PROCESS_CACHE)
    }

    /// Returns the cached corpus, if a load has already succeeded
    pub fn get(&self) -> Option<Arc<Corpus>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the cached corpus, fetching and normalizing it on first use
    pub async fn get_or_load<S>(
        &self,
        source: &S,
        metrics: &SearchMetrics,
    ) -> SearchResult<Arc<Corpus>>
    where
        S: CorpusSource + ?Sized,
    {
        if let Some(corpus) = self.cell.get() {
            metrics.record_cache_hit();
            return Ok(Arc::clone(corpus));
        }

        let corpus = self
            .cell
            .get_or_try_init(|| async {
                info!("Loading corpus from {}", source.describe());
                metrics.record_fetch();
                let raw = source.fetch().await.map_err(|e| {
                    warn!("Corpus load failed, cache left empty: {}", e);
                    metrics.record_fetch_failure();
                    e
                })?;
                let corpus = Corpus::from_raw(&raw).map_err(|e| {
                    metrics.record_fetch_failure();
                    e
                })?;
                debug!("Corpus ready with {} digits", corpus.len());
                Ok::<_, SearchError>(Arc::new(corpus))
            })
            .await?;

        Ok(Arc::clone(corpus))
    }
}
