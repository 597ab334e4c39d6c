//! Find dates and names hidden in the digits of pi.
//!
//! ```rust,ignore
//! use pisearch::{PiSearcher, StaticCorpusSource};
//!
//! let searcher = PiSearcher::new(StaticCorpusSource::new("3.14159265358979"));
//! let result = searcher.search_name("Ada").await?; // "141" at offset 1
//! let report = searcher.report(result).await?;
//! ```
pub mod candidates;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod metrics;
pub mod query;
pub mod results;
pub mod search;
pub mod source;

pub use candidates::{date_candidates, name_candidates};
pub use crate::config::{CliOverrides, PiConfig};
pub use corpus::{normalize, Corpus, CorpusCache};
pub use errors::{SearchError, SearchResult};
pub use metrics::{SearchMetrics, SearchStats};
pub use query::{DateQuery, Query};
pub use results::{ContextWindow, FoundMatch, MatchReport, MatchResult};
pub use search::{format_context, search, BatchEntry, PiSearcher};
pub use source::{CorpusSource, FileCorpusSource, StaticCorpusSource};
