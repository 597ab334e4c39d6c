/// This module defines the error taxonomy for pisearch.
///
/// Three outcomes are kept apart on purpose:
///
/// 1. **Input errors** - the caller asked for something that cannot be searched
///    (a month of 13, a name without a single Latin letter).
/// 2. **Corpus errors** - the digits could not be fetched or are not digits.
/// 3. **Not found** - not an error at all. A search that ran and matched nothing
///    returns [`MatchResult::NotFound`](crate::results::MatchResult::NotFound).
///
/// ```rust,ignore
/// match searcher.search_name("1234").await {
///     Ok(MatchResult::Found { .. }) => // render the match,
///     Ok(MatchResult::NotFound { tried }) => // list what was tried,
///     Err(SearchError::InputError(msg)) => // ask for letters,
///     Err(e) => // corpus or config trouble
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur while loading the corpus or running a search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InputError(String),
    #[error("Corpus unavailable from {source_name}: {reason}")]
    CorpusUnavailable { source_name: String, reason: String },
    #[error("Invalid corpus: {0}")]
    InvalidCorpus(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid UTF-8 in corpus file {path}: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
    #[error("Batch worker failed: {0}")]
    BatchFailed(String),
}

impl SearchError {
    pub fn input_error(msg: impl Into<String>) -> Self {
        Self::InputError(msg.into())
    }

    pub fn corpus_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CorpusUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_corpus(msg: impl Into<String>) -> Self {
        Self::InvalidCorpus(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn encoding_error(path: impl AsRef<Path>, source: std::string::FromUtf8Error) -> Self {
        Self::EncodingError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors caused by the caller's query rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputError(_))
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<tokio::task::JoinError> for SearchError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::BatchFailed(err.to_string())
    }
}
