use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::errors::{SearchError, SearchResult};

/// Supplies the raw corpus text. Fetched at most once per successful load.
#[async_trait]
pub trait CorpusSource: Send + Sync {
    async fn fetch(&self) -> SearchResult<String>;

    /// Human-readable origin, used in logs and errors
    fn describe(&self) -> String;
}

/// Reads the corpus from a UTF-8 text file on disk
#[derive(Debug, Clone)]
pub struct FileCorpusSource {
    pub path: PathBuf,
}

impl FileCorpusSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CorpusSource for FileCorpusSource {
    async fn fetch(&self) -> SearchResult<String> {
        trace!("Reading corpus file: {}", self.path.display());

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            SearchError::corpus_unavailable(self.path.display().to_string(), e.to_string())
        })?;

        String::from_utf8(bytes).map_err(|e| SearchError::encoding_error(&self.path, e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory corpus text, handy for embedding and tests
#[derive(Debug, Clone)]
pub struct StaticCorpusSource {
    text: String,
}

impl StaticCorpusSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl CorpusSource for StaticCorpusSource {
    async fn fetch(&self) -> SearchResult<String> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.text.len())
    }
}
