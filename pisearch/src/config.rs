use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};
use crate::search::context::DEFAULT_CONTEXT_RADIUS;

/// Settings for loading the corpus and presenting matches.
///
/// # Configuration Locations
///
/// Sources are layered, later ones overriding earlier ones:
/// 1. Global `$HOME/.config/pisearch/config.yaml`
/// 2. Local `.pisearch.yaml` in the current directory
/// 3. Custom config file specified via `--config`
///
/// Command-line flags override all of them, see [`PiConfig::merge_with_cli`].
///
/// # Configuration Format
///
/// ```yaml
/// # Text file holding the digits of pi
/// corpus_path: "data/pi-million.txt"
///
/// # Digits shown before and after a match
/// context_radius: 25
///
/// # Worker threads for batch searches (default: CPU cores)
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiConfig {
    /// Text file holding the corpus digits
    #[serde(default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Maximum digits shown on each side of a match
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,

    /// Number of threads used by batch searches
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("pi-digits.txt")
}

fn default_context_radius() -> usize {
    DEFAULT_CONTEXT_RADIUS
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            corpus_path: default_corpus_path(),
            context_radius: default_context_radius(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

/// Values given on the command line; `None` means "not specified"
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub corpus_path: Option<PathBuf>,
    pub context_radius: Option<usize>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
}

impl PiConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration, layering `config_path` over the default locations.
    ///
    /// An explicitly named file must exist; the default locations are optional.
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(SearchError::config_error(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("pisearch/config.yaml")),
            Some(PathBuf::from(".pisearch.yaml")),
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot produce a usable searcher
    pub fn validate(&self) -> SearchResult<()> {
        if self.corpus_path.as_os_str().is_empty() {
            return Err(SearchError::config_error("corpus_path must not be empty"));
        }
        Ok(())
    }

    /// Applies command-line values on top of file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(path) = cli.corpus_path {
            self.corpus_path = path;
        }
        if let Some(radius) = cli.context_radius {
            self.context_radius = radius;
        }
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }
}
