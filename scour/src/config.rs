use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for one search run.
///
/// Constructed once at startup and passed by reference into the engine;
/// nothing in the pipeline mutates it. The pattern, roots, and match flags
/// come from the caller (the CLI), while the remaining knobs can also be
/// loaded from a YAML config file, in order of precedence:
/// 1. Custom config file specified via `--config`
/// 2. Local `.scour.yaml` in the current directory
/// 3. Global `$CONFIG_DIR/scour/config.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The search pattern (a regular expression)
    #[serde(skip)]
    pub pattern: String,

    /// Root directories to walk, in order
    #[serde(skip)]
    pub roots: Vec<PathBuf>,

    /// Case-insensitive matching. Applied by rewriting the pattern source
    /// with a `(?i)` prefix before compilation.
    #[serde(skip)]
    pub case_insensitive: bool,

    /// Report lines that do not match instead of lines that do
    #[serde(skip)]
    pub invert_match: bool,

    /// Size of the worker pool scanning files
    #[serde(default = "default_workers")]
    pub workers: NonZeroUsize,

    /// Ignore-pattern sources, loaded in order when present.
    /// Nonexistent entries contribute nothing.
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(20).unwrap()
}

fn default_ignore_files() -> Vec<PathBuf> {
    [".gitignore", ".git/info/exclude", ".fdignore"]
        .iter()
        .map(PathBuf::from)
        .collect()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            roots: Vec::new(),
            case_insensitive: false,
            invert_match: false,
            workers: default_workers(),
            ignore_files: default_ignore_files(),
            log_level: default_log_level(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file, falling back to the
    /// default locations
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("scour/config.yaml")),
            // Local config
            Some(PathBuf::from(".scour.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder.build()?.try_deserialize()
    }

    /// The read-only matching flags shared by every worker
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_insensitive: self.case_insensitive,
            invert: self.invert_match,
        }
    }
}

/// A snapshot of the matching flags, fixed for the whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub case_insensitive: bool,
    pub invert: bool,
}
