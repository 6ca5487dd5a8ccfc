//! Configuration schema for Kotoba.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Log levels accepted by `logging.level`.
pub const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Root config for the Kotoba tool.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KotobaConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub review: ReviewConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KotobaConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> KotobaConfigBuilder {
        KotobaConfigBuilder::new()
    }
}

/// Builder for assembling a `KotobaConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct KotobaConfigBuilder {
    config: KotobaConfig,
}

impl KotobaConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: KotobaConfig::default(),
        }
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.config.storage = storage;
        self
    }

    pub fn review(mut self, review: ReviewConfig) -> Self {
        self.config.review = review;
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    pub fn build(self) -> KotobaConfig {
        self.config
    }
}

/// Where the word collection lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Data file; relative paths resolve against the working directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

impl StorageConfig {
    pub fn resolve_path(&self, base: &Path) -> PathBuf {
        resolve(base, &self.path)
    }
}

fn default_storage_path() -> String {
    "words_data.json".to_string()
}

/// Review session defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewConfig {
    #[serde(default = "default_review_count")]
    pub count: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            count: default_review_count(),
        }
    }
}

fn default_review_count() -> usize {
    10
}

/// Log file location, level, and rotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_log_file")]
    pub file: String,
    /// One of [`LOG_LEVELS`]; `RUST_LOG` still overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Size at which the log file is rotated.
    #[serde(default = "default_log_max_bytes")]
    pub max_bytes: u64,
    /// Rotated files kept besides the active one.
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_log_file(),
            level: default_log_level(),
            max_bytes: default_log_max_bytes(),
            max_files: default_log_max_files(),
        }
    }
}

impl LoggingConfig {
    /// Active log file path.
    pub fn log_path(&self, base: &Path) -> PathBuf {
        resolve(base, &self.dir).join(&self.file)
    }
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_file() -> String {
    "app.log".to_string()
}

fn default_log_level() -> String {
    "error".to_string()
}

fn default_log_max_bytes() -> u64 {
    1024 * 1024
}

fn default_log_max_files() -> usize {
    5
}

fn resolve(base: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
