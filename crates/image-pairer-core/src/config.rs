use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration for the image pairing process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the images to find matches for (set A)
    pub directory_a: PathBuf,

    /// Directory holding the match candidates (set B)
    pub directory_b: PathBuf,

    /// Scratch directory for cached thumbnails (must already exist)
    pub cache_dir: PathBuf,

    /// File extensions eligible for comparison
    pub allowed_extensions: Vec<String>,

    /// Where to persist the match results as JSON
    pub results_path: PathBuf,

    /// Where to write the HTML report
    pub report_path: PathBuf,

    /// How many set-A items to match concurrently
    pub match_concurrency: usize,

    /// Log level
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory_a: PathBuf::from("without-id"),
            directory_b: PathBuf::from("with-id"),
            cache_dir: PathBuf::from("thumbnails"),
            allowed_extensions: vec!["tif".to_string(), "jpg".to_string()],
            results_path: PathBuf::from("pair-results.json"),
            report_path: PathBuf::from("pair-report.html"),
            match_concurrency: 2,
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Configuration(format!("Failed to open config file: {}", e)))?;

        let config: Config = serde_json::from_reader(file)
            .map_err(|e| Error::Configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let file = std::fs::File::create(path)
            .map_err(|e| Error::Configuration(format!("Failed to create config file: {}", e)))?;

        serde_json::to_writer_pretty(file, self)
            .map_err(|e| Error::Configuration(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate the configuration before running
    pub fn validate(&self) -> Result<()> {
        for dir in [&self.directory_a, &self.directory_b] {
            if !dir.is_dir() {
                return Err(Error::Configuration(format!(
                    "Source directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        // The cache directory is never created implicitly
        if !self.cache_dir.is_dir() {
            return Err(Error::Configuration(format!(
                "Cache directory does not exist: {}",
                self.cache_dir.display()
            )));
        }

        if self.allowed_extensions.is_empty() {
            return Err(Error::Configuration(
                "At least one allowed extension is required".to_string(),
            ));
        }

        if self.match_concurrency == 0 {
            return Err(Error::Configuration(
                "match_concurrency must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
