//! Core functionality for pairing visually similar images across two
//! directory trees.
//!
//! This library provides the foundational components for image pairing:
//! - Flat directory listing of the two source sets
//! - A lazy, on-disk thumbnail cache
//! - Dimension pre-filtering and perceptual difference scoring
//! - The pairwise matcher and bounded-concurrency batch orchestrator
//! - Result persistence and HTML report rendering
//! - Canonical filename suggestions with explicit, opt-in renaming

use log::info;

// -- Internal Modules --
mod error;

// -- Public Re-exports --
pub use config::*;
pub use error::{Error, Result};
pub use types::*;

// -- Public Modules --
pub mod config;
pub mod discovery;
pub mod logging;
pub mod matching;
pub mod persistence;
pub mod rename;
pub mod report;
pub mod scoring;
pub mod thumbnail;
pub mod types;

use matching::Matcher;
use thumbnail::ThumbnailCache;

/// Main entry point for the pairing process
pub struct ImagePairer {
    config: Config,
    cache: ThumbnailCache,
}

impl ImagePairer {
    /// Create a new ImagePairer with the provided configuration
    pub fn new(config: Config) -> Self {
        let cache = ThumbnailCache::new(config.cache_dir.clone());
        Self { config, cache }
    }

    /// Run the full pipeline: discover both sets, match, persist the
    /// results, then render the report.
    ///
    /// Results are persisted before reporting so a later run can rebuild
    /// the report without re-matching.
    pub fn run(&self) -> Result<()> {
        info!("Listing source directories...");
        let files_a = discovery::list_directory(&self.config.directory_a)?;
        let files_b = discovery::list_directory(&self.config.directory_b)?;
        info!(
            "Found {} files in A, {} files in B",
            files_a.len(),
            files_b.len()
        );

        let matcher = Matcher::new(&self.config, &self.cache, &files_b);
        let results = matcher.run_all(&files_a)?;
        info!("Matched {} of {} files", results.len(), files_a.len());

        persistence::save_results(&self.config.results_path, &results)?;
        report::write_report(&self.config, &self.cache, &results)?;

        Ok(())
    }

    /// Rebuild the HTML report from previously persisted results,
    /// skipping the matching phase entirely.
    pub fn rebuild_report(&self) -> Result<()> {
        let results = persistence::load_results(&self.config.results_path)?;
        info!(
            "Loaded {} results from {}",
            results.len(),
            self.config.results_path.display()
        );

        report::write_report(&self.config, &self.cache, &results)
    }

    /// Load persisted results and derive the renames they propose
    pub fn planned_renames(&self) -> Result<Vec<rename::ProposedRename>> {
        let results = persistence::load_results(&self.config.results_path)?;

        Ok(results
            .iter()
            .flat_map(|r| rename::plan_renames(&self.config, r))
            .filter(|p| !p.is_noop())
            .collect())
    }
}

// -- Tests --
