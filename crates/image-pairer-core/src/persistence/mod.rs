//! Durable checkpoint between the matching and reporting phases.
//!
//! Results are written as pretty-printed JSON so the file doubles as a
//! human-reviewable artifact, and can be re-read by a later run to rebuild
//! the report without re-matching.

use log::info;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::MatchResult;

/// Write the sorted result set to `path` as pretty-printed JSON
pub fn save_results(path: &Path, results: &[MatchResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;

    info!("Persisted {} match results to {}", results.len(), path.display());

    Ok(())
}

/// Re-read a previously persisted result set
pub fn load_results(path: &Path) -> Result<Vec<MatchResult>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let json = fs::read_to_string(path)?;
    let results: Vec<MatchResult> = serde_json::from_str(&json)?;

    Ok(results)
}

#[cfg(test)]
mod tests;
