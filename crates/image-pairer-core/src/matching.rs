use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use std::cmp::Ordering;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scoring;
use crate::thumbnail::ThumbnailCache;
use crate::types::{FileEntry, MatchCandidate, MatchResult};

/// Finds, for each file in set A, the best-matching file in set B.
pub struct Matcher<'a> {
    config: &'a Config,
    cache: &'a ThumbnailCache,
    files_b: &'a [String],
}

impl<'a> Matcher<'a> {
    pub fn new(config: &'a Config, cache: &'a ThumbnailCache, files_b: &'a [String]) -> Self {
        Self {
            config,
            cache,
            files_b,
        }
    }

    /// Find the best set-B match for one set-A file.
    ///
    /// Returns `Ok(None)` when the file's extension is not on the allow-list
    /// or no candidate survives the pre-filters. Thumbnailing and scoring
    /// errors abort this file's scan and propagate.
    pub fn match_one(&self, file_name_from_a: &str) -> Result<Option<MatchResult>> {
        let entry_a = FileEntry::new(file_name_from_a);
        if !entry_a.is_allowed(&self.config.allowed_extensions) {
            return Ok(None);
        }

        let mut candidates: Vec<MatchCandidate> = Vec::new();

        // Candidates are visited sequentially, in sorted order. One
        // in-flight comparison per A-item keeps the total number of heavy
        // image operations bounded by the outer pool width.
        for file_name_from_b in self.files_b {
            let entry_b = FileEntry::new(file_name_from_b.as_str());
            if !entry_b.is_allowed(&self.config.allowed_extensions) {
                continue;
            }

            if entry_a.title() == entry_b.title() {
                // An exact title match cannot be beaten, so stop scanning.
                // An earlier perceptual score of zero still wins under
                // stable selection.
                candidates.push(MatchCandidate {
                    equality: 0.0,
                    file_name_from_b: file_name_from_b.clone(),
                });
                break;
            }

            let thumb_a = self.cache.get(&self.config.directory_a, file_name_from_a)?;
            let thumb_b = self.cache.get(&self.config.directory_b, file_name_from_b)?;
            let (thumb_a, thumb_b) = match (thumb_a, thumb_b) {
                (Some(a), Some(b)) => (a, b),
                _ => continue,
            };

            let dims_a = scoring::read_dimensions(&thumb_a)?;
            let dims_b = scoring::read_dimensions(&thumb_b)?;
            if !scoring::dimensions_compatible(dims_a, dims_b) {
                continue;
            }

            let difference = scoring::compute_difference(&thumb_a, &thumb_b)?;
            candidates.push(MatchCandidate {
                equality: difference.equality,
                file_name_from_b: file_name_from_b.clone(),
            });
        }

        Ok(select_best(candidates).map(|c| MatchResult::from_candidate(c, file_name_from_a)))
    }

    /// Match every set-A file and return the collected results, sorted
    /// ascending by `equality`.
    ///
    /// Failures are isolated per file: an A-item whose scan errors is
    /// logged and dropped rather than aborting the batch, the same policy
    /// the report renderer applies to its fragments.
    pub fn run_all(&self, files_a: &[String]) -> Result<Vec<MatchResult>> {
        let threads = self.config.match_concurrency.min(num_cpus::get().max(1));
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build thread pool: {}", e)))?;

        let progress = ProgressBar::new(files_a.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        progress.set_message("Matching images...");

        let outcomes: Vec<(String, Result<Option<MatchResult>>)> = pool.install(|| {
            files_a
                .par_iter()
                .map(|name| {
                    let outcome = self.match_one(name);
                    progress.inc(1);
                    (name.clone(), outcome)
                })
                .collect()
        });

        progress.finish_with_message("Matching complete");

        let mut results = Vec::new();
        let mut failures = 0usize;
        for (name, outcome) in outcomes {
            match outcome {
                Ok(Some(result)) => results.push(result),
                Ok(None) => {}
                Err(e) => {
                    failures += 1;
                    warn!("Matching failed for {}: {}", name, e);
                }
            }
        }

        if failures > 0 {
            info!(
                "{} of {} files failed to match and were dropped",
                failures,
                files_a.len()
            );
        }

        results.sort_by(|a, b| {
            a.equality
                .partial_cmp(&b.equality)
                .unwrap_or(Ordering::Equal)
        });

        Ok(results)
    }
}

/// Pick the candidate with the minimum score; ties go to the
/// first-encountered candidate.
pub fn select_best(candidates: Vec<MatchCandidate>) -> Option<MatchCandidate> {
    candidates.into_iter().min_by(|a, b| {
        a.equality
            .partial_cmp(&b.equality)
            .unwrap_or(Ordering::Equal)
    })
}

// -- Tests --
