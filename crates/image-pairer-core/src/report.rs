//! HTML report rendering.
//!
//! One fragment per match result: the two thumbnails side by side, the raw
//! match record, the suggested canonical title, and the proposed rename
//! commands as displayed text. Fragment failures are logged and skipped;
//! one bad result never costs the rest of the report.

use log::{info, warn};
use std::fs;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::rename;
use crate::thumbnail::ThumbnailCache;
use crate::types::{FileEntry, MatchResult};

/// Render one result as an HTML fragment.
///
/// Returns `Ok(None)` when the pair already shares a title; there is
/// nothing to review for such results.
fn render_fragment(
    config: &Config,
    cache: &ThumbnailCache,
    result: &MatchResult,
) -> Result<Option<String>> {
    let entry_a = FileEntry::new(result.file_name_from_a.as_str());
    let entry_b = FileEntry::new(result.file_name_from_b.as_str());
    if entry_a.title() == entry_b.title() {
        return Ok(None);
    }

    let thumb_a = cache
        .get(&config.directory_a, &result.file_name_from_a)?
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let thumb_b = cache
        .get(&config.directory_b, &result.file_name_from_b)?
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    let new_title = rename::suggest_title(result);
    let record = serde_json::to_string_pretty(result)?;

    let commands: Vec<String> = rename::plan_renames(config, result)
        .iter()
        .filter(|p| !p.is_noop())
        .map(|p| p.as_command())
        .collect();

    let fragment = format!(
        r#"
        <img src="file://{thumb_a}"/>
        <img src="file://{thumb_b}"/>
        <pre>{record}</pre>
        <pre>Suggested Title: {new_title}</pre>
        <code style='background-color: black; color: white; padding: 2rem; display: block;'>
          {commands}
        </code>
        <br/>
        <br/>
"#,
        commands = commands.join("\n          "),
    );

    Ok(Some(fragment))
}

/// Concatenate the fragments for all results into one HTML document
pub fn render_report(config: &Config, cache: &ThumbnailCache, results: &[MatchResult]) -> String {
    let mut html = String::new();

    for result in results {
        match render_fragment(config, cache, result) {
            Ok(Some(fragment)) => html.push_str(&fragment),
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Skipping report fragment for {}: {}",
                    result.file_name_from_a, e
                );
            }
        }
    }

    html
}

/// Render the report and write it to the configured path
pub fn write_report(config: &Config, cache: &ThumbnailCache, results: &[MatchResult]) -> Result<()> {
    let html = render_report(config, cache, results);
    fs::write(&config.report_path, html).map_err(|e| {
        Error::Report(format!(
            "Failed to write {}: {}",
            config.report_path.display(),
            e
        ))
    })?;

    info!("Report written to {}", config.report_path.display());

    Ok(())
}

// -- Tests --
