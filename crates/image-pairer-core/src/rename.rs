use log::info;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::types::{FileEntry, MatchResult};

/// Filename prefixes produced by scanners and export tools rather than
/// people. A title starting with one of these carries no descriptive value,
/// so the other side's title is preferred.
const GENERATED_PREFIXES: [&str; 3] = ["artworkCJ", "A_0", "JACK"];

fn is_machine_generated(title: &str) -> bool {
    GENERATED_PREFIXES.iter().any(|p| title.starts_with(p))
}

/// Pick the canonical title for a matched pair, before normalization.
///
/// A machine-generated title defers to the other side, which gets the
/// generated title appended as a suffix unless it already carries it.
/// When both titles are human-written the longer one wins, B on equal
/// length.
fn rename_core(result: &MatchResult) -> String {
    let entry_a = FileEntry::new(result.file_name_from_a.as_str());
    let entry_b = FileEntry::new(result.file_name_from_b.as_str());
    let title_a = entry_a.title();
    let title_b = entry_b.title();

    if is_machine_generated(title_a) {
        if title_b.ends_with(title_a) {
            return title_b.to_string();
        }
        return format!("{}_{}", title_b, title_a);
    }

    if is_machine_generated(title_b) {
        if title_a.ends_with(title_b) {
            return title_a.to_string();
        }
        return format!("{}_{}", title_a, title_b);
    }

    if title_a.len() > title_b.len() {
        title_a.to_string()
    } else {
        title_b.to_string()
    }
}

/// Suggest a canonical title for a matched pair.
///
/// Two single-occurrence substitutions run in a fixed order: the `A_0`
/// scanner prefix is rewritten to `A00` first, then one space becomes an
/// underscore. Swapping them would let the space rewrite disturb offsets
/// the prefix rewrite matches against.
pub fn suggest_title(result: &MatchResult) -> String {
    rename_core(result)
        .replacen("A_0", "A00", 1)
        .replacen(' ', "_", 1)
}

/// A rename the system proposes but never executes on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedRename {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl ProposedRename {
    /// True when the file already carries the suggested name
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// Render as shell text for the report
    pub fn as_command(&self) -> String {
        format!("mv \"{}\" \"{}\"", self.from.display(), self.to.display())
    }

    /// Execute the rename. Only the explicit apply path calls this.
    pub fn apply(&self) -> Result<()> {
        fs::rename(&self.from, &self.to)?;
        info!("Renamed {} -> {}", self.from.display(), self.to.display());
        Ok(())
    }
}

/// Derive the two renames a match result implies.
///
/// Both targets take set A's extension, preserving the original archive
/// layout where set A holds the master format.
pub fn plan_renames(config: &Config, result: &MatchResult) -> Vec<ProposedRename> {
    let new_title = suggest_title(result);
    let entry_a = FileEntry::new(result.file_name_from_a.as_str());
    let new_name = match entry_a.extension() {
        Some(ext) => format!("{}.{}", new_title, ext),
        None => new_title,
    };

    vec![
        ProposedRename {
            from: config.directory_a.join(&result.file_name_from_a),
            to: config.directory_a.join(&new_name),
        },
        ProposedRename {
            from: config.directory_b.join(&result.file_name_from_b),
            to: config.directory_b.join(&new_name),
        },
    ]
}

// -- Tests --
