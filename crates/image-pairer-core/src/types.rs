use serde::{Deserialize, Serialize};

/// A filename belonging to one of the two source sets.
///
/// The title/extension split takes the *first* dot: `a.b.c` has title `a`
/// and extension `b`, with later segments ignored. Multi-dot filenames are
/// rare in the scanned archives and the first-split behavior is what the
/// allow-list was tuned against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
}

impl FileEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Text before the first dot
    pub fn title(&self) -> &str {
        self.name.split('.').next().unwrap_or("")
    }

    /// Segment between the first and second dot, if any
    pub fn extension(&self) -> Option<&str> {
        self.name.split('.').nth(1)
    }

    /// Whether the extension is on the allow-list (case-sensitive)
    pub fn is_allowed(&self, allowed: &[String]) -> bool {
        match self.extension() {
            Some(ext) => allowed.iter().any(|a| a == ext),
            None => false,
        }
    }
}

/// Pixel dimensions of a thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// One scored comparison against a set-B candidate
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    /// Perceptual difference; 0 is a perfect match
    pub equality: f64,

    /// The set-B filename this score was computed against
    pub file_name_from_b: String,
}

/// The best candidate found for one set-A file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Perceptual difference; 0 is a perfect match
    pub equality: f64,

    /// The winning set-B filename
    pub file_name_from_b: String,

    /// The set-A filename this result belongs to
    pub file_name_from_a: String,
}

impl MatchResult {
    pub fn from_candidate(candidate: MatchCandidate, file_name_from_a: &str) -> Self {
        Self {
            equality: candidate.equality,
            file_name_from_b: candidate.file_name_from_b,
            file_name_from_a: file_name_from_a.to_string(),
        }
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;

    fn allow() -> Vec<String> {
        vec!["tif".to_string(), "jpg".to_string()]
    }

    #[test]
    fn test_title_and_extension_split() {
        let entry = FileEntry::new("cat.jpg");
        assert_eq!(entry.title(), "cat");
        assert_eq!(entry.extension(), Some("jpg"));
    }

    #[test]
    fn test_multi_dot_takes_first_split() {
        // "archive.tar.gz" splits at the first dot; the trailing segment
        // is ignored entirely
        let entry = FileEntry::new("archive.tar.gz");
        assert_eq!(entry.title(), "archive");
        assert_eq!(entry.extension(), Some("tar"));
    }

    #[test]
    fn test_no_extension() {
        let entry = FileEntry::new("README");
        assert_eq!(entry.title(), "README");
        assert_eq!(entry.extension(), None);
        assert!(!entry.is_allowed(&allow()));
    }

    #[test]
    fn test_allow_list() {
        assert!(FileEntry::new("scan.tif").is_allowed(&allow()));
        assert!(FileEntry::new("photo.jpg").is_allowed(&allow()));
        assert!(!FileEntry::new("doc.pdf").is_allowed(&allow()));
        assert!(!FileEntry::new("img.png").is_allowed(&allow()));
        // Case-sensitive, as the original archive tooling was
        assert!(!FileEntry::new("photo.JPG").is_allowed(&allow()));
    }

    #[test]
    fn test_result_from_candidate() {
        let candidate = MatchCandidate {
            equality: 0.25,
            file_name_from_b: "b.jpg".to_string(),
        };
        let result = MatchResult::from_candidate(candidate, "a.jpg");
        assert_eq!(result.equality, 0.25);
        assert_eq!(result.file_name_from_b, "b.jpg");
        assert_eq!(result.file_name_from_a, "a.jpg");
    }
}
