use std::path::Path;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// List the filenames directly inside a source directory.
///
/// The listing is flat (subdirectories are not descended into) and captured
/// once at startup; nothing re-scans mid-run. Names are sorted so the
/// candidate enumeration order, and hence tie-breaking during selection, is
/// deterministic across platforms.
///
/// No extension filtering happens here; the matcher applies the allow-list.
pub fn list_directory(directory: &Path) -> Result<Vec<String>> {
    if !directory.is_dir() {
        return Err(Error::FileNotFound(directory.to_path_buf()));
    }

    let mut names: Vec<String> = WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.file_name().to_str().map(|s| s.to_string()))
        .collect();

    names.sort();

    Ok(names)
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn create_file(dir: &Path, name: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(b"DUMMY DATA").unwrap();
    }

    #[test]
    fn test_list_directory_sorted() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "zebra.jpg");
        create_file(dir.path(), "apple.tif");
        create_file(dir.path(), "mango.jpg");

        let names = list_directory(dir.path()).unwrap();
        assert_eq!(names, vec!["apple.tif", "mango.jpg", "zebra.jpg"]);
    }

    #[test]
    fn test_list_directory_skips_subdirectories() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "top.jpg");

        let subdir = dir.path().join("nested");
        fs::create_dir(&subdir).unwrap();
        create_file(&subdir, "hidden.jpg");

        let names = list_directory(dir.path()).unwrap();
        assert_eq!(names, vec!["top.jpg"]);
    }

    #[test]
    fn test_list_directory_does_not_filter_extensions() {
        let dir = tempdir().unwrap();
        create_file(dir.path(), "notes.txt");
        create_file(dir.path(), "scan.tif");

        let names = list_directory(dir.path()).unwrap();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_list_directory_nonexistent() {
        let result = list_directory(Path::new("/path/that/does/not/exist"));
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }
}
