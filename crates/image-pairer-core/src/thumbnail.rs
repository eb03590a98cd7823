use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

/// Distinguishes concurrent writers within one process; the pid alone
/// cannot, since the matcher runs on a thread pool.
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Thumbnail edge length; images are scaled to fit within this square
pub const THUMBNAIL_SIZE: u32 = 200;

/// On-disk cache of downscaled images, shared by the matcher and the
/// report renderer.
///
/// Entries are keyed by a blake3 digest of `directory + filename`, so the
/// key is content-independent and stable across runs. A file present at the
/// derived path is always treated as a valid hit; the cache is never
/// invalidated automatically. Stale entries can only be dropped by clearing
/// the cache directory by hand.
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    cache_dir: PathBuf,
}

impl ThumbnailCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// Get the cached thumbnail for `(directory, filename)`, creating it on
    /// first access.
    ///
    /// Returns `Ok(None)` when either argument is empty; callers treat that
    /// as "no thumbnail available", not as an error. Decode or write
    /// failures surface as `Error::Image`.
    pub fn get(&self, directory: &Path, filename: &str) -> Result<Option<PathBuf>> {
        if directory.as_os_str().is_empty() || filename.is_empty() {
            return Ok(None);
        }

        let cache_path = self.cache_path(directory, filename);
        if cache_path.exists() {
            return Ok(Some(cache_path));
        }

        let source = directory.join(filename);
        let img = image::open(&source)?;
        let thumb = img
            .thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE)
            .to_rgb8();

        // Write to a scratch name first and rename into place, so a
        // concurrent reader never observes a truncated entry. The scratch
        // name is unique per call: two pool threads racing on the same key
        // must not truncate each other's in-flight write.
        let nonce = TMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_path =
            cache_path.with_extension(format!("tmp{}-{}", std::process::id(), nonce));
        thumb.save_with_format(&tmp_path, image::ImageFormat::Jpeg)?;
        fs::rename(&tmp_path, &cache_path)?;

        debug!(
            "Cached thumbnail for {} at {}",
            source.display(),
            cache_path.display()
        );

        Ok(Some(cache_path))
    }

    /// Derive the cache path for a source image
    fn cache_path(&self, directory: &Path, filename: &str) -> PathBuf {
        let mut hasher = blake3::Hasher::new();
        hasher.update(directory.to_string_lossy().as_bytes());
        hasher.update(filename.as_bytes());
        let digest = hasher.finalize().to_hex();

        self.cache_dir.join(format!("{}.jpg", digest))
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use tempfile::tempdir;

    fn create_source_image(dir: &Path, name: &str, width: u32, height: u32) {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_empty_arguments_return_none() {
        let cache_dir = tempdir().unwrap();
        let cache = ThumbnailCache::new(cache_dir.path());

        assert!(cache.get(Path::new(""), "x.jpg").unwrap().is_none());
        assert!(cache.get(Path::new("/tmp"), "").unwrap().is_none());
    }

    #[test]
    fn test_creates_and_scales_thumbnail() {
        let source_dir = tempdir().unwrap();
        let cache_dir = tempdir().unwrap();
        create_source_image(source_dir.path(), "wide.jpg", 400, 200);

        let cache = ThumbnailCache::new(cache_dir.path());
        let thumb = cache.get(source_dir.path(), "wide.jpg").unwrap().unwrap();

        assert!(thumb.exists());
        let (w, h) = image::image_dimensions(&thumb).unwrap();
        assert_eq!((w, h), (200, 100));
    }

    #[test]
    fn test_cache_hit_skips_source() {
        let source_dir = tempdir().unwrap();
        let cache_dir = tempdir().unwrap();
        create_source_image(source_dir.path(), "img.jpg", 300, 300);

        let cache = ThumbnailCache::new(cache_dir.path());
        let first = cache.get(source_dir.path(), "img.jpg").unwrap().unwrap();

        // The source no longer exists, so a second call can only succeed
        // by hitting the cache.
        fs::remove_file(source_dir.path().join("img.jpg")).unwrap();
        let second = cache.get(source_dir.path(), "img.jpg").unwrap().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_concurrent_writers_for_same_key() {
        let source_dir = tempdir().unwrap();
        let cache_dir = tempdir().unwrap();
        create_source_image(source_dir.path(), "img.jpg", 400, 200);

        let cache = ThumbnailCache::new(cache_dir.path());

        // Several threads race to create the same entry, the way two
        // pool workers do when their A-items share a B candidate. Every
        // caller must get back a complete, decodable thumbnail.
        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let cache = &cache;
                    let dir = source_dir.path();
                    s.spawn(move || cache.get(dir, "img.jpg").unwrap().unwrap())
                })
                .collect();

            for handle in handles {
                let path = handle.join().unwrap();
                let (w, h) = image::image_dimensions(&path).unwrap();
                assert_eq!((w, h), (200, 100));
            }
        });

        // Exactly one cache entry, and no scratch files left behind
        let entries: Vec<_> = fs::read_dir(cache_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_distinct_sources_get_distinct_entries() {
        let source_dir = tempdir().unwrap();
        let other_dir = tempdir().unwrap();
        let cache_dir = tempdir().unwrap();
        create_source_image(source_dir.path(), "img.jpg", 250, 250);
        create_source_image(other_dir.path(), "img.jpg", 250, 250);

        let cache = ThumbnailCache::new(cache_dir.path());
        let a = cache.get(source_dir.path(), "img.jpg").unwrap().unwrap();
        let b = cache.get(other_dir.path(), "img.jpg").unwrap().unwrap();

        // Same filename, different directory: the key hashes both
        assert_ne!(a, b);
    }

    #[test]
    fn test_unreadable_source_is_an_image_error() {
        let source_dir = tempdir().unwrap();
        let cache_dir = tempdir().unwrap();
        fs::write(source_dir.path().join("broken.jpg"), b"not an image").unwrap();

        let cache = ThumbnailCache::new(cache_dir.path());
        let result = cache.get(source_dir.path(), "broken.jpg");

        assert!(matches!(result, Err(crate::error::Error::Image(_))));
    }
}
