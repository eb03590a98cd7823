use std::path::Path;

use crate::error::Result;
use crate::types::Dimensions;

/// Width of a dimension bucket in pixels
const BUCKET_SIZE: u32 = 8;

/// Outcome of a perceptual comparison between two thumbnails
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difference {
    /// True when the images are pixel-identical over their overlap
    pub is_equal: bool,

    /// Mean normalized pixel difference in `[0, 1]`; 0 is a perfect match
    pub equality: f64,
}

/// Cheap pre-filter applied before paying for a perceptual comparison.
///
/// Both width and height must fall in the same `floor(dim / 8)` bucket.
/// This tolerates the off-by-a-few-pixels differences that aspect-preserving
/// scaling produces, while rejecting grossly different shapes outright.
pub fn dimensions_compatible(a: Dimensions, b: Dimensions) -> bool {
    a.width / BUCKET_SIZE == b.width / BUCKET_SIZE
        && a.height / BUCKET_SIZE == b.height / BUCKET_SIZE
}

/// Read the pixel dimensions of a thumbnail without decoding it fully
pub fn read_dimensions(path: &Path) -> Result<Dimensions> {
    let (width, height) = image::image_dimensions(path)?;
    Ok(Dimensions { width, height })
}

/// Compute the perceptual difference between two thumbnails.
///
/// The score is the mean absolute per-channel difference over the
/// overlapping region, normalized to `[0, 1]`. Identical images score 0,
/// the metric is symmetric, and larger visual divergence scores strictly
/// higher. Decode failures propagate; they are never folded into
/// "no match" at this layer.
pub fn compute_difference(thumb_a: &Path, thumb_b: &Path) -> Result<Difference> {
    let img_a = image::open(thumb_a)?.to_rgb8();
    let img_b = image::open(thumb_b)?.to_rgb8();

    // The dimension pre-filter allows small size mismatches, so compare
    // over the shared region only.
    let width = img_a.width().min(img_b.width());
    let height = img_a.height().min(img_b.height());

    let mut total: u64 = 0;
    for y in 0..height {
        for x in 0..width {
            let pa = img_a.get_pixel(x, y);
            let pb = img_b.get_pixel(x, y);
            for c in 0..3 {
                total += (pa[c] as i32 - pb[c] as i32).unsigned_abs() as u64;
            }
        }
    }

    let sample_count = width as u64 * height as u64 * 3;
    let equality = if sample_count == 0 {
        0.0
    } else {
        total as f64 / (sample_count as f64 * 255.0)
    };

    Ok(Difference {
        is_equal: equality == 0.0,
        equality,
    })
}

// -- Tests --
