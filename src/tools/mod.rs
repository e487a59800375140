//! Shared helpers for the diagnostic binaries
//!
//! Everything here sits outside the binarization core: loading images from
//! disk, summarizing luminance buffers, dumping matrices back to disk for
//! eyeballing.

use crate::models::BitMatrix;
use crate::source::Luma8Source;
use image::GenericImageView;
use std::env;
use std::path::Path;

fn max_dim_from_env() -> Option<u32> {
    env::var("BITONAL_MAX_DIM")
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|&v| v > 0)
}

/// Load an image file as a luminance source.
///
/// Honors `BITONAL_MAX_DIM`: when set to a nonzero value, images whose
/// longer side exceeds it are downscaled to fit before conversion. Unset
/// or `0` disables the cap.
pub fn load_luma<P: AsRef<Path>>(path: P) -> Result<Luma8Source, image::ImageError> {
    let mut img = image::open(path)?;
    if let Some(max_dim) = max_dim_from_env() {
        let (w, h) = img.dimensions();
        if w.max(h) > max_dim {
            img = img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle);
        }
    }
    let gray = img.to_luma8();
    let (width, height) = gray.dimensions();
    Ok(Luma8Source::new(
        gray.into_raw(),
        width as usize,
        height as usize,
    ))
}

/// Summary statistics for a luminance buffer.
#[derive(Debug, Clone, Copy)]
pub struct GrayStats {
    /// Darkest sample.
    pub min: u8,
    /// Brightest sample.
    pub max: u8,
    /// Average sample value.
    pub avg: u8,
}

/// Summary statistics for a binary matrix.
#[derive(Debug, Clone, Copy)]
pub struct BinaryStats {
    /// Count of black pixels.
    pub black_pixels: usize,
    /// Total pixels in the matrix.
    pub total_pixels: usize,
    /// Ratio of black pixels to total pixels.
    pub black_ratio: f64,
}

/// Compute min/max/avg for luminance values.
pub fn grayscale_stats(gray: &[u8]) -> GrayStats {
    let mut stats = GrayStats {
        min: u8::MAX,
        max: u8::MIN,
        avg: 0,
    };
    if gray.is_empty() {
        return stats;
    }
    let mut sum = 0u64;
    for &v in gray {
        stats.min = stats.min.min(v);
        stats.max = stats.max.max(v);
        sum += v as u64;
    }
    stats.avg = (sum / gray.len() as u64) as u8;
    stats
}

/// Compute black pixel stats for a binary matrix.
pub fn binary_stats(binary: &BitMatrix) -> BinaryStats {
    // Row padding bits stay zero, so a popcount over the packed bytes is
    // an exact black-pixel count.
    let black: usize = binary
        .as_bytes()
        .iter()
        .map(|b| b.count_ones() as usize)
        .sum();
    let total = binary.width() * binary.height();
    let ratio = if total == 0 {
        0.0
    } else {
        black as f64 / total as f64
    };
    BinaryStats {
        black_pixels: black,
        total_pixels: total,
        black_ratio: ratio,
    }
}

/// Save a binary matrix as a grayscale image, black bits as 0.
///
/// The format follows the file extension, the same way `image::save` does.
pub fn save_matrix<P: AsRef<Path>>(
    matrix: &BitMatrix,
    path: P,
) -> Result<(), image::ImageError> {
    let img = image::GrayImage::from_fn(matrix.width() as u32, matrix.height() as u32, |x, y| {
        if matrix.get(x as usize, y as usize) {
            image::Luma([0u8])
        } else {
            image::Luma([255u8])
        }
    });
    img.save(path)
}
