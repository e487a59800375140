//! Sampled-window adaptive mean thresholding
//!
//! Each pixel is compared against the mean of a sparse sample of its
//! neighborhood: a square window of half-width `radius`, visited with a
//! stride of 3 on both axes. Sampling keeps the full-image path close to
//! linear in the pixel count while still tracking illumination gradients
//! that defeat any single global threshold.

use rayon::prelude::*;

use crate::models::BitMatrix;

/// Default half-width of the local sampling window
pub const DEFAULT_WINDOW_RADIUS: usize = 10;
/// Default bias subtracted from each local mean
pub const DEFAULT_BIAS: i32 = 0;
/// Step between sampled offsets inside the window
const SAMPLE_STRIDE: usize = 3;

/// True when `(x, y)` is strictly darker than its sampled local mean
///
/// The sampling grid is anchored at the window's top-left corner, so the
/// center pixel itself is usually not part of its own mean. Grid points
/// outside the image are skipped; when none are in bounds the pixel
/// classifies white.
#[inline]
fn darker_than_local_mean(
    gray: &[u8],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    radius: usize,
    bias: i32,
) -> bool {
    let radius = radius as isize;
    let mut sum = 0u32;
    let mut count = 0u32;
    for r in (y as isize - radius..=y as isize + radius).step_by(SAMPLE_STRIDE) {
        if r < 0 || r >= height as isize {
            continue;
        }
        let row_offset = r as usize * width;
        for c in (x as isize - radius..=x as isize + radius).step_by(SAMPLE_STRIDE) {
            if c < 0 || c >= width as isize {
                continue;
            }
            sum += gray[row_offset + c as usize] as u32;
            count += 1;
        }
    }
    if count == 0 {
        return false;
    }
    let mean = (sum / count) as i32 - bias;
    (gray[y * width + x] as i32) < mean
}

/// Binarize a row-major grayscale buffer against sampled local means
///
/// true = black. This path always produces a classification; low contrast
/// degrades the result instead of failing it.
pub fn adaptive_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    radius: usize,
    bias: i32,
) -> BitMatrix {
    let mut matrix = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if darker_than_local_mean(gray, width, height, x, y, radius, bias) {
                matrix.set(x, y, true);
            }
        }
    }
    matrix
}

/// `adaptive_binarize` with rows processed in parallel
///
/// Workers fill whole matrix rows, which never share bytes, so the output
/// is bit-identical to the serial path.
pub fn adaptive_binarize_parallel(
    gray: &[u8],
    width: usize,
    height: usize,
    radius: usize,
    bias: i32,
) -> BitMatrix {
    let mut matrix = BitMatrix::new(width, height);
    if width == 0 || height == 0 {
        return matrix;
    }

    let row_stride = matrix.row_stride();
    matrix
        .data_mut()
        .par_chunks_mut(row_stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                if darker_than_local_mean(gray, width, height, x, y, radius, bias) {
                    row[x / 8] |= 1 << (x % 8);
                }
            }
        });

    matrix
}
