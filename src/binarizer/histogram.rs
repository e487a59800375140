//! Global-histogram black point estimation and the row/matrix binarizer
//!
//! The row path is the classic cheap approach: collapse a scanline's
//! luminance into 32 buckets, find the two dominant peaks, threshold at the
//! best valley between them. One estimate per row keeps it fast enough to
//! run on every frame of a camera feed, at the cost of ignoring lighting
//! changes along the row.

use crate::debug::debug_enabled;
use crate::models::{BitMatrix, BitRow};
use crate::source::LuminanceSource;

use super::adaptive;
use super::{BinarizeError, Binarizer};

/// Histogram resolution: 2^5 buckets over the 0..=255 luminance range
pub const LUMINANCE_BITS: usize = 5;
/// Shift mapping a luminance sample to its bucket
pub const LUMINANCE_SHIFT: usize = 8 - LUMINANCE_BITS;
/// Number of histogram buckets
pub const LUMINANCE_BUCKETS: usize = 1 << LUMINANCE_BITS;

/// Accumulate `samples` into `buckets`, zeroing the buckets first
pub fn histogram_into(samples: &[u8], buckets: &mut [u32; LUMINANCE_BUCKETS]) {
    buckets.fill(0);
    for &v in samples {
        buckets[(v as usize) >> LUMINANCE_SHIFT] += 1;
    }
}

/// Build a 32-bucket luminance histogram over `samples`
pub fn histogram(samples: &[u8]) -> [u32; LUMINANCE_BUCKETS] {
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    histogram_into(samples, &mut buckets);
    buckets
}

/// Estimate the black/white threshold from a 32-bucket histogram
///
/// Finds the tallest peak, then a second peak scored by count times
/// squared distance so it lands well away from the first, then the best
/// valley between them. The valley bucket maps back to the luminance scale
/// as `valley << 3`; samples strictly below the result are black.
///
/// # Errors
/// [`BinarizeError::LowContrast`] when the two peaks sit 2 buckets apart or
/// closer. A threshold wedged between near-identical populations would turn
/// sensor noise into bit noise, so none is returned.
pub fn estimate_black_point(buckets: &[u32; LUMINANCE_BUCKETS]) -> Result<u8, BinarizeError> {
    // Tallest bucket; first occurrence wins ties.
    let mut max_bucket_count = 0u32;
    let mut first_peak = 0usize;
    let mut first_peak_size = 0u32;
    for (x, &count) in buckets.iter().enumerate() {
        if count > first_peak_size {
            first_peak = x;
            first_peak_size = count;
        }
        if count > max_bucket_count {
            max_bucket_count = count;
        }
    }

    // Second peak: count * distance^2, so height alone cannot put it next
    // to the first.
    let mut second_peak = 0usize;
    let mut second_peak_score = 0u64;
    for (x, &count) in buckets.iter().enumerate() {
        let distance = x.abs_diff(first_peak) as u64;
        let score = count as u64 * distance * distance;
        if score > second_peak_score {
            second_peak = x;
            second_peak_score = score;
        }
    }

    // Dark peak on the left.
    if first_peak > second_peak {
        std::mem::swap(&mut first_peak, &mut second_peak);
    }

    if second_peak - first_peak <= LUMINANCE_BUCKETS / 16 {
        return Err(BinarizeError::LowContrast);
    }

    // Valley: empty, far from the dark peak, close to the light one.
    // Scanned downward from the light peak.
    let mut best_valley = second_peak - 1;
    let mut best_valley_score = -1i64;
    for x in (first_peak + 1..second_peak).rev() {
        let from_first = (x - first_peak) as i64;
        let score = from_first
            * from_first
            * (second_peak - x) as i64
            * (max_bucket_count - buckets[x]) as i64;
        if score > best_valley_score {
            best_valley = x;
            best_valley_score = score;
        }
    }

    Ok((best_valley << LUMINANCE_SHIFT) as u8)
}

/// Binarizer combining a per-row histogram black point with a sampled-window
/// local mean for full matrices
///
/// The row path picks one threshold per scanline, so it cannot ride out a
/// shadow crossing the line; the matrix path compares every pixel against
/// its own neighborhood and keeps working under uneven illumination.
/// Scratch buffers (row luminances and histogram buckets) are reused across
/// calls and only ever grow.
pub struct HistogramBinarizer<S> {
    source: S,
    luminances: Vec<u8>,
    buckets: [u32; LUMINANCE_BUCKETS],
    window_radius: usize,
    bias: i32,
}

impl<S: LuminanceSource> HistogramBinarizer<S> {
    /// Bind a binarizer to `source` with the default window and bias
    pub fn new(source: S) -> Self {
        Self::with_window(
            source,
            adaptive::DEFAULT_WINDOW_RADIUS,
            adaptive::DEFAULT_BIAS,
        )
    }

    /// Bind a binarizer with an explicit matrix window radius and bias
    ///
    /// `window_radius` is the half-width of the local-mean sampling window.
    /// `bias` is subtracted from each local mean before comparison; a
    /// positive bias pushes classification toward white.
    pub fn with_window(source: S, window_radius: usize, bias: i32) -> Self {
        Self {
            source,
            luminances: Vec::new(),
            buckets: [0; LUMINANCE_BUCKETS],
            window_radius,
            bias,
        }
    }

    /// Window radius used by the matrix path
    pub fn window_radius(&self) -> usize {
        self.window_radius
    }

    /// Bias used by the matrix path
    pub fn bias(&self) -> i32 {
        self.bias
    }

    /// [`Binarizer::black_matrix`] with rows processed in parallel
    ///
    /// Produces exactly the same bits as the serial path.
    pub fn black_matrix_parallel(&self) -> Result<BitMatrix, BinarizeError> {
        let gray = self.source.matrix();
        Ok(adaptive::adaptive_binarize_parallel(
            &gray,
            self.source.width(),
            self.source.height(),
            self.window_radius,
            self.bias,
        ))
    }
}

impl<S: LuminanceSource> Binarizer for HistogramBinarizer<S> {
    type Source = S;

    fn source(&self) -> &S {
        &self.source
    }

    fn black_row(&mut self, y: usize, row: Option<BitRow>) -> Result<BitRow, BinarizeError> {
        let width = self.source.width();
        let mut row = match row {
            Some(mut row) if row.size() >= width => {
                row.clear();
                row
            }
            _ => BitRow::new(width),
        };

        let luminances = &self.source.row(y, &mut self.luminances)[..width];
        histogram_into(luminances, &mut self.buckets);
        let black_point = match estimate_black_point(&self.buckets) {
            Ok(point) => point as i32,
            Err(err) => {
                if cfg!(debug_assertions) && debug_enabled() {
                    eprintln!("DEBUG: row {y} has no usable black point");
                }
                return Err(err);
            }
        };

        if width < 3 {
            // Too narrow for the sharpening window.
            for (x, &v) in luminances.iter().enumerate() {
                if (v as i32) < black_point {
                    row.set(x, true);
                }
            }
        } else {
            // -1 4 -1 sharpening, halved; the first and last columns stay
            // unclassified.
            let mut left = luminances[0] as i32;
            let mut center = luminances[1] as i32;
            for x in 1..width - 1 {
                let right = luminances[x + 1] as i32;
                if (center * 4 - left - right) / 2 < black_point {
                    row.set(x, true);
                }
                left = center;
                center = right;
            }
        }

        Ok(row)
    }

    fn black_matrix(&self) -> Result<BitMatrix, BinarizeError> {
        let gray = self.source.matrix();
        Ok(adaptive::adaptive_binarize(
            &gray,
            self.source.width(),
            self.source.height(),
            self.window_radius,
            self.bias,
        ))
    }

    fn for_source(&self, source: S) -> Self {
        Self::with_window(source, self.window_radius, self.bias)
    }
}
