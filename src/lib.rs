//! bitonal - fast luminance binarization for barcode scanning
//!
//! A pure Rust library converting grayscale camera frames into black/white
//! bitmaps ready for barcode pattern detection. Two granularities are
//! offered: a cheap per-row path (global histogram black point plus a
//! sharpening filter) for 1-D style scanning, and a full-image path
//! (sampled-window adaptive mean) that stays usable under the uneven
//! illumination of handheld captures.
//!
//! Frames without enough luminance separation fail fast with
//! [`BinarizeError::LowContrast`], which a live pipeline should treat as
//! "skip this frame", not as a defect.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Binarizer capability, implementations and errors
pub mod binarizer;
/// Core bit containers (BitRow, BitMatrix)
pub mod models;
/// Luminance input sources
pub mod source;
/// Helpers for the diagnostic binaries (image I/O, stats)
pub mod tools;
/// Utility functions (grayscale conversion)
pub mod utils;

mod debug;

pub use binarizer::{BinarizeError, Binarizer, HistogramBinarizer};
pub use models::{BitMatrix, BitRow};
pub use source::{InvertedSource, Luma8Source, LuminanceSource};

use binarizer::adaptive;

/// Binarize a grayscale image with the default adaptive window
///
/// # Arguments
/// * `gray` - Row-major luminance bytes (1 byte per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// A [`BitMatrix`] with true marking black pixels
///
/// # Example
/// ```
/// let gray = vec![200u8; 64 * 64];
/// let matrix = bitonal::binarize(&gray, 64, 64);
/// assert!(!matrix.get(32, 32)); // uniform image stays white
/// ```
pub fn binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    adaptive::adaptive_binarize(
        gray,
        width,
        height,
        adaptive::DEFAULT_WINDOW_RADIUS,
        adaptive::DEFAULT_BIAS,
    )
}

/// [`binarize`] with rows processed in parallel
///
/// Produces bit-identical output; worth it from roughly VGA-sized frames
/// upward.
pub fn binarize_parallel(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    adaptive::adaptive_binarize_parallel(
        gray,
        width,
        height,
        adaptive::DEFAULT_WINDOW_RADIUS,
        adaptive::DEFAULT_BIAS,
    )
}

/// Binarize a single scanline with the histogram black-point path
///
/// # Arguments
/// * `samples` - The scanline's luminance bytes
///
/// # Returns
/// A [`BitRow`] the length of the scanline
///
/// # Errors
/// [`BinarizeError::LowContrast`] when the samples hold no two separated
/// luminance populations.
pub fn binarize_row(samples: &[u8]) -> Result<BitRow, BinarizeError> {
    let source = Luma8Source::new(samples.to_vec(), samples.len(), 1);
    let mut binarizer = HistogramBinarizer::new(source);
    binarizer.black_row(0, None)
}
