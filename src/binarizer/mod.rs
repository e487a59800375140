//! Binarization: luminance samples to black/white bits
//!
//! [`Binarizer`] is the capability the decoding layers consume: one row at
//! a time for 1-D scanning, or a whole [`BitMatrix`] for 2-D scanning.
//! [`HistogramBinarizer`] is the stock implementation. Variants (such as
//! binarizing an inverted source) are selected when a binarizer is
//! constructed, never by mutating an existing one.

use std::error::Error;
use std::fmt;

use crate::models::{BitMatrix, BitRow};
use crate::source::LuminanceSource;

pub mod adaptive;
pub mod histogram;

pub use histogram::HistogramBinarizer;

#[cfg(test)]
mod tests;

/// Binarization failure surfaced to the decoding layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinarizeError {
    /// The luminance histogram has no two sufficiently separated peaks, so
    /// no threshold can be trusted. Callers typically skip the frame and
    /// retry on the next one.
    LowContrast,
}

impl fmt::Display for BinarizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinarizeError::LowContrast => {
                write!(f, "not enough contrast to estimate a black point")
            }
        }
    }
}

impl Error for BinarizeError {}

/// Converts a [`LuminanceSource`] into binary rows and matrices on demand
pub trait Binarizer {
    /// The luminance source this binarizer reads from
    type Source: LuminanceSource;

    /// The bound source
    fn source(&self) -> &Self::Source;

    /// Binarize row `y`, reusing `row` when it is large enough
    ///
    /// A passed-in row with `size() >= width` is cleared and refilled in
    /// place; anything smaller (or `None`) is replaced by a fresh
    /// allocation. Takes `&mut self` so implementations can reuse scratch
    /// buffers across rows.
    ///
    /// # Errors
    /// [`BinarizeError::LowContrast`] when no reliable threshold exists for
    /// this row.
    fn black_row(&mut self, y: usize, row: Option<BitRow>) -> Result<BitRow, BinarizeError>;

    /// Binarize the whole image into a freshly allocated matrix
    ///
    /// # Errors
    /// Implementations needing a trustworthy global threshold may fail with
    /// [`BinarizeError::LowContrast`]; [`HistogramBinarizer`] never does,
    /// since its matrix path thresholds locally.
    fn black_matrix(&self) -> Result<BitMatrix, BinarizeError>;

    /// A new binarizer with the same configuration bound to `source`
    fn for_source(&self, source: Self::Source) -> Self
    where
        Self: Sized;

    /// Width of the bound source
    fn width(&self) -> usize {
        self.source().width()
    }

    /// Height of the bound source
    fn height(&self) -> usize {
        self.source().height()
    }
}
