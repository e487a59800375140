//! Luminance input for binarization
//!
//! Everything upstream of binarization speaks through [`LuminanceSource`]:
//! width, height, and raw 8-bit luminance samples, row by row or as one
//! row-major buffer. [`Luma8Source`] is the flat owned implementation used
//! by the convenience API; [`InvertedSource`] wraps any source and swaps
//! dark for light, which is how light-on-dark imagery is handled without a
//! second binarizer.

use std::borrow::Cow;

use crate::utils::grayscale::{rgb_to_grayscale, rgba_to_grayscale};

/// Supplier of 8-bit luminance samples, 0 = darkest
pub trait LuminanceSource {
    /// Image width in pixels
    fn width(&self) -> usize;

    /// Image height in pixels
    fn height(&self) -> usize;

    /// Copy row `y` into `buf` and return the filled prefix
    ///
    /// Implementations write exactly `width` samples, growing `buf` when it
    /// is too small but never shrinking it, and return `&buf[..width]`.
    /// Callers keep one buffer alive across rows to avoid per-row
    /// allocation.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    fn row<'b>(&self, y: usize, buf: &'b mut Vec<u8>) -> &'b [u8];

    /// The full luminance image, row-major, one byte per pixel
    ///
    /// Flat sources return a borrow; transforming wrappers return an owned
    /// copy.
    fn matrix(&self) -> Cow<'_, [u8]>;
}

/// Owned row-major grayscale image, one byte per pixel
#[derive(Debug, Clone)]
pub struct Luma8Source {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Luma8Source {
    /// Wrap an existing luminance buffer
    ///
    /// # Panics
    /// Panics if `data.len() != width * height`.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "luminance buffer does not match {width}x{height}"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Build a source from packed RGB bytes (3 per pixel)
    pub fn from_rgb(rgb: &[u8], width: usize, height: usize) -> Self {
        Self::new(rgb_to_grayscale(rgb, width, height), width, height)
    }

    /// Build a source from packed RGBA bytes (4 per pixel), ignoring alpha
    pub fn from_rgba(rgba: &[u8], width: usize, height: usize) -> Self {
        Self::new(rgba_to_grayscale(rgba, width, height), width, height)
    }

    /// Borrow the underlying luminance buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl LuminanceSource for Luma8Source {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn row<'b>(&self, y: usize, buf: &'b mut Vec<u8>) -> &'b [u8] {
        let start = y * self.width;
        let row = &self.data[start..start + self.width];
        if buf.len() < self.width {
            buf.resize(self.width, 0);
        }
        buf[..self.width].copy_from_slice(row);
        &buf[..self.width]
    }

    fn matrix(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.data)
    }
}

/// Wrapper inverting every luminance sample (`255 - v`)
///
/// Binarizing an inverted source classifies light-on-dark symbols the same
/// way the plain source classifies dark-on-light ones.
#[derive(Debug, Clone)]
pub struct InvertedSource<S> {
    inner: S,
}

impl<S: LuminanceSource> InvertedSource<S> {
    /// Wrap a source
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Unwrap and return the inner source
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: LuminanceSource> LuminanceSource for InvertedSource<S> {
    fn width(&self) -> usize {
        self.inner.width()
    }

    fn height(&self) -> usize {
        self.inner.height()
    }

    fn row<'b>(&self, y: usize, buf: &'b mut Vec<u8>) -> &'b [u8] {
        let width = self.inner.width();
        self.inner.row(y, buf);
        for v in &mut buf[..width] {
            *v = 255 - *v;
        }
        &buf[..width]
    }

    fn matrix(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.inner.matrix().iter().map(|&v| 255 - v).collect())
    }
}
