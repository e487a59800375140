//! Utility functions for image preprocessing
//!
//! - Grayscale conversion (RGB/RGBA to luminance, scalar and parallel)

pub mod grayscale;
