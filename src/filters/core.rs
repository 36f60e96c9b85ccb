//! Core utilities shared by every filter strategy.
//!
//! This module provides the numeric contract all strategies agree on:
//! - Grayscale channel weights
//! - The sepia mixing matrix and its intensity interpolation
//! - Round-half-up narrowing to `u8`
//! - Channel-count validation
//!
//! Every strategy evaluates `row[0] * r + row[1] * g + row[2] * b` in that
//! order on `f64`, so naive, vectorized and native outputs are bit-identical.

use ndarray::ArrayView3;

use crate::error::{FilterError, Result};

/// Grayscale weights for (R, G, B).
pub const GRAY_WEIGHTS: [f64; 3] = [0.21, 0.72, 0.07];

/// A 3x3 colour mixing matrix, applied as `M · [r, g, b]`.
pub type ColorMatrix = [[f64; 3]; 3];

/// Full-strength sepia matrix.
pub const SEPIA_MATRIX: ColorMatrix = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

const IDENTITY: ColorMatrix = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Amount of sepia to apply, validated to lie in `[0, 1]`.
///
/// `0.0` leaves the colours untouched, `1.0` applies [`SEPIA_MATRIX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SepiaIntensity(f64);

impl SepiaIntensity {
    pub const FULL: SepiaIntensity = SepiaIntensity(1.0);

    /// Validate `k`. NaN is rejected along with anything outside `[0, 1]`.
    pub fn new(k: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&k) {
            Ok(Self(k))
        } else {
            Err(FilterError::InvalidIntensity(k))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Interpolated matrix `(1 - k) * I + k * S`, exact at both endpoints.
    pub fn matrix(self) -> ColorMatrix {
        let k = self.0;
        let mut matrix = IDENTITY;
        for (row, sepia_row) in matrix.iter_mut().zip(SEPIA_MATRIX.iter()) {
            for (m, s) in row.iter_mut().zip(sepia_row.iter()) {
                *m = (1.0 - k) * *m + k * s;
            }
        }
        matrix
    }
}

impl Default for SepiaIntensity {
    fn default() -> Self {
        Self::FULL
    }
}

/// Weighted sum of one pixel's colour channels.
#[inline(always)]
pub fn mix(row: [f64; 3], r: f64, g: f64, b: f64) -> f64 {
    row[0] * r + row[1] * g + row[2] * b
}

/// Round half up, clamp to `[0, 255]`, then narrow.
#[inline(always)]
pub fn narrow_u8(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Accept RGB (3) or RGBA (4) images only.
pub fn check_channels(image: &ArrayView3<u8>) -> Result<()> {
    match image.dim().2 {
        3 | 4 => Ok(()),
        other => Err(FilterError::UnsupportedChannels(other)),
    }
}
