//! Naive strategy: explicit per-pixel nested loops.
//!
//! This is the reference implementation the timing harness compares the
//! other strategies against. Every pixel is read with `[[y, x, c]]`
//! indexing, one weighted sum per output channel.
//!
//! Inputs must have 3 or 4 channels; callers going through
//! [`crate::registry::Filter::apply`] get that checked. Alpha, if present,
//! is copied through.

use ndarray::{Array3, ArrayView3};

use super::core::{mix, narrow_u8, SepiaIntensity, GRAY_WEIGHTS};

// ============================================================================
// Grayscale
// ============================================================================

/// Convert an RGB(A) image to grayscale.
///
/// Output has R=G=B=luminosity and the same shape as the input.
pub fn grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f64;
            let g = input[[y, x, 1]] as f64;
            let b = input[[y, x, 2]] as f64;

            let gray = narrow_u8(mix(GRAY_WEIGHTS, r, g, b));

            output[[y, x, 0]] = gray;
            output[[y, x, 1]] = gray;
            output[[y, x, 2]] = gray;
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }

    output
}

// ============================================================================
// Sepia
// ============================================================================

/// Apply the full sepia matrix.
pub fn sepia(input: ArrayView3<u8>) -> Array3<u8> {
    sepia_with_intensity(input, SepiaIntensity::FULL)
}

/// Apply sepia interpolated by `intensity`.
pub fn sepia_with_intensity(input: ArrayView3<u8>, intensity: SepiaIntensity) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));
    let matrix = intensity.matrix();

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as f64;
            let g = input[[y, x, 1]] as f64;
            let b = input[[y, x, 2]] as f64;

            for (c, row) in matrix.iter().enumerate() {
                output[[y, x, c]] = narrow_u8(mix(*row, r, g, b));
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }

    output
}
