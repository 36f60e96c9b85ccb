//! Vectorized strategy: whole-array arithmetic, no per-pixel loop.
//!
//! Each colour plane is sliced out with `index_axis`, scaled by a weight and
//! summed as an ndarray expression. The resulting 2D plane is broadcast back
//! into the output channels with `assign`.

use ndarray::{s, Array2, Array3, ArrayView3, Axis};

use super::core::{narrow_u8, SepiaIntensity, GRAY_WEIGHTS};

/// `weights[0] * R + weights[1] * G + weights[2] * B` over the whole image.
fn weighted_planes(pixels: &Array3<f64>, weights: [f64; 3]) -> Array2<f64> {
    let r = pixels.index_axis(Axis(2), 0);
    let g = pixels.index_axis(Axis(2), 1);
    let b = pixels.index_axis(Axis(2), 2);

    &r * weights[0] + &(&g * weights[1]) + &(&b * weights[2])
}

/// Convert an RGB(A) image to grayscale.
pub fn grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    let pixels = input.mapv(f64::from);
    let luma = weighted_planes(&pixels, GRAY_WEIGHTS).mapv(narrow_u8);

    // Copying the input carries alpha over untouched
    let mut output = input.to_owned();
    output
        .slice_mut(s![.., .., ..3])
        .assign(&luma.insert_axis(Axis(2)));
    output
}

/// Apply the full sepia matrix.
pub fn sepia(input: ArrayView3<u8>) -> Array3<u8> {
    sepia_with_intensity(input, SepiaIntensity::FULL)
}

/// Apply sepia interpolated by `intensity`.
pub fn sepia_with_intensity(input: ArrayView3<u8>, intensity: SepiaIntensity) -> Array3<u8> {
    let pixels = input.mapv(f64::from);
    let matrix = intensity.matrix();

    let mut output = input.to_owned();
    for (channel, row) in matrix.iter().enumerate() {
        let mixed = weighted_planes(&pixels, *row).mapv(narrow_u8);
        output.index_axis_mut(Axis(2), channel).assign(&mixed);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::naive;

    /// Deterministic test pattern covering the full 0-255 range.
    fn gradient(height: usize, width: usize, channels: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
            ((y * 37 + x * 11 + c * 89) % 256) as u8
        })
    }

    #[test]
    fn test_grayscale_matches_naive() {
        let img = gradient(16, 23, 3);
        let expected = naive::grayscale(img.view());
        let result = grayscale(img.view());

        assert_eq!(result.dim(), img.dim());
        for (a, b) in result.iter().zip(expected.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_grayscale_non_standard_layout() {
        // Transposed view: column-major strides must not change the result
        let img = gradient(5, 8, 3);
        let permuted = img.view().permuted_axes([1, 0, 2]);
        let result = grayscale(permuted);
        let expected = naive::grayscale(permuted);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_sepia_matches_naive() {
        let img = gradient(12, 10, 4);
        let k = SepiaIntensity::new(0.3).unwrap();
        let expected = naive::sepia_with_intensity(img.view(), k);
        let result = sepia_with_intensity(img.view(), k);

        for (a, b) in result.iter().zip(expected.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
        // alpha channel untouched
        assert_eq!(result.index_axis(Axis(2), 3), img.index_axis(Axis(2), 3));
    }

    #[test]
    fn test_sepia_extremes_stay_in_range() {
        let black = Array3::<u8>::zeros((4, 4, 3));
        let white = Array3::<u8>::from_elem((4, 4, 3), 255);

        assert!(sepia(black.view()).iter().all(|&v| v == 0));
        let lit = sepia(white.view());
        assert_eq!(lit[[0, 0, 0]], 255);
        assert_eq!(lit[[3, 3, 1]], 255);
        assert_eq!(lit[[2, 1, 2]], 239);
    }
}
