//! Native strategy: tight loops over the contiguous pixel buffer.
//!
//! Pixels are processed as `channels`-sized chunks of a flat slice, so the
//! inner loop has no index arithmetic or bounds checks beyond the chunk
//! itself, and rows are spread across the rayon thread pool.
//!
//! Only compiled with the `native` feature. Without it the registry reports
//! [`crate::error::FilterError::BackendUnavailable`] instead of falling back
//! to another strategy.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use super::core::{mix, narrow_u8, SepiaIntensity, GRAY_WEIGHTS};

/// Run `kernel` on every pixel of a standard-layout copy of `input`.
fn map_pixels<F>(input: ArrayView3<u8>, kernel: F) -> Array3<u8>
where
    F: Fn(&mut [u8]) + Sync + Send,
{
    let channels = input.dim().2;
    let mut output = input.as_standard_layout().into_owned();

    match output.as_slice_mut() {
        Some(pixels) if channels > 0 => {
            pixels.par_chunks_exact_mut(channels).for_each(|px| kernel(px));
        }
        Some(_) => {}
        None => unreachable!("standard layout arrays are contiguous"),
    }

    output
}

/// Convert an RGB(A) image to grayscale.
pub fn grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    map_pixels(input, |px| {
        let gray = narrow_u8(mix(GRAY_WEIGHTS, px[0] as f64, px[1] as f64, px[2] as f64));
        px[0] = gray;
        px[1] = gray;
        px[2] = gray;
    })
}

/// Apply the full sepia matrix.
pub fn sepia(input: ArrayView3<u8>) -> Array3<u8> {
    sepia_with_intensity(input, SepiaIntensity::FULL)
}

/// Apply sepia interpolated by `intensity`.
pub fn sepia_with_intensity(input: ArrayView3<u8>, intensity: SepiaIntensity) -> Array3<u8> {
    let matrix = intensity.matrix();
    map_pixels(input, move |px| {
        let (r, g, b) = (px[0] as f64, px[1] as f64, px[2] as f64);
        px[0] = narrow_u8(mix(matrix[0], r, g, b));
        px[1] = narrow_u8(mix(matrix[1], r, g, b));
        px[2] = narrow_u8(mix(matrix[2], r, g, b));
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{naive, vectorized};
    use ndarray::Axis;

    fn noise(height: usize, width: usize, channels: usize) -> Array3<u8> {
        // LCG keeps the fixture deterministic without pulling in rand
        let mut state = 0x2545_f491_u32;
        Array3::from_shape_fn((height, width, channels), |_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        })
    }

    #[test]
    fn test_grayscale_parity_with_other_strategies() {
        let img = noise(31, 17, 3);
        let native = grayscale(img.view());
        let reference = naive::grayscale(img.view());
        let vector = vectorized::grayscale(img.view());

        for ((a, b), c) in native.iter().zip(reference.iter()).zip(vector.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
            assert!((*a as i32 - *c as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_sepia_parity_with_naive() {
        let img = noise(20, 20, 4);
        let native = sepia(img.view());
        let reference = naive::sepia(img.view());

        for (a, b) in native.iter().zip(reference.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= 1);
        }
        assert_eq!(native.index_axis(Axis(2), 3), img.index_axis(Axis(2), 3));
    }

    #[test]
    fn test_known_pixels() {
        let mut img = Array3::<u8>::zeros((1, 2, 3));
        img[[0, 0, 0]] = 10;
        img[[0, 0, 1]] = 20;
        img[[0, 0, 2]] = 30;
        img[[0, 1, 0]] = 100;
        img[[0, 1, 1]] = 150;
        img[[0, 1, 2]] = 200;

        let gray = grayscale(img.view());
        assert_eq!(gray[[0, 0, 0]], 19);
        let toned = sepia(img.view());
        assert_eq!(toned[[0, 1, 0]], 192);
    }

    #[test]
    fn test_empty_image() {
        let img = Array3::<u8>::zeros((0, 5, 3));
        assert_eq!(grayscale(img.view()).dim(), (0, 5, 3));
    }

    #[test]
    fn test_non_standard_layout() {
        let img = noise(6, 9, 3);
        let permuted = img.view().permuted_axes([1, 0, 2]);
        assert_eq!(grayscale(permuted), naive::grayscale(permuted));
    }
}
