//! Filter strategies for the grayscale and sepia transforms.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255; alpha copied unchanged |
//!
//! ## Strategies
//!
//! | Strategy | Module | Technique |
//! |----------|--------|-----------|
//! | naive | [`naive`] | Nested `y`/`x` loops with `[[y, x, c]]` indexing |
//! | vectorized | [`vectorized`] | ndarray plane arithmetic, no pixel loop |
//! | native | [`native`] | Flat-slice kernel over rayon (feature `native`) |
//!
//! All strategies share the weights, matrix and rounding in [`core`], and
//! every output is a freshly allocated array with the input's shape.

pub mod core;
pub mod naive;
pub mod vectorized;

#[cfg(feature = "native")]
pub mod native;

use ndarray::{Array3, ArrayView3};

use crate::error::Result;
use crate::registry::Implementation;

pub use self::core::SepiaIntensity;

/// Signature of the sepia entry point that takes an intensity.
pub type SepiaFn = fn(ArrayView3<u8>, SepiaIntensity) -> Array3<u8>;

/// Resolve the intensity-aware sepia function for `implementation`.
pub fn sepia_fn(implementation: Implementation) -> Result<SepiaFn> {
    implementation.ensure_available()?;
    Ok(match implementation {
        Implementation::Naive => naive::sepia_with_intensity,
        Implementation::Vectorized => vectorized::sepia_with_intensity,
        #[cfg(feature = "native")]
        Implementation::Native => native::sepia_with_intensity,
        #[cfg(not(feature = "native"))]
        Implementation::Native => unreachable!("rejected by ensure_available"),
    })
}

/// Apply sepia at `intensity` with the chosen strategy.
pub fn apply_sepia(
    image: ArrayView3<u8>,
    implementation: Implementation,
    intensity: SepiaIntensity,
) -> Result<Array3<u8>> {
    self::core::check_channels(&image)?;
    let func = sepia_fn(implementation)?;
    Ok(func(image, intensity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;

    #[test]
    fn test_apply_sepia_every_available_strategy() {
        let img = Array3::from_shape_fn((4, 5, 3), |(y, x, c)| (y * 60 + x * 40 + c * 20) as u8);
        let k = SepiaIntensity::new(0.75).unwrap();
        let reference = apply_sepia(img.view(), Implementation::Naive, k).unwrap();

        for implementation in Implementation::available() {
            let result = apply_sepia(img.view(), implementation, k).unwrap();
            assert_eq!(result.dim(), img.dim());
            for (a, b) in result.iter().zip(reference.iter()) {
                assert!((*a as i32 - *b as i32).abs() <= 1, "{implementation} diverged");
            }
        }
    }

    #[test]
    fn test_apply_sepia_rejects_two_channels() {
        let img = Array3::<u8>::zeros((2, 2, 2));
        let err = apply_sepia(img.view(), Implementation::Naive, SepiaIntensity::FULL);
        assert!(matches!(err, Err(FilterError::UnsupportedChannels(2))));
    }

    #[cfg(not(feature = "native"))]
    #[test]
    fn test_apply_sepia_native_unavailable() {
        let img = Array3::<u8>::zeros((2, 2, 3));
        let err = apply_sepia(img.view(), Implementation::Native, SepiaIntensity::FULL);
        assert!(matches!(err, Err(FilterError::BackendUnavailable(_))));
    }
}
