//! Image I/O helpers.
//!
//! - `read_image`: decode a PNG/JPEG into an owned RGB `Array3<u8>`.
//! - `write_image`: encode an RGB or RGBA array, format chosen by extension.
//! - `resize`: scale an image by a factor (used by the CLI `--scale` flag).
//! - `display`: write a temporary PNG and hand it to the platform viewer.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, RgbaImage};
use ndarray::{Array3, ArrayView3};
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::filters::core::check_channels;

fn image_error(path: &Path, source: image::ImageError) -> FilterError {
    FilterError::Image {
        path: path.to_path_buf(),
        source,
    }
}

fn to_dynamic(image: ArrayView3<u8>) -> Result<DynamicImage> {
    check_channels(&image)?;
    let (height, width, channels) = image.dim();
    let raw: Vec<u8> = image.iter().copied().collect();

    // The buffer length always matches, the Option only guards that contract
    let mismatch = || {
        FilterError::Shape(ndarray::ShapeError::from_kind(
            ndarray::ErrorKind::IncompatibleShape,
        ))
    };
    let dynamic = if channels == 4 {
        DynamicImage::ImageRgba8(
            RgbaImage::from_raw(width as u32, height as u32, raw).ok_or_else(mismatch)?,
        )
    } else {
        DynamicImage::ImageRgb8(
            RgbImage::from_raw(width as u32, height as u32, raw).ok_or_else(mismatch)?,
        )
    };
    Ok(dynamic)
}

fn from_rgb(rgb: RgbImage) -> Result<Array3<u8>> {
    let (width, height) = rgb.dimensions();
    let array = Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())?;
    Ok(array)
}

/// Load an image from disk as RGB.
pub fn read_image(path: &Path) -> Result<Array3<u8>> {
    let rgb = image::open(path)
        .map_err(|e| image_error(path, e))?
        .into_rgb8();
    debug!(path = %path.display(), width = rgb.width(), height = rgb.height(), "image loaded");
    from_rgb(rgb)
}

/// Save an RGB or RGBA image. The format follows the file extension.
pub fn write_image(image: ArrayView3<u8>, path: &Path) -> Result<()> {
    let dynamic = to_dynamic(image)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    dynamic.save(path).map_err(|e| image_error(path, e))?;
    debug!(path = %path.display(), "image written");
    Ok(())
}

/// Resize by `scale` using Catmull-Rom (bicubic) resampling.
///
/// Dimensions are truncated like `int(width * scale)`, with a floor of one
/// pixel. A scale of exactly 1 returns a copy without resampling.
pub fn resize(image: ArrayView3<u8>, scale: f64) -> Result<Array3<u8>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FilterError::InvalidScale(scale));
    }
    if scale == 1.0 {
        return Ok(image.to_owned());
    }

    let (height, width, _) = image.dim();
    let new_width = ((width as f64 * scale) as u32).max(1);
    let new_height = ((height as f64 * scale) as u32).max(1);

    let rgb = to_dynamic(image)?.into_rgb8();
    let resized = imageops::resize(&rgb, new_width, new_height, FilterType::CatmullRom);
    from_rgb(resized)
}

/// Show an image in the system viewer.
///
/// Returns the path of the temporary PNG that was opened.
pub fn display(image: ArrayView3<u8>) -> Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("instapy-{}.png", std::process::id()));
    write_image(image, &path)?;

    let mut command = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    command.arg(&path).spawn()?;
    debug!(path = %path.display(), "image handed to viewer");
    Ok(path)
}
