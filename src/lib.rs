//! instapy: grayscale and sepia filters, three ways.
//!
//! Each filter kind is implemented by interchangeable strategies that share
//! one numeric contract:
//! - **naive**: explicit per-pixel loops (the timing reference)
//! - **vectorized**: whole-array ndarray expressions
//! - **native**: flat-slice kernels spread over rayon (feature `native`)
//!
//! ## Image Format
//! Filters take `(height, width, channels)` `u8` arrays:
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4), alpha copied through unchanged
//!
//! Outputs are freshly allocated with the input's shape. Values are rounded
//! half up and clamped to 0-255 before narrowing.
//!
//! ## Usage
//! ```no_run
//! use instapy::registry::lookup;
//! use instapy::io::{read_image, write_image};
//! use std::path::Path;
//!
//! # fn main() -> instapy::Result<()> {
//! let image = read_image(Path::new("rain.jpg"))?;
//! let sepia = lookup("color2sepia", "vectorized")?.apply(image.view())?;
//! write_image(sepia.view(), Path::new("rain_sepia.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod filters;
pub mod io;
pub mod logging;
pub mod registry;
pub mod timing;

#[cfg(feature = "python")]
mod python;

pub use error::{FilterError, Result};
pub use filters::SepiaIntensity;
pub use registry::{get_filter, lookup, Filter, FilterKind, Implementation};
pub use timing::{make_reports, time_one, TimingReport};

#[cfg(feature = "python")]
pub use python::instapy;
