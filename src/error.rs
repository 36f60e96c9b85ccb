//! Error type shared by the registry, the filters, the I/O helpers and the
//! timing harness.

use std::path::PathBuf;

use thiserror::Error;

use crate::registry::Implementation;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown filter '{0}' (expected color2gray or color2sepia)")]
    UnknownFilter(String),

    #[error("unknown implementation '{0}' (expected naive, vectorized or native)")]
    UnknownImplementation(String),

    /// The strategy exists but was not compiled into this build.
    #[error(
        "the {0} implementation is not compiled into this build; rebuild with `--features native`"
    )]
    BackendUnavailable(Implementation),

    #[error("sepia intensity must be within [0, 1], got {0}")]
    InvalidIntensity(f64),

    #[error("expected an RGB or RGBA image, got {0} channels")]
    UnsupportedChannels(usize),

    #[error("scale factor must be a positive finite number, got {0}")]
    InvalidScale(f64),

    #[error("call count must be at least 1")]
    InvalidCallCount,

    #[error("image error for {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid image buffer: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
