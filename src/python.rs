//! Python bindings (feature `python`).
//!
//! Images cross the boundary as `(height, width, 3|4)` uint8 numpy arrays.
//! Lookup failures raise `LookupError`; validation failures raise
//! `ValueError`.

use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
use pyo3::exceptions::{PyLookupError, PyValueError};
use pyo3::prelude::*;

use crate::error::FilterError;
use crate::filters::{apply_sepia, SepiaIntensity};
use crate::registry::{lookup, FilterKind, Implementation};
use crate::timing;

fn to_py_err(e: FilterError) -> PyErr {
    match &e {
        FilterError::UnknownFilter(_)
        | FilterError::UnknownImplementation(_)
        | FilterError::BackendUnavailable(_) => PyLookupError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

// ========================================================================
// Filters
// ========================================================================

/// Convert an RGB(A) uint8 image to grayscale.
#[pyfunction]
#[pyo3(signature = (image, implementation="naive"))]
pub fn color2gray<'py>(
    py: Python<'py>,
    image: PyReadonlyArray3<'py, u8>,
    implementation: &str,
) -> PyResult<Bound<'py, PyArray3<u8>>> {
    let filter = lookup(FilterKind::Grayscale.name(), implementation).map_err(to_py_err)?;
    let result = filter.apply(image.as_array()).map_err(to_py_err)?;
    Ok(result.into_pyarray(py))
}

/// Apply sepia with intensity `k` in [0, 1].
#[pyfunction]
#[pyo3(signature = (image, implementation="naive", k=1.0))]
pub fn color2sepia<'py>(
    py: Python<'py>,
    image: PyReadonlyArray3<'py, u8>,
    implementation: &str,
    k: f64,
) -> PyResult<Bound<'py, PyArray3<u8>>> {
    let implementation: Implementation = implementation.parse().map_err(to_py_err)?;
    let intensity = SepiaIntensity::new(k).map_err(to_py_err)?;
    let result = apply_sepia(image.as_array(), implementation, intensity).map_err(to_py_err)?;
    Ok(result.into_pyarray(py))
}

/// Names of the implementations compiled into this build.
#[pyfunction]
pub fn implementations() -> Vec<&'static str> {
    Implementation::available()
        .into_iter()
        .map(Implementation::name)
        .collect()
}

// ========================================================================
// Timing
// ========================================================================

/// Average seconds per call of `filter` with `implementation` on `image`.
#[pyfunction]
#[pyo3(signature = (filter, implementation, image, calls=timing::DEFAULT_CALLS))]
pub fn time_one<'py>(
    filter: &str,
    implementation: &str,
    image: PyReadonlyArray3<'py, u8>,
    calls: usize,
) -> PyResult<f64> {
    let filter = lookup(filter, implementation).map_err(to_py_err)?;
    let view = image.as_array();
    crate::filters::core::check_channels(&view).map_err(to_py_err)?;
    timing::time_one(filter.func(), view, calls).map_err(to_py_err)
}

/// instapy Rust extension module
#[pymodule]
pub fn instapy(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(color2gray, m)?)?;
    m.add_function(wrap_pyfunction!(color2sepia, m)?)?;
    m.add_function(wrap_pyfunction!(implementations, m)?)?;
    m.add_function(wrap_pyfunction!(time_one, m)?)?;
    Ok(())
}
