//! Filter registry: maps a (filter kind, implementation) pair to a transform.
//!
//! The table is built on first lookup and is read-only afterwards. Names
//! accepted on the command line include the historical aliases (`python`,
//! `numpy`, `numba`, `cython`) so existing invocations keep working.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use ndarray::{Array3, ArrayView3};
use serde::Serialize;
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::filters::{self, core::check_channels};

/// Signature shared by every registered transform.
pub type FilterFn = fn(ArrayView3<u8>) -> Array3<u8>;

// ============================================================================
// Filter kind
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Grayscale,
    Sepia,
}

impl FilterKind {
    pub const ALL: [FilterKind; 2] = [FilterKind::Grayscale, FilterKind::Sepia];

    /// Conventional filter name, as used in reports.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "color2gray",
            FilterKind::Sepia => "color2sepia",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color2gray" | "grayscale" | "gray" => Ok(FilterKind::Grayscale),
            "color2sepia" | "sepia" => Ok(FilterKind::Sepia),
            _ => Err(FilterError::UnknownFilter(s.to_string())),
        }
    }
}

// ============================================================================
// Implementation strategy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Implementation {
    /// Per-pixel loops. Reference for speedup comparisons.
    Naive,
    Vectorized,
    /// Requires the `native` feature.
    Native,
}

impl Implementation {
    pub const ALL: [Implementation; 3] = [
        Implementation::Naive,
        Implementation::Vectorized,
        Implementation::Native,
    ];

    /// The baseline every other strategy is compared against.
    pub const REFERENCE: Implementation = Implementation::Naive;

    pub fn name(self) -> &'static str {
        match self {
            Implementation::Naive => "naive",
            Implementation::Vectorized => "vectorized",
            Implementation::Native => "native",
        }
    }

    pub fn is_available(self) -> bool {
        match self {
            Implementation::Naive | Implementation::Vectorized => true,
            Implementation::Native => cfg!(feature = "native"),
        }
    }

    /// Fail fast if this strategy was left out of the build.
    pub fn ensure_available(self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(FilterError::BackendUnavailable(self))
        }
    }

    /// Strategies compiled into this build, reference first.
    pub fn available() -> Vec<Implementation> {
        Self::ALL.into_iter().filter(|i| i.is_available()).collect()
    }
}

impl fmt::Display for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Implementation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" | "python" => Ok(Implementation::Naive),
            "vectorized" | "numpy" => Ok(Implementation::Vectorized),
            "native" | "numba" | "cython" => Ok(Implementation::Native),
            _ => Err(FilterError::UnknownImplementation(s.to_string())),
        }
    }
}

// ============================================================================
// Resolved filter
// ============================================================================

/// A transform resolved from the registry.
#[derive(Clone, Copy)]
pub struct Filter {
    kind: FilterKind,
    implementation: Implementation,
    func: FilterFn,
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn implementation(&self) -> Implementation {
        self.implementation
    }

    /// The raw transform, without channel validation.
    pub fn func(&self) -> FilterFn {
        self.func
    }

    /// `"{implementation}_{filter}"`, e.g. `vectorized_color2gray`.
    pub fn name(&self) -> String {
        format!("{}_{}", self.implementation, self.kind)
    }

    /// Validate the buffer and run the transform.
    pub fn apply(&self, image: ArrayView3<u8>) -> Result<Array3<u8>> {
        check_channels(&image)?;
        Ok((self.func)(image))
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("kind", &self.kind)
            .field("implementation", &self.implementation)
            .finish()
    }
}

// ============================================================================
// Lookup table
// ============================================================================

static REGISTRY: LazyLock<HashMap<(FilterKind, Implementation), FilterFn>> =
    LazyLock::new(|| {
        let mut table: HashMap<(FilterKind, Implementation), FilterFn> = HashMap::new();
        table.insert(
            (FilterKind::Grayscale, Implementation::Naive),
            filters::naive::grayscale,
        );
        table.insert(
            (FilterKind::Sepia, Implementation::Naive),
            filters::naive::sepia,
        );
        table.insert(
            (FilterKind::Grayscale, Implementation::Vectorized),
            filters::vectorized::grayscale,
        );
        table.insert(
            (FilterKind::Sepia, Implementation::Vectorized),
            filters::vectorized::sepia,
        );
        #[cfg(feature = "native")]
        {
            table.insert(
                (FilterKind::Grayscale, Implementation::Native),
                filters::native::grayscale,
            );
            table.insert(
                (FilterKind::Sepia, Implementation::Native),
                filters::native::sepia,
            );
        }
        debug!(filters = table.len(), "filter registry populated");
        table
    });

/// Resolve a filter from typed identifiers.
pub fn get_filter(kind: FilterKind, implementation: Implementation) -> Result<Filter> {
    implementation.ensure_available()?;
    let func = REGISTRY
        .get(&(kind, implementation))
        .copied()
        .ok_or(FilterError::BackendUnavailable(implementation))?;
    Ok(Filter {
        kind,
        implementation,
        func,
    })
}

/// Resolve a filter from user-facing names such as `("color2sepia", "numpy")`.
pub fn lookup(filter: &str, implementation: &str) -> Result<Filter> {
    let kind: FilterKind = filter.parse()?;
    let implementation: Implementation = implementation.parse()?;
    get_filter(kind, implementation)
}
