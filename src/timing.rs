//! Timing harness for comparing filter strategies.
//!
//! `time_one` averages wall-clock time over a fixed number of calls with no
//! warm-up and no outlier rejection. `make_reports` times every available
//! strategy against the naive reference for both filter kinds and writes a
//! plain-text report. Measurements are as noisy as the machine they run on.

use std::fmt;
use std::fs;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ndarray::{Array3, ArrayView3};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{FilterError, Result};
use crate::filters::core::check_channels;
use crate::io::read_image;
use crate::registry::{get_filter, FilterKind, Implementation};

/// Calls per measurement when nothing else is configured.
pub const DEFAULT_CALLS: usize = 3;

/// Report written by `make_reports` when no path is configured.
pub const REPORT_FILE: &str = "timing_report.txt";

/// Average seconds per call of `filter(image)` over `calls` calls.
pub fn time_one<F>(mut filter: F, image: ArrayView3<u8>, calls: usize) -> Result<f64>
where
    F: FnMut(ArrayView3<u8>) -> Array3<u8>,
{
    if calls == 0 {
        return Err(FilterError::InvalidCallCount);
    }

    let mut total = 0.0f64;
    for _ in 0..calls {
        let start = Instant::now();
        black_box(filter(black_box(image.view())));
        total += start.elapsed().as_secs_f64();
    }

    let mean = total / calls as f64;
    debug!(calls, mean_s = mean, "timed filter");
    Ok(mean)
}

// ============================================================================
// Report types
// ============================================================================

/// One timed (implementation, filter) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub implementation: Implementation,
    pub kind: FilterKind,
    /// Mean seconds per call.
    pub seconds: f64,
    /// Reference time divided by this entry's time. 1.0 for the reference.
    pub speedup: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimingReport {
    pub source: String,
    pub width: usize,
    pub height: usize,
    pub calls: usize,
    pub entries: Vec<ReportEntry>,
}

impl TimingReport {
    /// Entries for a single filter kind, reference first.
    pub fn entries_for(&self, kind: FilterKind) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn write_text(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Timing performed using {}: {}x{}",
            self.source, self.width, self.height
        )?;
        for entry in &self.entries {
            if entry.implementation == Implementation::REFERENCE {
                write!(
                    f,
                    "\n\nReference ({}) filter time {}: {}s (calls={})",
                    entry.implementation,
                    entry.kind,
                    format_seconds(entry.seconds),
                    self.calls
                )?;
            } else {
                write!(
                    f,
                    "\nTiming: {} {}: {}s (speedup={:.2}x)",
                    entry.implementation,
                    entry.kind,
                    format_seconds(entry.seconds),
                    entry.speedup
                )?;
            }
        }
        writeln!(f)
    }
}

/// Seconds to three significant digits, switching to exponent form outside
/// `[1e-4, 1e3)` so fast strategies never print as zero.
pub fn format_seconds(seconds: f64) -> String {
    if seconds == 0.0 || !seconds.is_finite() {
        return format!("{seconds}");
    }
    let magnitude = seconds.abs().log10().floor() as i32;
    if !(-4..3).contains(&magnitude) {
        return format!("{seconds:.2e}");
    }
    let decimals = (2 - magnitude).max(0) as usize;
    format!("{seconds:.decimals$}")
}

fn speedup(reference: f64, seconds: f64) -> f64 {
    if seconds > 0.0 {
        reference / seconds
    } else {
        f64::INFINITY
    }
}

// ============================================================================
// Report generation
// ============================================================================

/// Where `make_reports` reads from and writes to.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub calls: usize,
    pub report_path: PathBuf,
    pub json_path: Option<PathBuf>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            calls: DEFAULT_CALLS,
            report_path: PathBuf::from(REPORT_FILE),
            json_path: None,
        }
    }
}

/// Time the reference and every other available strategy on `image`.
pub fn build_report(image: ArrayView3<u8>, source: &str, calls: usize) -> Result<TimingReport> {
    check_channels(&image)?;
    let (height, width, _) = image.dim();
    let mut entries = Vec::new();

    for kind in FilterKind::ALL {
        let reference = get_filter(kind, Implementation::REFERENCE)?;
        let reference_time = time_one(reference.func(), image.view(), calls)?;
        info!(filter = %kind, seconds = reference_time, "reference timed");
        entries.push(ReportEntry {
            implementation: Implementation::REFERENCE,
            kind,
            seconds: reference_time,
            speedup: 1.0,
        });

        for implementation in Implementation::ALL {
            if implementation == Implementation::REFERENCE {
                continue;
            }
            if !implementation.is_available() {
                warn!(%implementation, "implementation not compiled in, skipping");
                continue;
            }
            let filter = get_filter(kind, implementation)?;
            let seconds = time_one(filter.func(), image.view(), calls)?;
            let entry = ReportEntry {
                implementation,
                kind,
                seconds,
                speedup: speedup(reference_time, seconds),
            };
            info!(filter = %filter.name(), seconds, speedup = entry.speedup, "implementation timed");
            entries.push(entry);
        }
    }

    Ok(TimingReport {
        source: source.to_string(),
        width,
        height,
        calls,
        entries,
    })
}

/// Load `path`, time all strategies, print the report and write it to disk.
pub fn make_reports(path: &Path, options: &ReportOptions) -> Result<TimingReport> {
    let image = read_image(path)?;
    let report = build_report(image.view(), &path.display().to_string(), options.calls)?;

    print!("{report}");
    report.write_text(&options.report_path)?;
    info!(path = %options.report_path.display(), "timing report written");

    if let Some(json_path) = &options.json_path {
        report.write_json(json_path)?;
        info!(path = %json_path.display(), "json report written");
    }

    Ok(report)
}
