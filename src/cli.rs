//! Command-line interface: filter one image, time it, or produce the full
//! comparison report.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};

use crate::error::Result;
use crate::filters::{self, SepiaIntensity};
use crate::io;
use crate::logging::init_logging;
use crate::registry::{get_filter, FilterKind, Implementation};
use crate::timing::{
    format_seconds, make_reports, time_one, ReportOptions, DEFAULT_CALLS, REPORT_FILE,
};

#[derive(Parser, Debug)]
#[command(name = "instapy", version, about = "Apply grayscale or sepia filters to an image")]
pub struct Args {
    /// The image file to apply the filter to
    pub file: PathBuf,

    /// Output file; the result is displayed when omitted
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Select the grayscale filter (default)
    #[arg(short, long, conflicts_with = "sepia")]
    pub gray: bool,

    /// Select the sepia filter
    #[arg(long)]
    pub sepia: bool,

    /// Sepia intensity in [0, 1], used with --sepia
    #[arg(short = 'k', long, default_value_t = 1.0)]
    pub intensity: f64,

    /// Scale factor to resize the image before filtering
    #[arg(short, long, default_value_t = 1.0)]
    pub scale: f64,

    /// Implementation: naive|vectorized|native (or python|numpy|numba)
    #[arg(short, long, default_value = "naive", value_parser = parse_implementation)]
    pub implementation: Implementation,

    /// Also report the average runtime of the selected filter
    #[arg(short, long)]
    pub runtime: bool,

    /// Time every implementation on FILE and write a report instead of filtering
    #[arg(long)]
    pub report: bool,

    /// Calls per timing measurement
    #[arg(long, default_value_t = DEFAULT_CALLS)]
    pub calls: usize,

    /// Where `--report` writes its text report
    #[arg(long, default_value = REPORT_FILE)]
    pub report_file: PathBuf,

    /// Also write the `--report` results as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_implementation(s: &str) -> std::result::Result<Implementation, String> {
    s.parse().map_err(|e: crate::error::FilterError| e.to_string())
}

impl Args {
    pub fn filter_kind(&self) -> FilterKind {
        if self.sepia {
            FilterKind::Sepia
        } else {
            FilterKind::Grayscale
        }
    }
}

/// Load, filter, then save or display. Prints the average runtime when asked.
pub fn run_filter(args: &Args) -> Result<()> {
    let kind = args.filter_kind();
    let intensity = match kind {
        FilterKind::Sepia => SepiaIntensity::new(args.intensity)?,
        FilterKind::Grayscale => SepiaIntensity::FULL,
    };
    let filter = get_filter(kind, args.implementation)?;

    let image = io::read_image(&args.file)?;
    let image = io::resize(image.view(), args.scale)?;

    let filtered = match kind {
        FilterKind::Sepia => filters::apply_sepia(image.view(), args.implementation, intensity)?,
        FilterKind::Grayscale => filter.apply(image.view())?,
    };

    match &args.out {
        Some(out) => {
            io::write_image(filtered.view(), out)?;
            info!(path = %out.display(), "filtered image saved");
        }
        None => {
            io::display(filtered.view())?;
        }
    }

    if args.runtime {
        let seconds = match kind {
            FilterKind::Sepia => {
                let sepia = filters::sepia_fn(args.implementation)?;
                time_one(|view| sepia(view, intensity), image.view(), args.calls)?
            }
            FilterKind::Grayscale => time_one(filter.func(), image.view(), args.calls)?,
        };
        println!(
            "Average time over {} runs: {}: {}s",
            args.calls,
            filter.name(),
            format_seconds(seconds)
        );
    }

    Ok(())
}

/// Parse arguments and dispatch. Used by the `instapy` binary.
pub fn run(args: Args) -> Result<()> {
    init_logging(if args.verbose { Level::DEBUG } else { Level::INFO });

    if args.report {
        let options = ReportOptions {
            calls: args.calls,
            report_path: args.report_file.clone(),
            json_path: args.json.clone(),
        };
        make_reports(&args.file, &options)?;
        return Ok(());
    }

    run_filter(&args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use clap::CommandFactory;
    use ndarray::Array3;

    #[test]
    fn test_command_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["instapy", "rain.jpg"]).unwrap();
        assert_eq!(args.filter_kind(), FilterKind::Grayscale);
        assert_eq!(args.implementation, Implementation::Naive);
        assert_eq!(args.calls, 3);
        assert_eq!(args.scale, 1.0);
        assert_eq!(args.report_file, PathBuf::from("timing_report.txt"));
    }

    #[test]
    fn test_legacy_implementation_names() {
        let args =
            Args::try_parse_from(["instapy", "rain.jpg", "--sepia", "-i", "numpy"]).unwrap();
        assert_eq!(args.filter_kind(), FilterKind::Sepia);
        assert_eq!(args.implementation, Implementation::Vectorized);
        assert!(Args::try_parse_from(["instapy", "rain.jpg", "-i", "julia"]).is_err());
    }

    #[test]
    fn test_gray_and_sepia_conflict() {
        assert!(Args::try_parse_from(["instapy", "a.png", "--gray", "--sepia"]).is_err());
    }

    #[test]
    fn test_run_filter_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let img = Array3::from_shape_fn((4, 6, 3), |(y, x, c)| (y * 40 + x * 20 + c * 5) as u8);
        io::write_image(img.view(), &input).unwrap();

        let args = Args::try_parse_from([
            "instapy",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--sepia",
            "-k",
            "0.5",
            "-i",
            "vectorized",
        ])
        .unwrap();
        run_filter(&args).unwrap();

        let written = io::read_image(&output).unwrap();
        let expected = filters::apply_sepia(
            img.view(),
            Implementation::Naive,
            SepiaIntensity::new(0.5).unwrap(),
        )
        .unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_run_filter_ignores_intensity_for_grayscale() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let img = Array3::from_shape_fn((3, 5, 3), |(y, x, c)| (y * 60 + x * 30 + c * 9) as u8);
        io::write_image(img.view(), &input).unwrap();

        let args = Args::try_parse_from([
            "instapy",
            input.to_str().unwrap(),
            "-g",
            "-k",
            "2",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();
        run_filter(&args).unwrap();

        let written = io::read_image(&output).unwrap();
        assert_eq!(written, filters::naive::grayscale(img.view()));
    }

    #[test]
    fn test_run_filter_rejects_bad_intensity() {
        let args =
            Args::try_parse_from(["instapy", "missing.png", "--sepia", "-k", "1.5"]).unwrap();
        assert!(matches!(
            run_filter(&args),
            Err(FilterError::InvalidIntensity(_))
        ));
    }
}
