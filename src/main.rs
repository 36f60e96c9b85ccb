use std::process::ExitCode;

use clap::Parser;
use instapy::cli::{run, Args};
use tracing::error;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
