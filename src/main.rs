//! buildcfg - Gradle build script schema reader and validator
//!
//! Subcommands:
//! - check: parse and validate build.gradle.kts / build.gradle files
//! - show: print the parsed structure
//! - fmt: render the canonical form of a build script

use buildcfg::cli::CliArgs;
use buildcfg::commands::{self, error_code, Status};
use buildcfg::logging;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.global.no_color {
        colored::control::set_override(false);
    }
    logging::init_cli_logger(args.global.verbosity());
    tracing::debug!("buildcfg v{}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(status) => ExitCode::from(status.code()),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_code(&e))
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<Status> {
    let mut stdout = io::stdout().lock();
    let status = commands::run(args, &mut stdout)?;
    stdout.flush()?;
    Ok(status)
}
