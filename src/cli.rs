//! CLI argument parsing module for buildcfg

use crate::domain::{Dialect, Scope};
use crate::output::Verbosity;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parse a toolchain version given on the command line; must be positive
fn parse_toolchain_version(s: &str) -> Result<u32, String> {
    let version: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid toolchain version: {}", s))?;
    if version == 0 {
        return Err("toolchain version must be a positive integer".to_string());
    }
    Ok(version)
}

/// Gradle build script schema reader and validator
#[derive(Parser, Debug, Clone)]
#[command(
    name = "buildcfg",
    version,
    about = "Read, validate and format Gradle build scripts"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options accepted by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - only failures and the summary
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: ./buildcfg.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Skip statements and blocks outside the schema instead of rejecting them
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl GlobalArgs {
    /// Verbosity selected by --verbose / --quiet
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse and validate build scripts
    Check(CheckArgs),
    /// Print the parsed structure of a build script
    Show(ShowArgs),
    /// Rewrite a build script in canonical form
    Fmt(FmtArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Build script files or project directories (default: current directory)
    #[arg(action = ArgAction::Append)]
    pub paths: Vec<PathBuf>,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Fail when any lint warning is reported
    #[arg(long)]
    pub deny_warnings: bool,

    /// Lowest acceptable Java toolchain version
    #[arg(long, value_name = "N", value_parser = parse_toolchain_version)]
    pub min_toolchain: Option<u32>,
}

impl CheckArgs {
    /// Paths to check, defaulting to the current directory
    pub fn targets(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Build script file or project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output the parsed structure as JSON
    #[arg(long)]
    pub json: bool,

    /// Only list library dependencies of this scope (compile, test-compile, test-runtime)
    #[arg(long)]
    pub scope: Option<Scope>,
}

#[derive(Args, Debug, Clone)]
pub struct FmtArgs {
    /// Build script file or project directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Dialect to render (default: the file's own dialect)
    #[arg(long)]
    pub dialect: Option<Dialect>,

    /// Rewrite the file in place
    #[arg(long, conflicts_with_all = ["check", "diff"])]
    pub write: bool,

    /// Fail when the file is not in canonical form
    #[arg(long, conflicts_with = "diff")]
    pub check: bool,

    /// Show the changes as a line diff
    #[arg(long)]
    pub diff: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let args = CliArgs::parse_from(["buildcfg", "check"]);
        match args.command {
            Command::Check(check) => {
                assert!(check.paths.is_empty());
                assert_eq!(check.targets(), vec![PathBuf::from(".")]);
                assert!(!check.json);
                assert!(!check.deny_warnings);
                assert_eq!(check.min_toolchain, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(args.global.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_check_multiple_paths() {
        let args = CliArgs::parse_from([
            "buildcfg",
            "check",
            "app/build.gradle.kts",
            "lib",
            "--json",
            "--deny-warnings",
            "--min-toolchain",
            "17",
        ]);
        match args.command {
            Command::Check(check) => {
                assert_eq!(
                    check.targets(),
                    vec![PathBuf::from("app/build.gradle.kts"), PathBuf::from("lib")]
                );
                assert!(check.json);
                assert!(check.deny_warnings);
                assert_eq!(check.min_toolchain, Some(17));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_min_toolchain_rejects_zero() {
        let result = CliArgs::try_parse_from(["buildcfg", "check", "--min-toolchain", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from([
            "buildcfg",
            "show",
            "build.gradle",
            "--verbose",
            "--lenient",
            "--no-color",
            "--config",
            "ci/buildcfg.toml",
        ]);
        assert!(args.global.verbose);
        assert!(args.global.lenient);
        assert!(args.global.no_color);
        assert_eq!(args.global.config, Some(PathBuf::from("ci/buildcfg.toml")));
        assert_eq!(args.global.verbosity(), Verbosity::Verbose);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = CliArgs::try_parse_from(["buildcfg", "-q", "--verbose", "check"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_scope() {
        let args = CliArgs::parse_from(["buildcfg", "show", ".", "--scope", "test-runtime"]);
        match args.command {
            Command::Show(show) => assert_eq!(show.scope, Some(Scope::TestRuntime)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_show_unknown_scope() {
        let result = CliArgs::try_parse_from(["buildcfg", "show", ".", "--scope", "runtime"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_fmt_options() {
        let args = CliArgs::parse_from([
            "buildcfg",
            "fmt",
            "build.gradle",
            "--dialect",
            "kotlin",
            "--diff",
        ]);
        match args.command {
            Command::Fmt(fmt) => {
                assert_eq!(fmt.path, PathBuf::from("build.gradle"));
                assert_eq!(fmt.dialect, Some(Dialect::Kotlin));
                assert!(fmt.diff);
                assert!(!fmt.write);
                assert!(!fmt.check);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_fmt_modes_conflict() {
        assert!(CliArgs::try_parse_from(["buildcfg", "fmt", "--write", "--check"]).is_err());
        assert!(CliArgs::try_parse_from(["buildcfg", "fmt", "--write", "--diff"]).is_err());
        assert!(CliArgs::try_parse_from(["buildcfg", "fmt", "--check", "--diff"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["buildcfg"]).is_err());
    }

    #[test]
    fn test_parse_toolchain_version() {
        assert_eq!(parse_toolchain_version("21").unwrap(), 21);
        assert!(parse_toolchain_version("0").is_err());
        assert!(parse_toolchain_version("-1").is_err());
        assert!(parse_toolchain_version("abc").is_err());
    }
}
