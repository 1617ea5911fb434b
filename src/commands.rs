//! Command execution for `check`, `show` and `fmt`
//!
//! This module provides:
//! - Settings resolution: buildcfg.toml merged with CLI flags
//! - Workflow per command: resolve → load → validate → output
//! - Exit status selection

use crate::cli::{CheckArgs, CliArgs, Command, FmtArgs, GlobalArgs, ShowArgs};
use crate::config::{FileConfig, Overrides, Settings};
use crate::domain::Dialect;
use crate::error::{AppError, ConfigError, ScriptError};
use crate::output::{create_formatter, DiffFormatter, OutputConfig, Verbosity};
use crate::report::{CheckSummary, FileReport};
use crate::script::{self, get_format, resolve_target, write_script};
use crate::validate::{self, Warning};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Result of a command, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Everything passed
    Success,
    /// Fatal error, or `fmt --check` found a non-canonical file
    Failure,
    /// A build script is invalid, or warnings were denied
    Invalid,
}

impl Status {
    /// Process exit code for this status
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::Failure => 1,
            Status::Invalid => 2,
        }
    }
}

/// Exit code for an error that aborted a command
pub fn error_code(error: &anyhow::Error) -> u8 {
    match error.downcast_ref::<AppError>() {
        Some(e) if e.is_invalid_script() => Status::Invalid.code(),
        _ => Status::Failure.code(),
    }
}

/// Load buildcfg.toml (explicit or discovered) and apply CLI overrides
pub fn load_settings(
    global: &GlobalArgs,
    mut overrides: Overrides,
    cwd: &Path,
) -> Result<Settings, ConfigError> {
    let file = match &global.config {
        Some(path) => {
            debug!(path = %path.display(), "loading config file");
            Some(FileConfig::load(path)?)
        }
        None => FileConfig::discover(cwd)?.map(|(path, config)| {
            debug!(path = %path.display(), "discovered config file");
            config
        }),
    };

    overrides.lenient = global.lenient;
    Ok(Settings::resolve(file.as_ref(), &overrides))
}

/// Run the selected subcommand
pub fn run(args: &CliArgs, out: &mut dyn Write) -> Result<Status, AppError> {
    let cwd = Path::new(".");
    match &args.command {
        Command::Check(check) => {
            let overrides = Overrides {
                min_toolchain: check.min_toolchain,
                deny_warnings: check.deny_warnings,
                ..Overrides::default()
            };
            let settings = load_settings(&args.global, overrides, cwd)?;
            run_check(check, &args.global, &settings, out)
        }
        Command::Show(show) => {
            let settings = load_settings(&args.global, Overrides::default(), cwd)?;
            run_show(show, &args.global, &settings, out)
        }
        Command::Fmt(fmt) => {
            let overrides = Overrides {
                dialect: fmt.dialect,
                ..Overrides::default()
            };
            let settings = load_settings(&args.global, overrides, cwd)?;
            run_fmt(fmt, &args.global, &settings, out)
        }
    }
}

/// Parse, validate and lint one build script file
///
/// Schema failures become an invalid report; I/O failures are returned as errors.
pub fn check_file(path: &Path, settings: &Settings) -> Result<FileReport, ScriptError> {
    let dialect = Dialect::from_path(path).ok_or_else(|| ScriptError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let loaded = match script::load(path, &settings.parse_options()) {
        Ok(loaded) => loaded,
        Err(ScriptError::Invalid { source, .. }) => {
            return Ok(FileReport::invalid(path, dialect, &source))
        }
        Err(e) => return Err(e),
    };

    let parsed = loaded.parsed;
    if let Err(e) = validate::validate_with(&parsed.script, &settings.rules()) {
        return Ok(FileReport::invalid(path, dialect, &e));
    }

    let mut warnings: Vec<Warning> = parsed
        .skipped
        .iter()
        .map(|skipped| Warning::SkippedStatement {
            line: skipped.line,
            statement: skipped.text.clone(),
        })
        .collect();
    warnings.extend(validate::lint(&parsed.script));

    Ok(FileReport::valid(path, dialect, parsed.script, warnings))
}

/// `buildcfg check`
pub fn run_check(
    args: &CheckArgs,
    global: &GlobalArgs,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<Status, AppError> {
    let mut summary = CheckSummary::new();

    for target in args.targets() {
        let path = resolve_target(&target)?;
        let report = check_file(&path, settings)?;
        info!(path = %path.display(), valid = report.is_valid(), "checked build script");
        summary.add_report(report);
    }

    let formatter = create_formatter(OutputConfig::from_cli(
        args.json,
        global.verbose,
        global.quiet,
        global.no_color,
    ));
    formatter.format_check(&summary, out)?;

    if summary.has_failures(settings.deny_warnings) {
        Ok(Status::Invalid)
    } else {
        Ok(Status::Success)
    }
}

/// `buildcfg show`
pub fn run_show(
    args: &ShowArgs,
    global: &GlobalArgs,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<Status, AppError> {
    let path = resolve_target(&args.path)?;
    let loaded = script::load(&path, &settings.parse_options())?;

    let formatter = create_formatter(OutputConfig::from_cli(
        args.json,
        global.verbose,
        global.quiet,
        global.no_color,
    ));
    formatter.format_script(&loaded.parsed.script, args.scope, out)?;

    Ok(Status::Success)
}

/// `buildcfg fmt`
pub fn run_fmt(
    args: &FmtArgs,
    global: &GlobalArgs,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<Status, AppError> {
    let path = resolve_target(&args.path)?;
    let loaded = script::load(&path, &settings.parse_options())?;

    let in_place = args.write || args.check;
    let dialect = match (args.dialect, in_place) {
        (Some(dialect), true) if dialect != loaded.dialect => {
            return Err(ConfigError::invalid_value(
                "dialect",
                dialect.to_string(),
                format!("{} is a {} build script", path.display(), loaded.dialect),
            )
            .into());
        }
        (Some(dialect), _) => dialect,
        (None, true) => loaded.dialect,
        (None, false) => settings.dialect.unwrap_or(loaded.dialect),
    };

    let rendered = get_format(dialect).render(&loaded.parsed.script);
    let quiet = global.verbosity() == Verbosity::Quiet;

    if in_place && !loaded.parsed.skipped.is_empty() {
        for skipped in &loaded.parsed.skipped {
            warn!(
                path = %path.display(),
                line = skipped.line,
                statement = %skipped.text,
                "not representable in canonical form"
            );
        }
        return Err(ScriptError::SkippedContent {
            path,
            lines: loaded.parsed.skipped.iter().map(|s| s.line).collect(),
        }
        .into());
    }

    if args.write {
        let changed = write_script(&path, &rendered)?;
        if !quiet {
            if changed {
                writeln!(out, "formatted {}", path.display())?;
            } else {
                writeln!(out, "{} is already formatted", path.display())?;
            }
        }
        return Ok(Status::Success);
    }

    if args.check {
        if loaded.content == rendered {
            if !quiet {
                writeln!(out, "{} is formatted", path.display())?;
            }
            return Ok(Status::Success);
        }
        writeln!(out, "{} is not in canonical form", path.display())?;
        return Ok(Status::Failure);
    }

    if args.diff {
        DiffFormatter::new(!global.no_color).format_diff(&path, &loaded.content, &rendered, out)?;
        return Ok(Status::Success);
    }

    write!(out, "{}", rendered)?;
    Ok(Status::Success)
}
