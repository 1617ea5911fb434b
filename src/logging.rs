use crate::output::Verbosity;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr subscriber; `RUST_LOG` takes precedence over verbosity
pub fn init_cli_logger(verbosity: Verbosity) {
    let default_filter = match verbosity {
        Verbosity::Quiet => "buildcfg=error",
        Verbosity::Normal => "buildcfg=warn",
        Verbosity::Verbose => "buildcfg=debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
