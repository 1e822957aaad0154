use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a log file. When unset, logs go to stderr.
pub const LOG_FILE_ENV: &str = "ARTICLES_CLIENT_LOG";

/// Initialize tracing.
///
/// The level comes from `RUST_LOG` (default `default_level`). Output goes to
/// stderr so it never mixes with command output on stdout, unless
/// `ARTICLES_CLIENT_LOG` names a file, in which case the file gets it
/// instead. Log files are suffixed with the PID: `{path}.{pid}`.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(log_path) = std::env::var(LOG_FILE_ENV).ok() else {
        init_stderr(filter);
        return;
    };

    let unique_path = format!("{}.{}", log_path, std::process::id());
    let file = match std::fs::File::create(&unique_path) {
        Ok(file) => file,
        Err(e) => {
            init_stderr(filter);
            tracing::warn!(path = %unique_path, error = %e, "failed to create log file, logging to stderr");
            return;
        }
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn init_stderr(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();
}
