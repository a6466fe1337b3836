//! Logging setup utilities for the Hiroba chat server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the package's library and binary targets share the package name
/// (with `-` replaced by `_`), so one directive covers them. HTTP request
/// spans emitted by `tower_http` use the same level. The log level can be
/// overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `package_name` - The cargo package name (e.g., `env!("CARGO_PKG_NAME")`)
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "info");
/// ```
pub fn setup_logger(package_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(package_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_directives(package_name: &str, default_log_level: &str) -> String {
    format!(
        "{}={},tower_http={}",
        package_name.replace('-', "_"),
        default_log_level,
        default_log_level
    )
}
