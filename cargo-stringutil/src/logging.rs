//! Log subscriber set-up for the CLI.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "STRINGUTIL_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
#[must_use]
pub const fn fallback_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Installs a compact stderr logger.
///
/// A second call, or a subscriber installed elsewhere, leaves the existing
/// one in place.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose)));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}
