//! Logging setup shared by lexmatch binaries.

use ::tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::error::Result;

/// Initialize tracing with lexmatch defaults.
///
/// Sets up tracing-subscriber with:
/// - Environment filter (RUST_LOG)
/// - Compact format on stderr, leaving stdout for results
pub fn init() {
    init_with_filter("info");
}

/// Validate `config`, then initialize tracing with its log filter.
///
/// Nothing is installed when the configuration is rejected.
pub fn init_from_config(config: &Config) -> Result<()> {
    config.validate()?;
    init_with_filter(&config.log_filter);
    Ok(())
}

/// Initialize tracing with a custom default filter.
///
/// `RUST_LOG` still wins when set. When a global subscriber is already
/// installed it is kept and this call only logs that at debug level.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();

    if let Err(e) = installed {
        debug!(error = %e, "tracing subscriber already installed, keeping it");
    }
}
