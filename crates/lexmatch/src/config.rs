//! Runtime configuration
//!
//! Defaults, overridden by environment variables, overridden by CLI flags.
//!
//! Environment variables:
//! - `LEXMATCH_PARALLEL_THRESHOLD`: dictionary size at which scoring goes parallel (default: 1000)
//! - `LEXMATCH_LOG`: default log filter when `RUST_LOG` is unset (default: info)
//! - `LEXMATCH_TIMEOUT_MS`: per-query timeout in milliseconds (default: none)

use std::str::FromStr;
use std::time::Duration;

use lexmatch_core::MatcherConfig;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

pub const ENV_PARALLEL_THRESHOLD: &str = "LEXMATCH_PARALLEL_THRESHOLD";
pub const ENV_LOG: &str = "LEXMATCH_LOG";
pub const ENV_TIMEOUT_MS: &str = "LEXMATCH_TIMEOUT_MS";

/// lexmatch runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub parallel_threshold: usize,
    pub log_filter: String,
    pub timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallel_threshold: MatcherConfig::default().parallel_threshold,
            log_filter: "info".to_string(),
            timeout_ms: None,
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns per variable.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(n) = parse_var(&lookup, ENV_PARALLEL_THRESHOLD) {
            config.parallel_threshold = n;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|s| !s.trim().is_empty()) {
            config.log_filter = filter;
        }
        if let Some(ms) = parse_var(&lookup, ENV_TIMEOUT_MS) {
            config.timeout_ms = Some(ms);
        }

        config
    }

    /// Reject settings that cannot work
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == Some(0) {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        EnvFilter::try_new(&self.log_filter)
            .map_err(|e| Error::Config(format!("invalid log filter {:?}: {}", self.log_filter, e)))?;
        Ok(())
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            parallel_threshold: self.parallel_threshold,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}
