//! Log setup for function binaries.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g.
/// `XFN_LOG=info,xfn_sdk=trace`.
pub const LOG_ENV: &str = "XFN_LOG";

/// The filter used when `XFN_LOG` is unset or unparseable.
pub fn default_filter(debug: bool) -> EnvFilter {
    EnvFilter::new(if debug { "debug" } else { "info" })
}

fn filter(debug: bool) -> EnvFilter {
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::from_str(&directive).unwrap_or_else(|_| default_filter(debug)),
        Err(_) => default_filter(debug),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(debug: bool) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))
}
