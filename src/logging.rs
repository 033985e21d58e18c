use std::io;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, TrainerError};

/// Install the global subscriber. Logs go to stderr so stdout stays usable
/// for tables and predictions.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks `debug` over `info`.
pub fn init_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(build_env_filter(verbose))
        .try_init()
        .map_err(|e| TrainerError::Logging(e.to_string()))
}

fn build_env_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
