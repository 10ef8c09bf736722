//! Logging setup
//!
//! Logs go to stderr so stdout stays with ginkgo and `--help`.

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
        }
    }

    /// Level selected by the `--verbose` flag
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

/// Filter used when `RUST_LOG` is not set
fn default_filter(level: LogLevel) -> String {
    format!("ginkgo_tester={}", level.to_tracing_level())
}

/// Initialize the logger; `RUST_LOG` takes precedence over `level`
pub fn init_logger(level: LogLevel) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logger: {e}"))
}
