//! ginkgo-tester - kubetest2 tester for ginkgo based e2e suites
//!
//! Clones a repository into the kubetest2 run directory and runs its e2e
//! suite with ginkgo. ginkgo's output goes straight to this process's stdout
//! and stderr, and its exit code becomes ours.
//!
//! ## Usage
//!
//! ```bash
//! # Run conformance tests from a repository on 4 nodes
//! ginkgo-tester --repo https://github.com/kubernetes/kubernetes \
//!     --parallel 4 --focus-regex '\[Conformance\]'
//!
//! # Pass extra flags to ginkgo and an explicit environment
//! ginkgo-tester --repo https://example.com/e2e.git \
//!     --ginkgo-args "--v --poll-progress-after=10m" \
//!     --env KUBECONFIG=/etc/kubeconfig,HOME=/tmp --timeout 2h
//! ```

use std::process::ExitCode;
use tracing::error;

mod artifacts;
mod cli;
mod config;
mod error;
mod executor;
mod repo;
mod tester;
mod utils;

use cli::CliOutcome;
use config::Kubetest2Env;
use tester::Tester;
use utils::{init_logger, LogLevel};

/// Version recorded in metadata.json, `GIT_TAG` at build time when set
pub const TESTER_VERSION: &str = match option_env!("GIT_TAG") {
    Some(tag) => tag,
    None => env!("CARGO_PKG_VERSION"),
};

#[tokio::main]
async fn main() -> ExitCode {
    let outcome = cli::parse_from(std::env::args_os());

    let verbose = matches!(outcome, Ok(CliOutcome::Run { verbose: true, .. }));
    if let Err(e) = init_logger(LogLevel::from_verbose(verbose)) {
        eprintln!("{e:#}");
    }

    match run(outcome).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("failed to run ginkgo tester: {}", e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(outcome: error::Result<CliOutcome>) -> error::Result<()> {
    match outcome? {
        CliOutcome::Exit(text) => {
            print!("{text}");
            Ok(())
        }
        CliOutcome::Run { config, .. } => Tester::new(config, Kubetest2Env::load()).test().await,
    }
}
