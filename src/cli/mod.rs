//! CLI argument parsing
//!
//! Defines command-line interface using clap. Each field carries its flag
//! name, default and help text.

use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::time::Duration;

use crate::config::{
    validate_env_entry, TesterConfig, DEFAULT_FLAKE_ATTEMPTS, DEFAULT_PARALLEL,
};
use crate::error::{Result, TesterError};
use crate::utils::parse_go_duration;
use crate::TESTER_VERSION;

/// kubetest2 tester that clones a repository and runs its e2e suite with ginkgo
#[derive(Parser, Debug)]
#[command(name = "ginkgo-tester")]
#[command(version = TESTER_VERSION)]
#[command(about = "Clone a repository and run its e2e suite through ginkgo")]
#[command(long_about = None)]
pub struct Args {
    /// Make up to this many attempts to run each spec
    #[arg(
        long,
        default_value_t = DEFAULT_FLAKE_ATTEMPTS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub flake_attempts: u32,

    /// Additional arguments supported by the ginkgo binary
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub ginkgo_args: String,

    /// Run this many tests in parallel at once
    #[arg(
        long,
        default_value_t = DEFAULT_PARALLEL,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub parallel: u32,

    /// Regular expression of jobs to skip
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub skip_regex: String,

    /// Regular expression of jobs to focus on
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub focus_regex: String,

    /// How long (in Go duration format) to wait for ginkgo tests to complete
    #[arg(long, default_value = "24h0m0s", value_parser = parse_go_duration)]
    pub timeout: Duration,

    /// List of KEY=VALUE env variables to pass to ginkgo
    #[arg(long, value_delimiter = ',', value_parser = parse_env_entry)]
    pub env: Vec<String>,

    /// Git repo to clone for the test
    #[arg(long, default_value = "")]
    pub repo: String,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Result of reading the command line
#[derive(Debug)]
pub enum CliOutcome {
    /// Help or version text was requested; print it and stop
    Exit(String),
    /// Proceed with this configuration
    Run { config: TesterConfig, verbose: bool },
}

fn parse_env_entry(entry: &str) -> std::result::Result<String, String> {
    validate_env_entry(entry).map(|_| entry.to_string())
}

impl Args {
    /// Overlay parsed flags onto the default configuration
    pub fn into_config(self) -> TesterConfig {
        TesterConfig {
            flake_attempts: self.flake_attempts,
            ginkgo_args: self.ginkgo_args,
            parallel: self.parallel,
            skip_regex: self.skip_regex,
            focus_regex: self.focus_regex,
            timeout: self.timeout,
            env: self.env,
            repo: self.repo,
            ..TesterConfig::new_default()
        }
    }
}

/// Parse the command line, first element being the program name
pub fn parse_from<I, T>(args: I) -> Result<CliOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(args) => {
            let verbose = args.verbose;
            let config = args.into_config();
            config.validate()?;
            Ok(CliOutcome::Run { config, verbose })
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Ok(CliOutcome::Exit(e.render().to_string()))
        }
        Err(e) => Err(TesterError::Configuration(e.to_string().trim_end().to_string())),
    }
}
