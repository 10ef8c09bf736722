//! Configuration module
//!
//! The run configuration is built once from defaults and command-line flags
//! and is read-only afterwards.

pub mod env;

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, TesterError};

pub use env::Kubetest2Env;

pub const DEFAULT_FLAKE_ATTEMPTS: u32 = 1;
pub const DEFAULT_PARALLEL: u32 = 1;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Parameters of one ginkgo run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TesterConfig {
    /// Make up to this many attempts to run each spec
    pub flake_attempts: u32,

    /// Additional arguments supported by the ginkgo binary
    pub ginkgo_args: String,

    /// Number of ginkgo nodes
    pub parallel: u32,

    /// Regular expression of specs to skip
    pub skip_regex: String,

    /// Regular expression of specs to focus on
    pub focus_regex: String,

    /// How long ginkgo may run the suite
    pub timeout: Duration,

    /// `KEY=VALUE` entries that replace the child environment
    pub env: Vec<String>,

    /// Git repository to clone for the test
    pub repo: String,

    /// Explicit kubeconfig for embedders building the config directly; no
    /// flag sets it, so command-line runs always fall back to `KUBECONFIG`
    pub kubeconfig: Option<PathBuf>,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self::new_default()
    }
}

impl TesterConfig {
    /// Configuration with the tester defaults and nothing to clone yet
    pub fn new_default() -> Self {
        Self {
            flake_attempts: DEFAULT_FLAKE_ATTEMPTS,
            ginkgo_args: String::new(),
            parallel: DEFAULT_PARALLEL,
            skip_regex: String::new(),
            focus_regex: String::new(),
            timeout: DEFAULT_TIMEOUT,
            env: Vec::new(),
            repo: String::new(),
            kubeconfig: None,
        }
    }

    /// Check the invariants flag parsing cannot express
    pub fn validate(&self) -> Result<()> {
        if self.flake_attempts == 0 {
            return Err(TesterError::Configuration(
                "--flake-attempts must be at least 1".to_string(),
            ));
        }
        if self.parallel == 0 {
            return Err(TesterError::Configuration(
                "--parallel must be at least 1".to_string(),
            ));
        }
        for entry in &self.env {
            validate_env_entry(entry).map_err(TesterError::Configuration)?;
        }
        Ok(())
    }

    /// Environment overrides as key/value pairs, in flag order
    pub fn env_pairs(&self) -> Vec<(&str, &str)> {
        self.env
            .iter()
            .filter_map(|entry| entry.split_once('='))
            .collect()
    }
}

#[cfg(test)]
impl TesterConfig {
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn with_kubeconfig(mut self, path: impl Into<PathBuf>) -> Self {
        self.kubeconfig = Some(path.into());
        self
    }

    pub fn with_parallel(mut self, parallel: u32) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_ginkgo_args(mut self, args: impl Into<String>) -> Self {
        self.ginkgo_args = args.into();
        self
    }

    pub fn with_env(mut self, entry: impl Into<String>) -> Self {
        self.env.push(entry.into());
        self
    }
}

/// A `--env` entry must be `KEY=VALUE` with a non-empty key
pub fn validate_env_entry(entry: &str) -> std::result::Result<(), String> {
    match entry.split_once('=') {
        Some((key, _)) if !key.is_empty() => Ok(()),
        _ => Err(format!("invalid --env entry {entry:?}, expected KEY=VALUE")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TesterConfig::new_default();
        assert_eq!(config.flake_attempts, 1);
        assert_eq!(config.parallel, 1);
        assert_eq!(config.timeout, Duration::from_secs(86_400));
        assert!(config.env.is_empty());
        assert!(config.kubeconfig.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_parallel() {
        let config = TesterConfig::new_default().with_parallel(0);
        assert!(matches!(
            config.validate(),
            Err(TesterError::Configuration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_env() {
        let config = TesterConfig::new_default().with_env("NOEQUALS");
        assert!(config.validate().is_err());

        let config = TesterConfig::new_default().with_env("=value");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_pairs_keep_order_and_split_once() {
        let config = TesterConfig::new_default()
            .with_env("B=2")
            .with_env("A=x=y")
            .with_env("EMPTY=");
        assert_eq!(
            config.env_pairs(),
            vec![("B", "2"), ("A", "x=y"), ("EMPTY", "")]
        );
    }
}
