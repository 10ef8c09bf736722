//! Tester error types
//!
//! Every failure is terminal for the run; `main` maps them to an exit code.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors raised while configuring or running the tester
#[derive(Error, Debug)]
pub enum TesterError {
    #[error("failed to parse flags: {0}")]
    Configuration(String),

    #[error("failed to set run dir: {0}")]
    Environment(#[source] io::Error),

    #[error("failed to write tester metadata to {path}: {reason}")]
    Metadata { path: PathBuf, reason: String },

    #[error("kubeconfig path not provided")]
    KubeconfigMissing,

    #[error("failed to clone repo {repo}: {reason}")]
    Clone { repo: String, reason: String },

    #[error("error parsing --ginkgo-args: {0}")]
    ArgParse(#[from] shell_words::ParseError),

    #[error("failed to launch {}: {source}", binary.display())]
    Launch {
        binary: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ginkgo {0}")]
    TestRun(ExitStatus),

    #[error("interrupted while waiting for ginkgo")]
    Interrupted,
}

impl TesterError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            TesterError::TestRun(status) => match status.code() {
                Some(code) if code != 0 => code,
                _ => 1,
            },
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, TesterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_defaults_to_one() {
        assert_eq!(TesterError::KubeconfigMissing.exit_code(), 1);
        assert_eq!(TesterError::Configuration("--bogus".into()).exit_code(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_follows_child() {
        use std::os::unix::process::ExitStatusExt;

        // wait status encodes the exit code in the high byte
        let status = ExitStatus::from_raw(3 << 8);
        assert_eq!(TesterError::TestRun(status).exit_code(), 3);

        // killed by SIGKILL, no exit code
        let signaled = ExitStatus::from_raw(9);
        assert_eq!(TesterError::TestRun(signaled).exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        let err = TesterError::Clone {
            repo: "https://example.com/repo.git".into(),
            reason: "repository not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to clone repo https://example.com/repo.git: repository not found"
        );
        assert_eq!(
            TesterError::KubeconfigMissing.to_string(),
            "kubeconfig path not provided"
        );
    }
}
