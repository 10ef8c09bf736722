//! ginkgo process execution
//!
//! Runs ginkgo as a child process that shares this process's stdio.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, warn};

use crate::error::{Result, TesterError};
use crate::utils::StageTimer;

/// One ginkgo invocation
#[derive(Clone, Debug)]
pub struct GinkgoRunner {
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl GinkgoRunner {
    /// Create a runner for `program` with the assembled arguments
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: Vec::new(),
        }
    }

    /// Replace the child's environment with `env`; empty keeps the parent's
    pub fn with_env<K, V>(mut self, env: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = env.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        if !self.env.is_empty() {
            cmd.env_clear();
            cmd.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        cmd
    }

    /// Run to completion; Ctrl-C kills the child and fails the run
    pub async fn run(&self) -> Result<()> {
        info!(
            "Running ginkgo test as {} {:?}",
            self.program.display(),
            self.args
        );
        let timer = StageTimer::start("ginkgo");

        let launch_error = |source| TesterError::Launch {
            binary: self.program.clone(),
            source,
        };

        let mut child = self.command().spawn().map_err(launch_error)?;

        let status = tokio::select! {
            status = child.wait() => status.map_err(launch_error)?,
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted, stopping ginkgo");
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill ginkgo: {}", e);
                }
                return Err(TesterError::Interrupted);
            }
        };

        timer.stop();

        if status.success() {
            info!("ginkgo finished successfully");
            Ok(())
        } else {
            Err(TesterError::TestRun(status))
        }
    }
}
