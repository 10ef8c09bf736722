//! Tester orchestration
//!
//! One run goes: resolve the kubetest2 context, record the tester version,
//! clone the repository, then hand over to ginkgo. Any failure ends the run.

use std::path::PathBuf;
use tracing::{debug, info};

use crate::artifacts;
use crate::config::{Kubetest2Env, TesterConfig};
use crate::error::Result;
use crate::executor::{ginkgo_args, split_ginkgo_args, GinkgoRunner, SuitePaths, Toolchain};
use crate::repo;

/// Context resolved before anything is cloned
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunContext {
    pub run_dir: PathBuf,
    pub report_dir: PathBuf,
    pub kubeconfig: PathBuf,
}

/// A configured ginkgo tester
pub struct Tester {
    config: TesterConfig,
    env: Kubetest2Env,
    version: String,
}

impl Tester {
    pub fn new(config: TesterConfig, env: Kubetest2Env) -> Self {
        Self {
            config,
            env,
            version: crate::TESTER_VERSION.to_string(),
        }
    }

    /// Override the version recorded in metadata.json
    #[cfg(test)]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Resolve run dir, report dir and kubeconfig
    pub fn prepare(&self) -> Result<RunContext> {
        let run_dir = self.env.resolve_run_dir()?;
        let report_dir = self.env.resolve_artifacts_dir()?;
        let kubeconfig = self
            .env
            .resolve_kubeconfig(self.config.kubeconfig.as_deref())?;

        Ok(RunContext {
            run_dir,
            report_dir,
            kubeconfig,
        })
    }

    /// Clone the repository and run the suite through ginkgo
    pub async fn test(&self) -> Result<()> {
        let ctx = self.prepare()?;
        debug!("Run context: {:?}", ctx);

        artifacts::write_version_to_metadata(&ctx.report_dir, &self.version)?;

        // malformed --ginkgo-args should fail before the clone
        let extra_args = split_ginkgo_args(&self.config.ginkgo_args)?;

        self.pretest_setup(&ctx).await?;

        let toolchain = Toolchain::resolve(&ctx.run_dir, self.env.search_path.as_deref());
        info!("Using {}", toolchain);
        if self.config.flake_attempts > 1 {
            debug!(
                "--flake-attempts={} is not forwarded; use --ginkgo-args for ginkgo retries",
                self.config.flake_attempts
            );
        }

        let args = ginkgo_args(
            extra_args,
            &self.config,
            SuitePaths {
                suite_binary: &toolchain.e2e_test,
                kubeconfig: &ctx.kubeconfig,
                report_dir: &ctx.report_dir,
            },
        );

        GinkgoRunner::new(toolchain.ginkgo, args)
            .with_env(self.config.env_pairs())
            .run()
            .await
    }

    async fn pretest_setup(&self, ctx: &RunContext) -> Result<()> {
        repo::clone_repo(&self.config.repo, &ctx.run_dir).await
    }
}
