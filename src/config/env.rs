//! kubetest2 environment
//!
//! kubetest2 hands testers their working context through a few well-known
//! environment variables.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, TesterError};

pub const RUN_DIR_VAR: &str = "KUBETEST2_RUN_DIR";
pub const KUBECONFIG_VAR: &str = "KUBECONFIG";
pub const ARTIFACTS_VAR: &str = "ARTIFACTS";
pub const PATH_VAR: &str = "PATH";

/// Values read from the kubetest2 environment variables
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Kubetest2Env {
    /// Run directory from KUBETEST2_RUN_DIR
    pub run_dir: Option<PathBuf>,
    /// Kubeconfig from KUBECONFIG
    pub kubeconfig: Option<PathBuf>,
    /// Artifacts directory from ARTIFACTS
    pub artifacts: Option<PathBuf>,
    /// Binary search path from PATH
    pub search_path: Option<OsString>,
}

impl Kubetest2Env {
    /// Load from the process environment
    pub fn load() -> Self {
        Self {
            run_dir: env::var_os(RUN_DIR_VAR).map(PathBuf::from),
            kubeconfig: env::var_os(KUBECONFIG_VAR).map(PathBuf::from),
            artifacts: env::var_os(ARTIFACTS_VAR).map(PathBuf::from),
            search_path: env::var_os(PATH_VAR),
        }
    }

    /// Run directory, falling back to the current working directory
    pub fn resolve_run_dir(&self) -> Result<PathBuf> {
        match &self.run_dir {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir().map_err(TesterError::Environment),
        }
    }

    /// Explicit kubeconfig wins over KUBECONFIG; one of them must exist
    pub fn resolve_kubeconfig(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.kubeconfig.clone())
            .ok_or(TesterError::KubeconfigMissing)
    }

    /// Report directory: ARTIFACTS, or `_artifacts` under the working directory
    pub fn resolve_artifacts_dir(&self) -> Result<PathBuf> {
        match &self.artifacts {
            Some(dir) => Ok(dir.clone()),
            None => env::current_dir()
                .map(|cwd| cwd.join("_artifacts"))
                .map_err(TesterError::Environment),
        }
    }
}
