//! Repository acquisition
//!
//! Clones the test repository into the run directory with the `git` CLI.

use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Result, TesterError};
use crate::utils::StageTimer;

/// Plain, full clone of `repo` into `target`
///
/// git refuses to clone into a non-empty directory, so a run directory that
/// already holds files fails here rather than mixing two trees.
pub async fn clone_repo(repo: &str, target: &Path) -> Result<()> {
    info!("Cloning {} into {}", repo, target.display());
    let timer = StageTimer::start("clone");

    let output = Command::new("git")
        .arg("clone")
        .arg("--")
        .arg(repo)
        .arg(target)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| TesterError::Clone {
            repo: repo.to_string(),
            reason: format!("failed to run git: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => format!("git {}", output.status),
            message => message.to_string(),
        };
        return Err(TesterError::Clone {
            repo: repo.to_string(),
            reason,
        });
    }

    debug!("git: {}", String::from_utf8_lossy(&output.stderr).trim());
    timer.stop();
    Ok(())
}
