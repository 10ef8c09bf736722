//! ginkgo command line assembly
//!
//! ginkgo forwards everything after `--` to the suite binary, so the layout
//! is: extra runner flags, `--nodes`, suite path, `--`, suite flags.

use std::path::Path;

use crate::config::TesterConfig;
use crate::error::Result;
use crate::utils::format_go_duration;

/// Paths the suite flags point at
#[derive(Clone, Copy, Debug)]
pub struct SuitePaths<'a> {
    pub suite_binary: &'a Path,
    pub kubeconfig: &'a Path,
    pub report_dir: &'a Path,
}

/// Split `--ginkgo-args` with shell quoting rules
pub fn split_ginkgo_args(raw: &str) -> Result<Vec<String>> {
    Ok(shell_words::split(raw)?)
}

/// Flags forwarded to the e2e suite, in the order the suite expects them
pub fn suite_flags(config: &TesterConfig, paths: SuitePaths<'_>) -> Vec<String> {
    vec![
        format!("--kubeconfig={}", paths.kubeconfig.display()),
        format!("--ginkgo.skip={}", config.skip_regex),
        format!("--ginkgo.focus={}", config.focus_regex),
        format!("--report-dir={}", paths.report_dir.display()),
        format!("--ginkgo.timeout={}", format_go_duration(config.timeout)),
    ]
}

/// Full ginkgo argument vector from already split extra arguments
pub fn ginkgo_args(
    extra_args: Vec<String>,
    config: &TesterConfig,
    paths: SuitePaths<'_>,
) -> Vec<String> {
    let mut args = extra_args;
    args.push(format!("--nodes={}", config.parallel));
    args.push(paths.suite_binary.display().to_string());
    args.push("--".to_string());
    args.extend(suite_flags(config, paths));
    args
}
