//! Toolchain resolution
//!
//! Finds the ginkgo runner, the e2e suite binary and kubectl for a run.

use std::env;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const GINKGO: &str = "ginkgo";
pub const E2E_TEST: &str = "e2e.test";
pub const KUBECTL: &str = "kubectl";

/// Where a Kubernetes-style build leaves its binaries, relative to the tree
const BUILD_OUTPUT_DIR: [&str; 2] = ["_output", "bin"];

/// Resolved binaries for one run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    pub ginkgo: PathBuf,
    pub e2e_test: PathBuf,
    pub kubectl: PathBuf,
}

impl Toolchain {
    /// Look in the run directory's build output first, then `search_path`
    pub fn resolve(run_dir: &Path, search_path: Option<&OsStr>) -> Self {
        Self {
            ginkgo: find_binary(GINKGO, run_dir, search_path),
            e2e_test: find_binary(E2E_TEST, run_dir, search_path),
            kubectl: find_binary(KUBECTL, run_dir, search_path),
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ginkgo={} e2e.test={} kubectl={}",
            self.ginkgo.display(),
            self.e2e_test.display(),
            self.kubectl.display()
        )
    }
}

/// Falls back to the bare name so the OS lookup reports a missing binary
fn find_binary(name: &str, run_dir: &Path, search_path: Option<&OsStr>) -> PathBuf {
    let local = BUILD_OUTPUT_DIR
        .iter()
        .fold(run_dir.to_path_buf(), |dir, part| dir.join(part))
        .join(name);
    if local.is_file() {
        debug!("Found {} in build output: {}", name, local.display());
        return local;
    }

    if let Some(search_path) = search_path {
        for dir in env::split_paths(search_path) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!("Found {} on PATH: {}", name, candidate.display());
                return candidate;
            }
        }
    }

    debug!("{} not found, leaving it to the OS lookup", name);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_build_output_wins_over_path() {
        let dir = tempdir().unwrap();
        let run_dir = dir.path().join("run");
        let bin_dir = dir.path().join("bin");
        touch(&run_dir.join("_output/bin/ginkgo"));
        touch(&bin_dir.join("ginkgo"));

        let search_path = env::join_paths([&bin_dir]).unwrap();
        let toolchain = Toolchain::resolve(&run_dir, Some(search_path.as_os_str()));

        assert_eq!(toolchain.ginkgo, run_dir.join("_output/bin/ginkgo"));
    }

    #[test]
    fn test_search_path_in_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        touch(&second.join("kubectl"));
        touch(&first.join("e2e.test"));
        touch(&second.join("e2e.test"));

        let search_path = env::join_paths([&first, &second]).unwrap();
        let toolchain = Toolchain::resolve(dir.path(), Some(search_path.as_os_str()));

        assert_eq!(toolchain.kubectl, second.join("kubectl"));
        assert_eq!(toolchain.e2e_test, first.join("e2e.test"));
    }

    #[test]
    fn test_missing_binaries_use_bare_names() {
        let dir = tempdir().unwrap();
        let toolchain = Toolchain::resolve(dir.path(), None);

        assert_eq!(toolchain.ginkgo, PathBuf::from("ginkgo"));
        assert_eq!(toolchain.e2e_test, PathBuf::from("e2e.test"));
        assert_eq!(toolchain.kubectl, PathBuf::from("kubectl"));
    }
}
