//! Artifacts directory handling
//!
//! kubetest2 collects `metadata.json` from the artifacts directory; the
//! tester records its own version there before running.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, TesterError};

pub const METADATA_FILE: &str = "metadata.json";
pub const VERSION_KEY: &str = "tester-version";

/// Record `version` under `tester-version`, keeping other keys in the file
pub fn write_version_to_metadata(artifacts_dir: &Path, version: &str) -> Result<PathBuf> {
    let path = artifacts_dir.join(METADATA_FILE);
    let fail = |reason: String| TesterError::Metadata {
        path: path.clone(),
        reason,
    };

    fs::create_dir_all(artifacts_dir).map_err(|e| fail(e.to_string()))?;

    let mut metadata = match fs::read_to_string(&path) {
        Ok(content) if !content.trim().is_empty() => {
            match serde_json::from_str::<Value>(&content).map_err(|e| fail(e.to_string()))? {
                Value::Object(map) => map,
                _ => return Err(fail("existing metadata is not a JSON object".to_string())),
            }
        }
        Ok(_) => Map::new(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(e) => return Err(fail(e.to_string())),
    };

    metadata.insert(VERSION_KEY.to_string(), Value::String(version.to_string()));

    let content =
        serde_json::to_string_pretty(&Value::Object(metadata)).map_err(|e| fail(e.to_string()))?;
    fs::write(&path, content).map_err(|e| fail(e.to_string()))?;

    debug!("Wrote {}={} to {}", VERSION_KEY, version, path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_creates_dir_and_file() {
        let dir = tempdir().unwrap();
        let artifacts = dir.path().join("nested").join("_artifacts");

        let path = write_version_to_metadata(&artifacts, "v1.2.3").unwrap();

        assert_eq!(path, artifacts.join(METADATA_FILE));
        assert_eq!(read_json(&path)[VERSION_KEY], "v1.2.3");
    }

    #[test]
    fn test_keeps_existing_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(METADATA_FILE);
        fs::write(&path, r#"{"deployer-version": "v0.9", "tester-version": "old"}"#).unwrap();

        write_version_to_metadata(dir.path(), "v2").unwrap();

        let json = read_json(&path);
        assert_eq!(json["deployer-version"], "v0.9");
        assert_eq!(json[VERSION_KEY], "v2");
    }

    #[test]
    fn test_rejects_non_object() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(METADATA_FILE), "[1, 2]").unwrap();

        let err = write_version_to_metadata(dir.path(), "v2").unwrap_err();
        assert!(matches!(err, TesterError::Metadata { .. }));
    }
}
