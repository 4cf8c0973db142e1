use crate::error::{RefreshError, Result};
use crate::types::LabsMetadata;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| RefreshError::Config(format!("output path has no file name: {}", path.display())))?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

/// Replace `path` with the pretty-printed (2-space) metadata document.
///
/// The parent directory is created when missing. The document is written to a
/// sibling `.tmp` file first and renamed over the target, so the previous file
/// stays intact if anything fails.
pub fn write_metadata(path: &Path, metadata: &LabsMetadata) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(metadata)?;
    let tmp_path = temp_sibling(path)?;
    debug!("Writing {} bytes to {}", json.len(), tmp_path.display());

    if let Err(e) = fs::write(&tmp_path, json.as_bytes()).and_then(|_| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    info!("Wrote metadata for {} labs to {}", metadata.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryOutcome, LabRecord};
    use serde_json::Number;
    use tempfile::TempDir;

    fn sample_metadata() -> LabsMetadata {
        let outcomes = vec![EntryOutcome::updated(
            "WorkFromHome",
            LabRecord {
                rating: Number::from_f64(4.8),
                player_difficulty: Some(Number::from(2)),
                is_retired: false,
                tactics: vec!["Initial Access".to_string()],
                categories: vec![],
            },
        )];
        LabsMetadata::collect(&outcomes)
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("labs_metadata.json");

        write_metadata(&path, &sample_metadata()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"WorkFromHome\": {\n    \"rating\": 4.8,"));
        assert!(!temp_dir.path().join("data").join("labs_metadata.json.tmp").exists());
    }

    #[test]
    fn test_overwrites_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("labs_metadata.json");
        fs::write(&path, "{\"Stale Lab\": {}}").unwrap();

        write_metadata(&path, &LabsMetadata::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_output_is_deterministic() {
        let temp_dir = TempDir::new().unwrap();
        let first = temp_dir.path().join("first.json");
        let second = temp_dir.path().join("second.json");

        write_metadata(&first, &sample_metadata()).unwrap();
        write_metadata(&second, &sample_metadata()).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_unwritable_parent_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_metadata(&blocker.join("labs_metadata.json"), &sample_metadata()).unwrap_err();

        assert!(matches!(err, RefreshError::Io(_)));
    }
}
