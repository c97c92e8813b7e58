//! Crash-safe file replacement

use crate::domain::{ClinSynthError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Writes `bytes` to `path` through a sibling temp file and a rename
///
/// Readers see either the previous content or the new content, never a
/// truncated file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                ClinSynthError::Io(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    let mut file = File::create(temp_path)
        .map_err(|e| ClinSynthError::Io(format!("Failed to create {}: {e}", temp_path.display())))?;
    file.write_all(bytes)
        .map_err(|e| ClinSynthError::Io(format!("Failed to write {}: {e}", temp_path.display())))?;
    file.sync_all()
        .map_err(|e| ClinSynthError::Io(format!("Failed to sync {}: {e}", temp_path.display())))?;

    fs::rename(temp_path, path).map_err(|e| {
        ClinSynthError::Io(format!(
            "Failed to move {} into place at {}: {e}",
            temp_path.display(),
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_creates_parent_and_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("value.txt");

        write_atomic(&path, b"1").unwrap();
        write_atomic(&path, b"2").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2");
        assert!(!dir.path().join("nested").join("value.txt.tmp").exists());
    }
}
