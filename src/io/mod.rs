use std::fs;
use std::io::Write;
use std::path::Path;

use crate::errors::{ReportError, Result};

/// Create `path` and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| {
            ReportError::file_system(
                format!("Failed to create directory {}", path.display()),
                path,
                e,
            )
        })?;
    }
    Ok(())
}

/// Write `bytes` to `path` via a hidden temp file and rename.
///
/// Readers never observe a partially written file at `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    let tmp = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    let written = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(ReportError::file_system(
            format!("Failed to write {}", path.display()),
            path,
            e,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.txt");

        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with('.'))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_write_atomic_missing_parent_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.txt");

        let err = write_atomic(&path, b"data").unwrap_err();
        assert!(matches!(err, ReportError::FileSystem { .. }));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        ensure_dir(&nested).unwrap();
        ensure_dir(&nested).unwrap();

        assert!(nested.is_dir());
    }
}
