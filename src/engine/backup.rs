//! Backup snapshots of a save folder.
//!
//! A backup is a full recursive copy of the save root at a sibling path
//! suffixed with a sortable second-resolution timestamp, e.g.
//! `save_backup_20260806_142233`. It is taken at most once per session,
//! before the first mutation, and never touched again.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::{Result, StrainerError};

/// Sibling backup path for `root` at the given moment.
pub fn backup_path(root: &Path, at: DateTime<Local>) -> PathBuf {
    let stamp = at.format("%Y%m%d_%H%M%S");
    let name = match root.file_name().and_then(|n| n.to_str()) {
        Some(name) => format!("{}_backup_{}", name, stamp),
        None => format!("backup_{}", stamp),
    };
    root.with_file_name(name)
}

/// Copy the save root to a fresh timestamped sibling folder.
///
/// Fails with `BackupFailed` if the destination already exists (never
/// merges into a prior backup) or if any file fails to copy.
pub fn create_backup(root: &Path, at: DateTime<Local>) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(StrainerError::BackupFailed(format!(
            "save folder missing: {}",
            root.display()
        )));
    }

    let dest = backup_path(root, at);
    if dest.exists() {
        return Err(StrainerError::BackupFailed(format!(
            "backup already exists: {}",
            dest.display()
        )));
    }

    copy_dir_recursive(root, &dest).map_err(|e| {
        StrainerError::BackupFailed(format!("copy to {}: {}", dest.display(), e))
    })?;

    log::info!("backed up {} to {}", root.display(), dest.display());
    Ok(dest)
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 8, 6, 14, 22, 33).unwrap()
    }

    #[test]
    fn test_backup_path_format() {
        let path = backup_path(Path::new("/saves/save"), fixed_time());
        assert_eq!(path, Path::new("/saves/save_backup_20260806_142233"));
    }

    #[test]
    fn test_create_backup_copies_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("save");
        fs::create_dir_all(root.join("CreatedProducts")).unwrap();
        fs::write(root.join("Products.json"), "{}").unwrap();
        fs::write(root.join("CreatedProducts").join("ogkush.json"), "{}").unwrap();

        let dest = create_backup(&root, fixed_time()).unwrap();

        assert!(dest.join("Products.json").exists());
        assert!(dest.join("CreatedProducts").join("ogkush.json").exists());
        // source untouched
        assert!(root.join("Products.json").exists());
    }

    #[test]
    fn test_create_backup_missing_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nosuch");
        assert!(matches!(
            create_backup(&root, fixed_time()),
            Err(StrainerError::BackupFailed(_))
        ));
    }

    #[test]
    fn test_create_backup_refuses_existing_dest() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("save");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(backup_path(&root, fixed_time())).unwrap();

        assert!(matches!(
            create_backup(&root, fixed_time()),
            Err(StrainerError::BackupFailed(_))
        ));
    }
}
