//! Auto-detection of Schedule I save folders.
//!
//! The game keeps saves under a per-platform base directory, one subfolder
//! per steam id. Inside each, older installs use a `save/` folder and newer
//! ones use `SaveGame_N/` (sometimes with the products nested one level
//! deeper in a `Products/` folder). A folder qualifies as a save root when
//! it contains `Products.json`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::INDEX_FILE;

/// One detected save folder.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveLocation {
    /// Human-readable label, e.g. `Steam ID: 7656119... (SaveGame_1)`.
    pub label: String,
    pub path: PathBuf,
}

/// Detect save folders at this platform's install location.
pub fn find_save_folders() -> Vec<SaveLocation> {
    match saves_base_dir() {
        Some(base) if base.is_dir() => scan_saves_root(&base),
        _ => Vec::new(),
    }
}

/// Scan an explicit saves base directory (one steam-id folder per entry).
pub fn scan_saves_root(base: &Path) -> Vec<SaveLocation> {
    let mut saves = Vec::new();

    for steam_folder in sorted_subdirs(base) {
        let steam_id = steam_folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let save_folder = steam_folder.join("save");
        if save_folder.join(INDEX_FILE).is_file() {
            saves.push(SaveLocation {
                label: format!("Steam ID: {} (save)", steam_id),
                path: save_folder,
            });
        }

        for save_game in sorted_subdirs(&steam_folder) {
            let name = save_game
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !name.starts_with("SaveGame_") {
                continue;
            }

            if save_game.join(INDEX_FILE).is_file() {
                saves.push(SaveLocation {
                    label: format!("Steam ID: {} ({})", steam_id, name),
                    path: save_game,
                });
            } else if save_game.join("Products").join(INDEX_FILE).is_file() {
                saves.push(SaveLocation {
                    label: format!("Steam ID: {} ({}/Products)", steam_id, name),
                    path: save_game.join("Products"),
                });
            }
        }
    }

    saves
}

fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let mut subdirs: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect(),
        Err(_) => Vec::new(),
    };
    subdirs.sort();
    subdirs
}

#[cfg(target_os = "windows")]
fn saves_base_dir() -> Option<PathBuf> {
    // The game writes to LocalLow, which has no dirs:: shortcut.
    dirs::home_dir().map(|home| {
        home.join("AppData")
            .join("LocalLow")
            .join("TVGS")
            .join("Schedule I")
            .join("Saves")
    })
}

#[cfg(target_os = "macos")]
fn saves_base_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join("Library")
            .join("Application Support")
            .join("TVGS")
            .join("Schedule I")
            .join("Saves")
    })
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn saves_base_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        home.join(".config")
            .join("unity3d")
            .join("TVGS")
            .join("Schedule I")
            .join("Saves")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch_index(dir: &Path) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(INDEX_FILE), "{}").unwrap();
    }

    #[test]
    fn test_scan_finds_legacy_save_layout() {
        let temp = TempDir::new().unwrap();
        touch_index(&temp.path().join("123456").join("save"));

        let saves = scan_saves_root(temp.path());
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].label, "Steam ID: 123456 (save)");
        assert!(saves[0].path.ends_with("123456/save"));
    }

    #[test]
    fn test_scan_finds_savegame_layout() {
        let temp = TempDir::new().unwrap();
        touch_index(&temp.path().join("123456").join("SaveGame_1"));
        touch_index(&temp.path().join("123456").join("SaveGame_2"));

        let saves = scan_saves_root(temp.path());
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].label, "Steam ID: 123456 (SaveGame_1)");
        assert_eq!(saves[1].label, "Steam ID: 123456 (SaveGame_2)");
    }

    #[test]
    fn test_scan_finds_nested_products_layout() {
        let temp = TempDir::new().unwrap();
        touch_index(&temp.path().join("123456").join("SaveGame_1").join("Products"));

        let saves = scan_saves_root(temp.path());
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].label, "Steam ID: 123456 (SaveGame_1/Products)");
        assert!(saves[0].path.ends_with("SaveGame_1/Products"));
    }

    #[test]
    fn test_scan_ignores_folders_without_index() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("123456").join("SaveGame_1")).unwrap();
        fs::create_dir_all(temp.path().join("123456").join("Screenshots")).unwrap();

        assert!(scan_saves_root(temp.path()).is_empty());
    }

    #[test]
    fn test_scan_missing_base() {
        let temp = TempDir::new().unwrap();
        assert!(scan_saves_root(&temp.path().join("nosuch")).is_empty());
    }

    #[test]
    fn test_scan_multiple_steam_ids() {
        let temp = TempDir::new().unwrap();
        touch_index(&temp.path().join("111").join("save"));
        touch_index(&temp.path().join("222").join("SaveGame_1"));

        let saves = scan_saves_root(temp.path());
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].label, "Steam ID: 111 (save)");
        assert_eq!(saves[1].label, "Steam ID: 222 (SaveGame_1)");
    }
}
