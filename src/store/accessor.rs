//! File-backed access to a save's product store.
//!
//! A save root contains `Products.json` (the index) and a `CreatedProducts/`
//! folder with one JSON file per product record. This layer does plain
//! load/save/delete with no knowledge of rename rules; every write goes to a
//! temporary file in the target directory and is renamed into place so a
//! crash never leaves a truncated file behind.

use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use super::index::ProductIndex;
use super::record::ProductRecord;
use crate::error::{Result, StrainerError};

/// Index filename inside a save root.
pub const INDEX_FILE: &str = "Products.json";

/// Subfolder holding per-product record files.
pub const RECORDS_DIR: &str = "CreatedProducts";

/// Accessor for one save folder.
#[derive(Debug, Clone)]
pub struct SaveStore {
    root: PathBuf,
}

impl SaveStore {
    /// Create an accessor for the save rooted at `root`.
    ///
    /// Nothing is read until the first load; a bad path surfaces there.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The save root this accessor reads and writes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    fn records_dir(&self) -> PathBuf {
        self.root.join(RECORDS_DIR)
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.records_dir().join(format!("{}.json", id))
    }

    /// Load and parse the index file.
    pub fn load_index(&self) -> Result<ProductIndex> {
        let path = self.index_path();
        if !path.exists() {
            return Err(StrainerError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Serialize the index and overwrite the index file in place.
    pub fn save_index(&self, index: &ProductIndex) -> Result<()> {
        write_json_atomic(&self.index_path(), index)
    }

    /// Load the record stored under `id`.
    pub fn load_record(&self, id: &str) -> Result<ProductRecord> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(StrainerError::NotFound(id.to_string()));
        }
        let content = fs::read_to_string(&path)?;
        let mut record: ProductRecord = serde_json::from_str(&content)?;
        record.identifier = id.to_string();
        Ok(record)
    }

    /// Write the record to the file keyed by its current identifier.
    ///
    /// If the record carries an in-file `ID`, it is forced to match the
    /// filename key before serializing.
    pub fn save_record(&self, record: &ProductRecord) -> Result<()> {
        if record.identifier.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "record has no identifier",
            )
            .into());
        }

        let mut on_disk = record.clone();
        if on_disk.id.is_some() {
            on_disk.id = Some(on_disk.identifier.clone());
        }

        fs::create_dir_all(self.records_dir())?;
        write_json_atomic(&self.record_path(&record.identifier), &on_disk)
    }

    /// Remove the record file stored under `id`.
    pub fn delete_record(&self, id: &str) -> Result<()> {
        let path = self.record_path(id);
        if !path.exists() {
            return Err(StrainerError::NotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Identifiers that currently have a record file on disk.
    pub fn record_ids_on_disk(&self) -> Result<BTreeSet<String>> {
        let dir = self.records_dir();
        let mut ids = BTreeSet::new();
        if !dir.exists() {
            return Ok(ids);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.insert(stem.to_string());
            }
        }
        Ok(ids)
    }
}

/// Write `value` as pretty JSON via a temp file renamed into place.
fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
