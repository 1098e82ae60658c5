//! The rename/identifier-change engine.
//!
//! `RenameSession` owns the rules the accessor doesn't: identifier
//! uniqueness, propagation of identifier changes to every referencing
//! collection, backup-before-first-mutation, and batch accounting. One
//! session edits one save folder; all cross-call state (the lazily loaded
//! index, the backup-made-this-session path) lives on the session itself,
//! so independent saves can be edited by independent sessions.

use std::path::{Path, PathBuf};

use chrono::Local;

use super::backup;
use crate::error::{Result, StrainerError};
use crate::store::{ProductIndex, SaveStore};

/// A single entry in a bulk rename batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RenameRequest {
    /// Change the display name only; identifier untouched.
    Rename { old_id: String, new_name: String },

    /// Change the identifier, optionally the display name with it.
    ChangeId {
        old_id: String,
        new_id: String,
        new_name: Option<String>,
    },
}

impl RenameRequest {
    /// The identifier this request starts from.
    pub fn old_id(&self) -> &str {
        match self {
            RenameRequest::Rename { old_id, .. } => old_id,
            RenameRequest::ChangeId { old_id, .. } => old_id,
        }
    }
}

/// Per-batch success/failure accounting from [`RenameSession::bulk_apply`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BulkReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// One row of [`RenameSession::product_details`] output.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetails {
    pub identifier: String,
    pub display_name: String,
    pub type_tag: String,
    pub properties: Vec<String>,
}

/// An editing session over one save folder.
pub struct RenameSession {
    store: SaveStore,
    index: Option<ProductIndex>,
    backup: Option<PathBuf>,
}

impl RenameSession {
    /// Open a session on the save rooted at `root`.
    ///
    /// Nothing is read until the first operation.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self {
            store: SaveStore::new(root),
            index: None,
            backup: None,
        }
    }

    /// The underlying accessor.
    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    /// Where this session's backup landed, if one was made.
    pub fn backup_path(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    /// Guarantee a backup of the save root exists for this session.
    ///
    /// The first call copies the whole root to a timestamped sibling
    /// folder; later calls return the same path without touching disk.
    pub fn ensure_backup(&mut self) -> Result<PathBuf> {
        if let Some(path) = &self.backup {
            return Ok(path.clone());
        }
        let path = backup::create_backup(self.store.root(), Local::now())?;
        self.backup = Some(path.clone());
        Ok(path)
    }

    fn take_index(&mut self) -> Result<ProductIndex> {
        match self.index.take() {
            Some(index) => Ok(index),
            None => self.store.load_index(),
        }
    }

    fn with_index<R>(&mut self, f: impl FnOnce(&ProductIndex) -> R) -> Result<R> {
        let index = self.take_index()?;
        let out = f(&index);
        self.index = Some(index);
        Ok(out)
    }

    /// All discovered product identifiers, in index order.
    pub fn list_products(&mut self) -> Result<Vec<String>> {
        self.with_index(|index| index.discovered.clone())
    }

    /// Detail rows for every discovered product, sorted by identifier.
    ///
    /// A missing or unreadable record file never aborts the listing; the
    /// row falls back to the identifier as its name and an `"Unknown"`
    /// type tag.
    pub fn product_details(&mut self) -> Result<Vec<ProductDetails>> {
        let ids = self.list_products()?;

        let mut details: Vec<ProductDetails> = ids
            .into_iter()
            .map(|id| match self.store.load_record(&id) {
                Ok(record) => ProductDetails {
                    identifier: id,
                    display_name: record.name,
                    type_tag: record.data_type.unwrap_or_else(|| "Unknown".to_string()),
                    properties: record.properties.unwrap_or_default(),
                },
                Err(e) => {
                    log::warn!("record for {} unreadable: {}", id, e);
                    ProductDetails {
                        identifier: id.clone(),
                        display_name: id,
                        type_tag: "Unknown".to_string(),
                        properties: Vec::new(),
                    }
                }
            })
            .collect();

        details.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        Ok(details)
    }

    /// Change a product's display name, keeping its identifier.
    pub fn rename_display_name(&mut self, id: &str, new_name: &str) -> Result<()> {
        let mut record = self.store.load_record(id)?;

        self.ensure_backup()?;

        record.name = new_name.to_string();
        self.store.save_record(&record)?;
        log::info!("renamed {} to {:?}", id, new_name);
        Ok(())
    }

    /// Move a product from `old_id` to `new_id`, rewriting every reference.
    ///
    /// Preconditions are checked before anything is touched: `old_id` must
    /// be discovered and have a record file, `new_id` must be free. The
    /// new record file is written before the old one is deleted and before
    /// the index is rewritten, so an interruption leaves either both files
    /// with the index still on `old_id`, or the completed state — never an
    /// index entry without a backing record.
    pub fn change_identifier(
        &mut self,
        old_id: &str,
        new_id: &str,
        new_name: Option<&str>,
    ) -> Result<()> {
        let (has_old, has_new) =
            self.with_index(|index| (index.contains(old_id), index.contains(new_id)))?;
        if !has_old {
            return Err(StrainerError::NotFound(old_id.to_string()));
        }
        if has_new {
            return Err(StrainerError::Conflict(new_id.to_string()));
        }
        let mut record = self.store.load_record(old_id)?;

        self.ensure_backup()?;

        record.set_identifier(new_id);
        if let Some(name) = new_name {
            record.name = name.to_string();
        }
        self.store.save_record(&record)?;
        self.store.delete_record(old_id)?;

        let mut index = self.take_index()?;
        let rewritten = index.rewrite_identifier(old_id, new_id);
        // Persist last. If this write fails the cached index is dropped,
        // so the next access re-reads whatever is actually on disk.
        self.store.save_index(&index)?;
        self.index = Some(index);

        log::info!("changed {} to {} ({} references)", old_id, new_id, rewritten);
        Ok(())
    }

    /// Apply a batch of rename requests in order.
    ///
    /// The backup is ensured once up front; a failure there aborts the
    /// whole batch. After that, each entry succeeds or fails on its own —
    /// failures are logged and counted, never propagated. A later entry
    /// may reference an identifier created by an earlier one.
    pub fn bulk_apply(&mut self, requests: &[RenameRequest]) -> Result<BulkReport> {
        self.ensure_backup()?;

        let mut report = BulkReport::default();
        for request in requests {
            let outcome = match request {
                RenameRequest::Rename { old_id, new_name } => {
                    self.rename_display_name(old_id, new_name)
                }
                RenameRequest::ChangeId {
                    old_id,
                    new_id,
                    new_name,
                } => self.change_identifier(old_id, new_id, new_name.as_deref()),
            };

            match outcome {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    log::warn!("bulk entry for {} failed: {}", request.old_id(), e);
                    report.failed += 1;
                }
            }
        }
        Ok(report)
    }
}
