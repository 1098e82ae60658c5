//! Storage layer for Strainer.
//!
//! Serde data models for the save's index and per-product record files,
//! plus the `SaveStore` accessor that owns all disk I/O. No rename rules
//! live here; the engine layers those on top.

mod accessor;
mod index;
mod record;

pub use accessor::{INDEX_FILE, RECORDS_DIR, SaveStore};
pub use index::{MixRecipe, PriceEntry, ProductIndex};
pub use record::ProductRecord;
