//! Strainer - a referential-integrity-safe product renamer for Schedule I saves
//!
//! A save references each product identifier from four places inside
//! `Products.json` plus a per-product record file. Strainer renames display
//! names and changes identifiers while keeping every reference consistent,
//! and snapshots the whole save folder before the first mutation of a
//! session.

pub mod discovery;
pub mod engine;
pub mod error;
pub mod ident;
pub mod store;

pub use error::{Result, StrainerError};
