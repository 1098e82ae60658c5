//! Identifier derivation for Strainer
//!
//! Product identifiers are derived from display names: lowercase, with
//! everything outside `[a-z0-9]` stripped. Collisions are resolved by
//! appending an increasing integer suffix. The same derivation serves the
//! single-rename and bulk paths so the two never disagree.

use crate::error::{Result, StrainerError};

/// Derive a candidate identifier from a display name.
///
/// `"OG Kush V2"` becomes `"ogkushv2"`. Fails with `InvalidName` when the
/// name contains no usable characters at all.
pub fn derive_identifier(name: &str) -> Result<String> {
    let id: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    if id.is_empty() {
        return Err(StrainerError::InvalidName(name.to_string()));
    }
    Ok(id)
}

/// Resolve `base` against already-taken identifiers.
///
/// Returns `base` itself when free; otherwise `base1`, `base2`, ... — the
/// first suffix tried is always 1.
pub fn uniquify<F: Fn(&str) -> bool>(base: &str, is_taken: F) -> String {
    if !is_taken(base) {
        return base.to_string();
    }

    let mut counter = 1u32;
    loop {
        let candidate = format!("{}{}", base, counter);
        if !is_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Derive a free identifier from a display name in one step.
pub fn derive_unique_identifier<F: Fn(&str) -> bool>(name: &str, is_taken: F) -> Result<String> {
    let base = derive_identifier(name)?;
    Ok(uniquify(&base, is_taken))
}
