//! Bulk rename-list parsing and planning.
//!
//! The bulk format is one `old_id,New Display Name` pair per line; blank
//! lines and `#` comments are ignored, and only the first comma splits, so
//! names may contain commas. Planning turns pairs into concrete
//! [`RenameRequest`]s by deriving identifiers the same way the single
//! rename path does, tracking identifiers assigned earlier in the batch so
//! two entries never collide.

use std::collections::HashSet;

use super::session::RenameRequest;
use crate::ident;

/// A planned batch plus the entries that couldn't be planned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkPlan {
    pub requests: Vec<RenameRequest>,
    /// `old_id`s whose new name derived to an empty identifier.
    pub skipped: Vec<String>,
}

/// Parse bulk rename text into `(old_id, new_name)` pairs.
pub fn parse_bulk_lines(text: &str) -> Vec<(String, String)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(','))
        .map(|(old_id, new_name)| (old_id.trim().to_string(), new_name.trim().to_string()))
        .collect()
}

/// Turn parsed pairs into rename requests.
///
/// `existing` is the live list of discovered identifiers. An entry whose
/// name derives to its own current identifier becomes a display-name-only
/// rename; anything else gets a fresh identifier, suffixed if the
/// candidate is already held by the store or by an earlier entry.
pub fn plan_bulk(entries: &[(String, String)], existing: &[String]) -> BulkPlan {
    let mut taken: HashSet<String> = existing.iter().cloned().collect();
    let mut plan = BulkPlan::default();

    for (old_id, new_name) in entries {
        let base = match ident::derive_identifier(new_name) {
            Ok(base) => base,
            Err(e) => {
                log::warn!("skipping {}: {}", old_id, e);
                plan.skipped.push(old_id.clone());
                continue;
            }
        };

        if base == *old_id {
            plan.requests.push(RenameRequest::Rename {
                old_id: old_id.clone(),
                new_name: new_name.clone(),
            });
            continue;
        }

        let new_id = ident::uniquify(&base, |id| taken.contains(id));
        taken.insert(new_id.clone());
        plan.requests.push(RenameRequest::ChangeId {
            old_id: old_id.clone(),
            new_id,
            new_name: Some(new_name.clone()),
        });
    }

    plan
}
