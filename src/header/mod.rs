//! Header customization: include filtering and display renames
//!
//! The include filter restricts the column list itself (and therefore both
//! header and row rendering); renames apply only to the rendered header
//! text, never to the field names used for value lookup.

use std::collections::HashMap;

/// Mapping from original column name to display name.
pub type RenameMap = HashMap<String, String>;

/// Restrict a column list to an allow-list, preserving original order.
///
/// The filter matches *original* column names. An entry that matches no
/// real column silently yields no column; `None` keeps the full list.
pub fn filter_columns(columns: Vec<String>, include_only: Option<&[String]>) -> Vec<String> {
    match include_only {
        Some(allowed) if !allowed.is_empty() => columns
            .into_iter()
            .filter(|column| allowed.contains(column))
            .collect(),
        _ => columns,
    }
}

/// Produce the ordered header strings for an already-filtered column list.
///
/// Schema-level renames apply first, then call-level overrides; a column
/// with no matching rename keeps its original name.
pub fn customize(
    columns: &[String],
    schema_renames: &RenameMap,
    call_renames: Option<&RenameMap>,
) -> Vec<String> {
    columns
        .iter()
        .map(|column| {
            let renamed = call_renames
                .and_then(|renames| renames.get(column))
                .or_else(|| schema_renames.get(column));
            renamed.unwrap_or(column).clone()
        })
        .collect()
}
