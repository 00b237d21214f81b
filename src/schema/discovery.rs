//! Column discovery for CSV export
//!
//! Walks a schema's declared fields and produces the ordered column list to
//! export: declaration order, identifier forced last, opt-outs and
//! non-scalar storage kinds removed.

use tracing::debug;

use super::{FieldKind, Schema};

/// Internal revision counter maintained by the document layer, never
/// exported.
pub const VERSION_FIELD: &str = "__v";

/// `id` alias some hosts expose alongside the real identifier path.
const ID_ALIAS: &str = "id";

/// Derive the ordered column list for a schema.
///
/// Selection rules, applied in declaration order:
/// 1. The identifier path (and the `id` alias) is removed from the working
///    set and appended as the final column.
/// 2. A field whose options carry an explicit `csv: false` is removed;
///    the default is include.
/// 3. Collection, nested-object, and free-form fields are removed; only
///    flat scalar fields are exportable. The identifier is exempt.
/// 4. The internal version counter is removed unconditionally.
///
/// Deterministic for a fixed schema. An empty schema yields a list
/// containing only the identifier.
pub fn discover_columns(schema: &Schema) -> Vec<String> {
    let mut columns: Vec<String> = schema
        .fields()
        .iter()
        .filter(|f| f.path != schema.id_field() && f.path != ID_ALIAS)
        .filter(|f| f.options.csv.unwrap_or(true))
        .filter(|f| matches!(f.kind, FieldKind::Scalar(_)))
        .filter(|f| f.path != VERSION_FIELD)
        .map(|f| f.path.clone())
        .collect();

    // identifier always last
    columns.push(schema.id_field().to_string());

    debug!("Discovered {} export columns", columns.len());
    columns
}
