//! Row and header rendering for CSV export
//!
//! This module converts one document snapshot into a single delimited text
//! line: dotted-path value lookup, plain-text BSON conversion, and the
//! semicolon join shared by header and data rows.
//!
//! The format is a plain `;` join with no quoting or delimiter escaping.
//! A value that itself contains `;` or a newline produces an invalid record;
//! this matches the wire format consumed by the existing downstream tooling
//! and is deliberately preserved.

use mongodb::bson::{Bson, Document};

pub mod transform;

pub use transform::Transform;

/// Field delimiter used for both header and data rows.
pub const DELIMITER: char = ';';

/// Resolve a dotted path against a document snapshot.
///
/// Each intermediate segment must resolve to an embedded document; a missing
/// or non-document intermediate node makes the whole path absent.
///
/// # Arguments
/// * `doc` - Document snapshot to search
/// * `path` - Field path, possibly dotted (e.g. `address.city`)
///
/// # Returns
/// * `Option<&Bson>` - The resolved value, or None if absent
pub fn lookup_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut current = doc;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = current.get(segment)?;
        if segments.peek().is_none() {
            return Some(value);
        }
        current = value.as_document()?;
    }

    None
}

/// Convert a BSON value to its plain-text cell representation.
///
/// Scalars render via their natural string form; `Null` and `Undefined`
/// render as the empty string rather than a placeholder. Documents and
/// arrays only appear here when a document carries extra structure at a
/// scalar-declared path; they render as relaxed extended JSON.
pub fn plain_text(value: &Bson) -> String {
    match value {
        Bson::String(s) => s.clone(),
        Bson::Int32(n) => n.to_string(),
        Bson::Int64(n) => n.to_string(),
        Bson::Double(f) => f.to_string(),
        Bson::Boolean(b) => b.to_string(),
        Bson::Null | Bson::Undefined => String::new(),
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::DateTime(dt) => dt.to_string(),
        Bson::Decimal128(d) => d.to_string(),
        Bson::Document(_) | Bson::Array(_) => value.clone().into_relaxed_extjson().to_string(),
        other => other.to_string(),
    }
}

/// Render one document as a delimited data row.
///
/// Each column resolves via [`lookup_path`]; an absent value renders as an
/// empty field. The row is terminated with a single `\n`.
pub fn render_row(columns: &[String], doc: &Document) -> String {
    let fields: Vec<String> = columns
        .iter()
        .map(|column| {
            lookup_path(doc, column)
                .map(plain_text)
                .unwrap_or_default()
        })
        .collect();
    join_line(&fields)
}

/// Render the header row from already-customized header strings.
pub fn render_header(headers: &[String]) -> String {
    join_line(headers)
}

fn join_line(fields: &[String]) -> String {
    let mut line = fields.join(&DELIMITER.to_string());
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_render_simple_row() {
        let doc = doc! { "name": "Ann", "age": 30, "_id": "x1" };
        let row = render_row(&columns(&["name", "age", "_id"]), &doc);
        assert_eq!(row, "Ann;30;x1\n");
    }

    #[test]
    fn test_render_header() {
        let header = render_header(&columns(&["name", "age", "_id"]));
        assert_eq!(header, "name;age;_id\n");
    }

    #[test]
    fn test_missing_value_renders_empty() {
        let doc = doc! { "name": "Ann" };
        let row = render_row(&columns(&["name", "age", "_id"]), &doc);
        assert_eq!(row, "Ann;;\n");
        assert!(!row.contains("undefined"));
    }

    #[test]
    fn test_null_renders_empty() {
        let doc = doc! { "name": Bson::Null, "_id": "x1" };
        let row = render_row(&columns(&["name", "_id"]), &doc);
        assert_eq!(row, ";x1\n");
    }

    #[test]
    fn test_dotted_path_lookup() {
        let doc = doc! { "address": { "city": "Oslo", "zip": "0150" }, "_id": "x1" };
        let row = render_row(&columns(&["address.city", "_id"]), &doc);
        assert_eq!(row, "Oslo;x1\n");
    }

    #[test]
    fn test_missing_intermediate_node_is_absent() {
        let doc = doc! { "name": "Ann" };
        assert!(lookup_path(&doc, "address.city").is_none());

        let scalar_intermediate = doc! { "address": "street only" };
        assert!(lookup_path(&scalar_intermediate, "address.city").is_none());
    }

    #[test]
    fn test_object_id_renders_as_hex() {
        let oid = ObjectId::new();
        let doc = doc! { "_id": oid };
        let row = render_row(&columns(&["_id"]), &doc);
        assert_eq!(row, format!("{}\n", oid.to_hex()));
    }

    #[test]
    fn test_boolean_and_double() {
        let doc = doc! { "active": true, "score": 1.5 };
        let row = render_row(&columns(&["active", "score"]), &doc);
        assert_eq!(row, "true;1.5\n");
    }

    #[test]
    fn test_empty_column_list_renders_bare_newline() {
        let doc = doc! { "name": "Ann" };
        assert_eq!(render_row(&[], &doc), "\n");
    }
}
