//! Schema-driven CSV export for MongoDB document models
//!
//! This library derives a stable column set from a declarative document
//! schema and streams query results as CSV lines into any async byte sink.
//!
//! # Modules
//!
//! - `error`: Error types and handling
//! - `schema`: Schema definitions and column discovery
//! - `render`: Row/header rendering and per-field transforms
//! - `header`: Header include filtering and renames
//! - `export`: The bound exporter and streaming pipeline
//!
//! # Example
//!
//! ```
//! use mongocsv::{CsvExporter, FieldKind, ScalarType, Schema};
//! use mongodb::bson::doc;
//!
//! fn main() -> mongocsv::Result<()> {
//!     let schema = Schema::builder()
//!         .field("name", FieldKind::Scalar(ScalarType::String))
//!         .field("age", FieldKind::Scalar(ScalarType::Number))
//!         .build()?;
//!
//!     let exporter = CsvExporter::new(schema);
//!     assert_eq!(exporter.header_line(None, None), "name;age;_id\n");
//!
//!     let doc = doc! { "name": "Ann", "age": 30, "_id": "x1" };
//!     assert_eq!(exporter.row_line(&doc, None), "Ann;30;x1\n");
//!     Ok(())
//! }
//! ```
//!
//! # Format
//!
//! One record per line, fields joined by `;`, lines terminated by `\n`,
//! no field quoting, identifier column always last. See [`render`] for the
//! quoting caveat.

pub mod error;
pub mod export;
pub mod header;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use error::{CsvError, ExportError, Result, SchemaError};
pub use export::{CsvExporter, CursorDocumentSource, DocumentSource, ExportOptions, ExportResult};
pub use header::RenameMap;
pub use render::Transform;
pub use schema::{FieldDescriptor, FieldKind, FieldOptions, ScalarType, Schema, SchemaBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
