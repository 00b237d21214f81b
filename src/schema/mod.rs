//! Declarative document schema definitions
//!
//! This module provides the schema types that describe a document type for
//! export purposes: an ordered list of field descriptors (path, storage kind,
//! inclusion options, virtual flag) plus the identifier path. Schemas are
//! immutable once built; a host whose live schema changes rebuilds the
//! exporter with a fresh `Schema`.

use crate::error::{Result, SchemaError};

pub mod discovery;

pub use discovery::{discover_columns, VERSION_FIELD};

/// Scalar storage types eligible for flat CSV columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Number,
    Boolean,
    Date,
    ObjectId,
}

/// Storage-kind tag for a declared field.
///
/// Only `Scalar` fields are exportable; the other kinds are rejected during
/// column discovery because they have no flat single-cell representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Flat scalar value.
    Scalar(ScalarType),
    /// Array of values.
    Collection,
    /// Embedded sub-document.
    NestedObject,
    /// Untyped / mixed value.
    FreeForm,
}

/// Per-field options bag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    /// Explicit CSV inclusion flag. `None` means include by default.
    pub csv: Option<bool>,
}

/// Per-path metadata entry for one declared field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Field path, possibly dotted for nested values (e.g. `address.city`).
    pub path: String,
    /// Storage-kind tag.
    pub kind: FieldKind,
    /// Inclusion options.
    pub options: FieldOptions,
    /// Whether the field is computed rather than stored. Virtual fields are
    /// exportable like any other; the host materializes them into the
    /// document snapshot before rendering.
    pub virtual_field: bool,
}

impl FieldDescriptor {
    /// Create a stored field descriptor with default options.
    pub fn new(path: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
            options: FieldOptions::default(),
            virtual_field: false,
        }
    }

    /// Set the explicit CSV inclusion flag.
    pub fn csv(mut self, include: bool) -> Self {
        self.options.csv = Some(include);
        self
    }

    /// Mark the field as computed rather than stored.
    pub fn virtual_field(mut self) -> Self {
        self.virtual_field = true;
        self
    }
}

/// Immutable description of one document type's exportable shape.
///
/// Field order is declaration order and is the export order.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    id_field: String,
}

impl Schema {
    /// Start building a schema.
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The primary identifier path (default `_id`).
    pub fn id_field(&self) -> &str {
        &self.id_field
    }
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDescriptor>,
    id_field: Option<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a stored field with default options.
    pub fn field(mut self, path: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(path, kind));
        self
    }

    /// Declare a field from a fully-specified descriptor.
    pub fn descriptor(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Override the identifier path (default `_id`).
    pub fn id_field(mut self, path: impl Into<String>) -> Self {
        self.id_field = Some(path.into());
        self
    }

    /// Finalize the schema.
    ///
    /// # Returns
    /// * `Result<Schema>` - The schema, or an error for empty or duplicate
    ///   field paths
    pub fn build(self) -> Result<Schema> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.fields.len());
        for descriptor in &self.fields {
            if descriptor.path.is_empty() {
                return Err(SchemaError::EmptyFieldPath.into());
            }
            if seen.contains(&descriptor.path.as_str()) {
                return Err(SchemaError::DuplicateField(descriptor.path.clone()).into());
            }
            seen.push(&descriptor.path);
        }

        Ok(Schema {
            fields: self.fields,
            id_field: self.id_field.unwrap_or_else(|| "_id".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let schema = Schema::builder()
            .field("name", FieldKind::Scalar(ScalarType::String))
            .field("age", FieldKind::Scalar(ScalarType::Number))
            .field("tags", FieldKind::Collection)
            .build()
            .unwrap();

        let paths: Vec<&str> = schema.fields().iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["name", "age", "tags"]);
        assert_eq!(schema.id_field(), "_id");
    }

    #[test]
    fn test_builder_rejects_duplicate_path() {
        let result = Schema::builder()
            .field("name", FieldKind::Scalar(ScalarType::String))
            .field("name", FieldKind::Scalar(ScalarType::String))
            .build();

        assert!(matches!(
            result,
            Err(CsvError::Schema(SchemaError::DuplicateField(_)))
        ));
    }

    #[test]
    fn test_builder_rejects_empty_path() {
        let result = Schema::builder()
            .field("", FieldKind::Scalar(ScalarType::String))
            .build();

        assert!(matches!(
            result,
            Err(CsvError::Schema(SchemaError::EmptyFieldPath))
        ));
    }

    #[test]
    fn test_descriptor_flags() {
        let descriptor = FieldDescriptor::new("full_name", FieldKind::Scalar(ScalarType::String))
            .csv(false)
            .virtual_field();

        assert_eq!(descriptor.options.csv, Some(false));
        assert!(descriptor.virtual_field);
    }

    #[test]
    fn test_custom_id_field() {
        let schema = Schema::builder()
            .field("name", FieldKind::Scalar(ScalarType::String))
            .id_field("uuid")
            .build()
            .unwrap();

        assert_eq!(schema.id_field(), "uuid");
    }
}
