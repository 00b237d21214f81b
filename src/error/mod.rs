//! Error handling module for CSV export operations.
//!
//! This module provides the error types used throughout the crate:
//! - Schema definition errors
//! - Export pipeline errors (cursor failures)
//! - Wrapped I/O and MongoDB driver errors (sink failures surface as I/O)

use std::{fmt, io};

/// Crate-wide `Result` type using [`CsvError`] as the error.
///
/// This alias is intended to be used throughout the crate for
/// fallible operations.
pub type Result<T> = std::result::Result<T, CsvError>;

/// Top-level error type for CSV export operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum CsvError {
    /// Schema definition errors.
    Schema(SchemaError),

    /// Export pipeline errors.
    Export(ExportError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),
}

/// Schema-definition-specific errors.
#[derive(Debug)]
pub enum SchemaError {
    /// A field path was declared more than once.
    DuplicateField(String),

    /// A field was declared with an empty path.
    EmptyFieldPath,
}

/// Export-pipeline-specific errors.
///
/// Sink failures are not represented here: the sink speaks `io::Error`
/// and surfaces as [`CsvError::Io`].
#[derive(Debug)]
pub enum ExportError {
    /// The document source failed while producing documents.
    CursorFailed(String),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::Schema(e) => write!(f, "Schema error: {}", e),
            CsvError::Export(e) => write!(f, "Export error: {}", e),
            CsvError::Io(e) => write!(f, "I/O error: {}", e),
            CsvError::MongoDb(e) => write!(f, "MongoDB error: {}", e),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::DuplicateField(path) => {
                write!(f, "Field declared more than once: {}", path)
            }
            SchemaError::EmptyFieldPath => write!(f, "Field path must not be empty"),
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::CursorFailed(msg) => write!(f, "Cursor failed: {}", msg),
        }
    }
}

impl std::error::Error for CsvError {}
impl std::error::Error for SchemaError {}
impl std::error::Error for ExportError {}

impl From<SchemaError> for CsvError {
    fn from(err: SchemaError) -> Self {
        CsvError::Schema(err)
    }
}

impl From<ExportError> for CsvError {
    fn from(err: ExportError) -> Self {
        CsvError::Export(err)
    }
}

impl From<io::Error> for CsvError {
    fn from(err: io::Error) -> Self {
        CsvError::Io(err)
    }
}

impl From<mongodb::error::Error> for CsvError {
    fn from(err: mongodb::error::Error) -> Self {
        CsvError::MongoDb(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_schema_error() {
        let err = CsvError::from(SchemaError::DuplicateField("name".to_string()));
        assert_eq!(
            err.to_string(),
            "Schema error: Field declared more than once: name"
        );
    }

    #[test]
    fn test_display_export_error() {
        let err = CsvError::from(ExportError::CursorFailed("connection reset".to_string()));
        assert_eq!(err.to_string(), "Export error: Cursor failed: connection reset");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CsvError = io_err.into();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
