//! Streaming CSV export pipeline
//!
//! This module binds a schema to an exporter value that the host composes
//! explicitly (no global registration): header and row rendering for
//! one-off use, and a streaming pipeline from a document source into any
//! async byte sink.
//!
//! # Example
//!
//! ```no_run
//! use mongocsv::{CsvExporter, ExportOptions, FieldKind, ScalarType, Schema};
//! use mongocsv::export::streaming::CursorDocumentSource;
//!
//! # async fn example(cursor: mongodb::Cursor<mongodb::bson::Document>) -> mongocsv::Result<()> {
//! let schema = Schema::builder()
//!     .field("name", FieldKind::Scalar(ScalarType::String))
//!     .field("age", FieldKind::Scalar(ScalarType::Number))
//!     .build()?;
//!
//! let exporter = CsvExporter::new(schema);
//! let mut source = CursorDocumentSource::new(cursor);
//! let mut sink = tokio::io::BufWriter::new(tokio::fs::File::create("out.csv").await?);
//! let result = exporter
//!     .stream(&mut source, &mut sink, &ExportOptions::default())
//!     .await?;
//! println!("exported {} rows", result.rows_written);
//! # Ok(())
//! # }
//! ```

use std::time::Instant;

use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::Result;
use crate::header::{self, RenameMap};
use crate::render::{self, Transform, transform};
use crate::schema::{Schema, discover_columns};

pub mod streaming;

pub use streaming::{CursorDocumentSource, DocumentSource};

/// Options for one export call.
///
/// The include list and rename map are plain data so hosts can load them
/// from configuration; the cancellation token is attached programmatically.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Allow-list of original column names; `None` exports every column.
    pub include_only: Option<Vec<String>>,
    /// Call-level header renames, winning over the exporter's own.
    #[serde(default)]
    pub rename: RenameMap,
    /// Cooperative cancellation for a running export.
    #[serde(skip)]
    pub cancel: Option<CancellationToken>,
}

/// Result of a completed (or cancelled) export.
#[derive(Debug)]
pub struct ExportResult {
    /// Number of data rows written (header excluded).
    pub rows_written: u64,
    /// Total bytes written, header included.
    pub bytes_written: u64,
    /// Wall-clock time for the export.
    pub elapsed_ms: u64,
    /// Whether the export stopped early on a cancellation request.
    pub cancelled: bool,
}

/// CSV exporter bound to one schema.
///
/// The column list is derived fresh from the schema on every call, so two
/// concurrent exports never share rendering state. Rebinding after a host
/// schema change is just constructing a new exporter.
pub struct CsvExporter {
    schema: Schema,
    renames: RenameMap,
    transforms: Vec<Transform>,
}

impl CsvExporter {
    /// Bind an exporter to a schema.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            renames: RenameMap::new(),
            transforms: Vec::new(),
        }
    }

    /// Set the exporter-level header renames (applied before any
    /// call-level overrides).
    pub fn with_renames(mut self, renames: RenameMap) -> Self {
        self.renames = renames;
        self
    }

    /// Set the ordered list of per-field transforms applied to each
    /// document snapshot before rendering.
    pub fn with_transforms(mut self, transforms: Vec<Transform>) -> Self {
        self.transforms = transforms;
        self
    }

    /// The bound schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Derive the current column list (identifier last).
    pub fn columns(&self) -> Vec<String> {
        discover_columns(&self.schema)
    }

    /// Render the header line.
    ///
    /// # Arguments
    /// * `include_only` - Optional allow-list of original column names
    /// * `overrides` - Optional call-level renames, winning over the
    ///   exporter-level ones
    pub fn header_line(
        &self,
        include_only: Option<&[String]>,
        overrides: Option<&RenameMap>,
    ) -> String {
        let columns = header::filter_columns(self.columns(), include_only);
        let headers = header::customize(&columns, &self.renames, overrides);
        render::render_header(&headers)
    }

    /// Render one document as a data row.
    ///
    /// Configured transforms run against a copy of the snapshot first; the
    /// caller's document is never mutated.
    pub fn row_line(&self, doc: &Document, include_only: Option<&[String]>) -> String {
        let columns = header::filter_columns(self.columns(), include_only);
        if self.transforms.is_empty() {
            return render::render_row(&columns, doc);
        }

        let mut snapshot = doc.clone();
        transform::apply_all(&self.transforms, &mut snapshot);
        render::render_row(&columns, &snapshot)
    }

    /// Stream a document source into a sink as CSV.
    ///
    /// Writes the header line first, then exactly one row per document in
    /// the source's emission order. Each row is rendered completely before
    /// a single write, so the sink never observes a partial row.
    /// Backpressure comes from awaiting the sink; the scheduler yields
    /// between documents so a long export never monopolizes the runtime.
    ///
    /// A source or sink failure closes the source and propagates as a
    /// terminal error. A cancellation request stops the pull loop between
    /// documents, flushes what was written, and reports `cancelled: true`.
    pub async fn stream<S, W>(
        &self,
        source: &mut S,
        sink: &mut W,
        options: &ExportOptions,
    ) -> Result<ExportResult>
    where
        S: DocumentSource + ?Sized,
        W: AsyncWrite + Unpin + Send,
    {
        let start = Instant::now();
        let include_only = options.include_only.as_deref();
        let columns = header::filter_columns(self.columns(), include_only);
        let headers = header::customize(&columns, &self.renames, Some(&options.rename));

        info!("Starting CSV export: {} columns", columns.len());

        let header_line = render::render_header(&headers);
        if let Err(e) = sink.write_all(header_line.as_bytes()).await {
            let _ = source.close().await;
            return Err(e.into());
        }

        let mut rows_written = 0u64;
        let mut bytes_written = header_line.len() as u64;
        let mut cancelled = false;

        loop {
            if let Some(token) = &options.cancel {
                if token.is_cancelled() {
                    info!("CSV export cancelled after {} rows", rows_written);
                    cancelled = true;
                    break;
                }
            }

            match source.next_document().await {
                Ok(Some(mut doc)) => {
                    transform::apply_all(&self.transforms, &mut doc);
                    let line = render::render_row(&columns, &doc);
                    if let Err(e) = sink.write_all(line.as_bytes()).await {
                        let _ = source.close().await;
                        return Err(e.into());
                    }

                    rows_written += 1;
                    bytes_written += line.len() as u64;
                    if rows_written % 1000 == 0 {
                        debug!("Exported {} rows", rows_written);
                    }

                    // yield between documents so one export cannot starve
                    // other tasks on the runtime
                    tokio::task::yield_now().await;
                }
                Ok(None) => break,
                Err(e) => {
                    let _ = source.close().await;
                    return Err(e);
                }
            }
        }

        if let Err(e) = sink.flush().await {
            let _ = source.close().await;
            return Err(e.into());
        }
        source.close().await?;

        let elapsed_ms = start.elapsed().as_millis() as u64;
        info!(
            "CSV export finished: {} rows, {} bytes in {}ms",
            rows_written, bytes_written, elapsed_ms
        );

        Ok(ExportResult {
            rows_written,
            bytes_written,
            elapsed_ms,
            cancelled,
        })
    }
}
