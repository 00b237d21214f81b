//! Streaming document sources for CSV export
//!
//! This module abstracts the query-result cursor behind a pull-based async
//! trait so the exporter can stream rows without loading the full result
//! set into memory. A ready-made implementation wraps `mongodb::Cursor`.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Cursor;
use mongodb::bson::Document;
use tracing::{debug, info};

use crate::error::Result;

/// Pull-based asynchronous sequence of document snapshots.
///
/// Each yielded document must be fully resolved (virtual fields already
/// materialized); the exporter looks values up by column path and never
/// goes back to the database.
#[async_trait]
pub trait DocumentSource: Send {
    /// Fetch the next document.
    ///
    /// # Returns
    /// * `Result<Option<Document>>` - Next document, or None when exhausted
    async fn next_document(&mut self) -> Result<Option<Document>>;

    /// Close the source and release its resources.
    async fn close(&mut self) -> Result<()>;
}

/// [`DocumentSource`] backed by a MongoDB query cursor.
pub struct CursorDocumentSource {
    cursor: Option<Cursor<Document>>,
    fetched: u64,
    closed: bool,
}

impl CursorDocumentSource {
    /// Wrap a cursor obtained from a find or aggregate operation.
    pub fn new(cursor: Cursor<Document>) -> Self {
        Self {
            cursor: Some(cursor),
            fetched: 0,
            closed: false,
        }
    }
}

#[async_trait]
impl DocumentSource for CursorDocumentSource {
    async fn next_document(&mut self) -> Result<Option<Document>> {
        if self.closed {
            return Ok(None);
        }

        let cursor = match self.cursor.as_mut() {
            Some(c) => c,
            None => return Ok(None),
        };

        match cursor.try_next().await {
            Ok(Some(doc)) => {
                self.fetched += 1;
                Ok(Some(doc))
            }
            Ok(None) => {
                debug!("Cursor exhausted after {} documents", self.fetched);
                self.cursor = None;
                self.closed = true;
                Ok(None)
            }
            Err(e) => {
                // On error, drop the cursor to release server resources
                self.cursor = None;
                self.closed = true;
                Err(e.into())
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if !self.closed {
            self.cursor = None;
            self.closed = true;
            info!("Closed cursor source after fetching {} documents", self.fetched);
        }
        Ok(())
    }
}

impl Drop for CursorDocumentSource {
    fn drop(&mut self) {
        // Ensure the cursor is released on drop
        if !self.closed {
            debug!("CursorDocumentSource dropped without explicit close");
            self.cursor = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_source_trait_object() {
        // Verify DocumentSource is usable as a trait object
        fn _accepts_source(_source: Box<dyn DocumentSource>) {}
        fn _accepts_cursor_source(source: CursorDocumentSource) -> Box<dyn DocumentSource> {
            Box::new(source)
        }
    }
}
