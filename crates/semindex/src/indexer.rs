//! Document ingestion interface.

use async_trait::async_trait;

use crate::documents::Document;
use crate::error::Result;

/// Writes documents into a backing store.
///
/// This is the ingestion half of a vector store; [`Retriever`](crate::Retriever)
/// is the query half. A concrete store implements both, and callers hold
/// `Arc<dyn Indexer>` when they only need to write.
///
/// # Example
///
/// ```rust,ignore
/// use semindex::{Document, Indexer};
/// use std::sync::Arc;
///
/// async fn ingest(indexer: Arc<dyn Indexer>) -> semindex::Result<()> {
///     let docs = vec![Document::new("borrow checker notes")];
///     let ids = indexer.store(&docs).await?;
///     assert_eq!(ids.len(), docs.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Store a batch of documents, returning their ids in input order.
    ///
    /// The returned vector has the same length as `docs`; ids supplied on
    /// the documents are honored, absent ones are generated. An error
    /// return means no ids are reported stored.
    async fn store(&self, docs: &[Document]) -> Result<Vec<String>>;
}
