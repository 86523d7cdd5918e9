//! Document retrieval interface.

use async_trait::async_trait;

use crate::documents::Document;
use crate::error::Result;

/// Retrieves documents relevant to a text query.
///
/// This is the query half of a vector store; [`Indexer`](crate::Indexer)
/// is the ingestion half. Implementations return documents most relevant
/// first, with [`Document::score`] populated.
///
/// # Example
///
/// ```rust,ignore
/// use semindex::Retriever;
/// use std::sync::Arc;
///
/// async fn answer_context(retriever: Arc<dyn Retriever>) -> semindex::Result<String> {
///     let docs = retriever.retrieve("how do lifetimes work?").await?;
///     Ok(docs
///         .iter()
///         .map(|d| d.content.as_str())
///         .collect::<Vec<_>>()
///         .join("\n\n"))
/// }
/// ```
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Return documents relevant to `query`, most relevant first.
    ///
    /// An empty query returns an empty list without consulting the
    /// embedder or the store.
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>>;
}
