//! Embedding collaborator interface.
//!
//! The library never computes embeddings itself. Callers hand a store an
//! implementation of [`Embedder`] (an API client, a local model, a test
//! mock) and the store calls it for every document and query it needs a
//! vector for.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Turns text into embedding vectors.
///
/// Implementations must return exactly one vector per input text, in input
/// order, and every vector they ever produce must have the same length.
/// Stores check that length against their configured dimension and reject
/// anything else before writing or querying.
///
/// The trait is object safe; stores hold `Arc<dyn Embedder>`.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts, one vector per text.
    async fn embed_strings(&self, texts: &[String]) -> Result<Vec<Vec<f64>>>;

    /// Embed a single query string.
    ///
    /// Provided method: delegates to [`embed_strings`](Embedder::embed_strings)
    /// with a one-element batch and errors if the reply does not contain
    /// exactly one vector.
    async fn embed_query(&self, text: &str) -> Result<Vec<f64>> {
        let texts = [text.to_string()];
        let mut vectors = self.embed_strings(&texts).await?;
        if vectors.len() > 1 {
            return Err(Error::embedding(format!(
                "expected 1 vector for query, got {}",
                vectors.len()
            )));
        }
        vectors
            .pop()
            .ok_or_else(|| Error::embedding("embedder returned no vectors"))
    }
}
