//! Document types for semindex.
//!
//! A [`Document`] is the unit of content moving through the library: the
//! text that gets embedded and stored, the metadata that travels with it,
//! and, on the way back out of a search, the similarity score the store
//! computed for it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A piece of text with optional identity, metadata, and retrieval score.
///
/// Documents are what [`Indexer::store`](crate::Indexer::store) accepts and
/// [`Retriever::retrieve`](crate::Retriever::retrieve) returns. Each
/// document contains:
/// - `id`: optional unique identifier; stores generate one when absent
/// - `content`: the text content
/// - `metadata`: key-value pairs stored alongside the content
/// - `score`: similarity score, populated by retrieval only
///
/// # Example
///
/// ```
/// use semindex::Document;
///
/// let doc = Document::new("Rust ownership rules")
///     .with_id("doc-42")
///     .with_metadata("source", "handbook.md")
///     .with_metadata("chapter", 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Optional unique identifier for the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The text content of the document
    pub content: String,

    /// Metadata associated with the document
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// Similarity score assigned by retrieval; never persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Document {
    /// Create a new document with the given text content.
    ///
    /// # Example
    ///
    /// ```
    /// use semindex::Document;
    ///
    /// let doc = Document::new("Hello, world!");
    /// assert_eq!(doc.content, "Hello, world!");
    /// assert!(doc.id.is_none());
    /// ```
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: None,
            content: content.into(),
            metadata: HashMap::new(),
            score: None,
        }
    }

    /// Set the document ID (builder pattern).
    ///
    /// # Example
    ///
    /// ```
    /// use semindex::Document;
    ///
    /// let doc = Document::new("Hello").with_id("doc-123");
    /// assert_eq!(doc.id, Some("doc-123".to_string()));
    /// ```
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add metadata to the document (builder pattern).
    ///
    /// # Example
    ///
    /// ```
    /// use semindex::Document;
    ///
    /// let doc = Document::new("Hello")
    ///     .with_metadata("source", "notes.md")
    ///     .with_metadata("page", 1);
    /// ```
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Set the similarity score (builder pattern).
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Get metadata value by key.
    #[must_use]
    pub fn get_metadata(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Set metadata value.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.into(), value.into());
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.metadata.is_empty() {
            write!(f, "content='{}'", self.content)
        } else {
            write!(f, "content='{}' metadata={:?}", self.content, self.metadata)
        }
    }
}
