//! Core abstractions for the semindex vector store crates.
//!
//! This crate defines the backend-agnostic pieces:
//!
//! - [`Document`]: the unit of content (text, metadata, optional score)
//! - [`Embedder`]: the embedding collaborator interface
//! - [`Indexer`] and [`Retriever`]: the two operation surfaces a store
//!   exposes; one concrete store type implements both
//! - [`Error`] and [`Result`]: the crate-wide error taxonomy
//!
//! Backends such as `semindex-redis` build on these types; applications
//! mostly interact with `Arc<dyn Indexer>` and `Arc<dyn Retriever>`.
//!
//! # Example
//!
//! ```
//! use semindex::Document;
//!
//! let doc = Document::new("Ownership moves values between bindings")
//!     .with_metadata("source", "book");
//! assert!(doc.score.is_none());
//! ```

pub mod documents;
pub mod embeddings;
pub mod error;
pub mod indexer;
pub mod retriever;

pub use documents::Document;
pub use embeddings::Embedder;
pub use error::{Error, Result};
pub use indexer::Indexer;
pub use retriever::Retriever;
