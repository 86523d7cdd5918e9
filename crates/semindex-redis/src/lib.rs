//! Redis Stack vector store backend for `semindex`.
//!
//! This crate stores documents as Redis hashes (content, metadata JSON,
//! and a binary embedding vector) and searches them with RediSearch KNN
//! queries over a FLAT cosine index. It implements the `semindex`
//! [`Indexer`](semindex::Indexer) and [`Retriever`](semindex::Retriever)
//! traits, so one [`RedisVectorStore`] covers both ingestion and
//! retrieval.
//!
//! # Prerequisites
//!
//! You need a Redis server with the RediSearch module (Redis Stack).
//! The easiest way is with Docker:
//!
//! ```bash
//! docker run -d -p 6379:6379 redis/redis-stack-server:latest
//! ```
//!
//! A plain Redis without the module accepts connections but rejects the
//! `FT.*` commands this crate issues.
//!
//! # Features
//!
//! - **KNN similarity search**: FLAT index with cosine distance
//! - **Pipelined ingestion**: one round trip per document batch
//! - **Score filtering**: drop hits below a configurable similarity floor
//! - **Metadata round-tripping**: arbitrary JSON metadata per document
//!
//! # Examples
//!
//! ```ignore
//! use semindex::{Document, Indexer, Retriever};
//! use semindex_redis::{RedisVectorStore, RedisVectorStoreConfig};
//! use std::sync::Arc;
//!
//! # async fn example(embedder: Arc<dyn semindex::Embedder>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedisVectorStoreConfig::new("redis://localhost:6379", embedder, 768)
//!     .with_top_k(5)
//!     .with_min_score(0.5);
//! let store = RedisVectorStore::new(config).await?;
//!
//! let docs = vec![
//!     Document::new("Paris is the capital of France").with_metadata("source", "geo"),
//!     Document::new("The Rust borrow checker enforces aliasing rules"),
//! ];
//! let ids = store.store(&docs).await?;
//!
//! let results = store.retrieve("capital of France").await?;
//! for doc in &results {
//!     println!("{:?}: {}", doc.score, doc.content);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! For a runnable end-to-end demonstration:
//!
//! ```bash
//! cargo run --package semindex-redis --example redis_basic
//! ```
//!
//! # See Also
//!
//! - [`Indexer`](semindex::Indexer) and [`Retriever`](semindex::Retriever) - the traits this implements
//! - [`Embedder`](semindex::Embedder) - required for generating vectors
//! - [RediSearch vector documentation](https://redis.io/docs/latest/develop/interact/search-and-query/advanced-concepts/vectors/)

// Public API
pub mod constants;
pub mod schema;
pub mod utils;
mod vector_store;

pub use vector_store::{RedisVectorStore, RedisVectorStoreConfig};
