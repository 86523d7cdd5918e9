//! # Redis Vector Store Example
//!
//! This example demonstrates how to use RedisVectorStore for storing
//! and searching document embeddings in Redis Stack.
//!
//! **Prerequisites:**
//! - Start Redis Stack: `docker run -d -p 6379:6379 redis/redis-stack-server:latest`
//!
//! **Run this example:**
//! ```bash
//! cargo run --package semindex-redis --example redis_basic
//! ```
//!
//! Covers:
//! - Connecting and bootstrapping the vector index
//! - Storing documents with metadata and stable ids
//! - Similarity search with scores
//! - Tuning result count and score filtering

use async_trait::async_trait;
use semindex::error::Result;
use semindex::{Document, Embedder, Indexer, Retriever};
use semindex_redis::{RedisVectorStore, RedisVectorStoreConfig};
use std::sync::Arc;

/// Simple deterministic embedder for demonstration.
/// In production, use OpenAI, Cohere, or another real embedding model.
struct DemoEmbedder;

#[async_trait]
impl Embedder for DemoEmbedder {
    async fn embed_strings(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        // Real embeddings would be 768-1536 dimensions; we use 3 for demo
        Ok(texts
            .iter()
            .map(|text| {
                let len = text.len() as f64;
                let first_char = f64::from(text.chars().next().unwrap_or('a') as u32);
                let word_count = text.split_whitespace().count() as f64;

                let x = (first_char / 255.0).min(1.0);
                let y = (word_count / 20.0).min(1.0);
                let z = (len / 100.0).min(1.0);

                // Normalize to unit vector (for cosine similarity)
                let mag = (x * x + y * y + z * z).sqrt();
                if mag > 0.0 {
                    vec![x / mag, y / mag, z / mag]
                } else {
                    vec![0.0, 0.0, 1.0]
                }
            })
            .collect())
    }
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Redis Vector Store Example ===\n");
    println!("Note: This requires Redis Stack at redis://localhost:6379");
    println!("Start with: docker run -d -p 6379:6379 redis/redis-stack-server:latest\n");

    let embedder: Arc<dyn Embedder> = Arc::new(DemoEmbedder);

    println!("Connecting to Redis and ensuring the vector index exists...");
    let config = RedisVectorStoreConfig::new("redis://localhost:6379", Arc::clone(&embedder), 3)
        .with_key_prefix("demo:");
    let store = RedisVectorStore::new(config).await?;
    println!("Connected; index '{}' is ready\n", store.index_name());

    // Example 1: Store simple documents
    println!("Example 1: Storing Simple Documents");
    // Stable ids make re-runs overwrite instead of accumulating
    let docs = vec![
        Document::new("The quick brown fox jumps over the lazy dog").with_id("quote-001"),
        Document::new("A journey of a thousand miles begins with a single step")
            .with_id("quote-002"),
        Document::new("To be or not to be, that is the question").with_id("quote-003"),
    ];
    let ids = store.store(&docs).await?;
    println!("Stored {} documents", ids.len());
    println!("Document IDs: {ids:?}\n");

    // Example 2: Store documents with metadata
    println!("Example 2: Storing Documents with Metadata");
    let docs_with_meta = vec![
        Document::new("The journey of a thousand miles begins with one step")
            .with_id("author-001")
            .with_metadata("author", "Lao Tzu")
            .with_metadata("category", "philosophy"),
        Document::new("Imagination is more important than knowledge")
            .with_id("author-002")
            .with_metadata("author", "Albert Einstein")
            .with_metadata("category", "science"),
        Document::new("Nothing in life is to be feared, it is only to be understood")
            .with_id("author-003")
            .with_metadata("author", "Marie Curie")
            .with_metadata("category", "science"),
    ];
    let meta_ids = store.store(&docs_with_meta).await?;
    println!("Stored {} documents with metadata\n", meta_ids.len());

    // Example 3: Similarity search with scores
    println!("Example 3: Similarity Search with Scores");
    let query = "knowledge and wisdom";
    let results = store.retrieve(query).await?;

    println!("Top {} results for query '{query}':", results.len());
    for (i, doc) in results.iter().enumerate() {
        let author = doc
            .get_metadata("author")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown");
        let score = doc.score.unwrap_or_default();
        println!("{}. [Score: {score:.4}] {}", i + 1, doc.content);
        println!("   Author: {author}");
    }
    println!();

    // Example 4: Tuned retrieval
    println!("Example 4: Tuned Retrieval (top_k=5, min_score=0.4)");
    // A second store over the same prefix shares index and documents
    let tuned_config =
        RedisVectorStoreConfig::new("redis://localhost:6379", Arc::clone(&embedder), 3)
            .with_key_prefix("demo:")
            .with_top_k(5)
            .with_min_score(0.4);
    let tuned_store = RedisVectorStore::new(tuned_config).await?;

    let tuned_results = tuned_store.retrieve(query).await?;
    println!("{} results pass the score floor:", tuned_results.len());
    for (i, doc) in tuned_results.iter().enumerate() {
        let distance = doc
            .get_metadata("distance")
            .and_then(serde_json::Value::as_f64)
            .unwrap_or_default();
        let score = doc.score.unwrap_or_default();
        println!(
            "{}. [Score: {score:.4}, Distance: {distance:.4}] {}",
            i + 1,
            doc.content
        );
    }
    println!();

    println!("=== Summary ===");
    println!("Demonstrated: index bootstrap, batch storage, scored retrieval, and tuning");
    println!("\nExample complete!");
    println!("\nNote: Documents persist in Redis under the 'demo:' prefix. To reset, run FLUSHDB or restart the container.");

    Ok(())
}
