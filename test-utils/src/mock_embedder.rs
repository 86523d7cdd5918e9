//! Mock embedders for testing.
//!
//! Deterministic [`Embedder`] implementations that need no API keys or
//! network calls, for unit testing vector stores and other components
//! that consume embeddings.

use async_trait::async_trait;
use semindex::error::{Error, Result};
use semindex::Embedder;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Simple mock embedder for testing.
///
/// Generates deterministic vectors based on text content. The vectors
/// are normalized and predictable, making them suitable for tests that
/// need embeddings but don't care about semantic meaning.
///
/// # Vector Generation
///
/// For each text:
/// - first component: normalized first byte value (or 0 if empty)
/// - second component: normalized second byte value (or 0 if too short)
/// - third component: normalized text length
///
/// Higher dimensions are filled from a byte-position mix, and the
/// resulting vector is normalized to unit length.
///
/// # Examples
///
/// ```rust
/// use semindex_test_utils::MockEmbedder;
/// use semindex::Embedder;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let embedder = MockEmbedder::new();
///
///     let texts = vec!["Hello".to_string(), "World".to_string()];
///     let vectors = embedder.embed_strings(&texts).await?;
///
///     assert_eq!(vectors.len(), 2);
///     assert_eq!(vectors[0].len(), 3); // 3D vectors
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MockEmbedder {
    /// Dimensionality of generated vectors (default: 3)
    pub dimensions: usize,
}

impl MockEmbedder {
    /// Creates a new mock embedder with 3-dimensional vectors.
    #[must_use]
    pub fn new() -> Self {
        Self { dimensions: 3 }
    }

    /// Creates a new mock embedder with custom dimensionality.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use semindex_test_utils::MockEmbedder;
    ///
    /// let embedder = MockEmbedder::with_dimensions(128);
    /// ```
    #[must_use]
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Generates a deterministic unit-length vector for a single text.
    fn generate_vector(&self, text: &str) -> Vec<f64> {
        let bytes = text.as_bytes();

        let x = if bytes.is_empty() {
            0.0
        } else {
            f64::from(bytes[0]) / 255.0
        };

        let y = if bytes.len() < 2 {
            0.0
        } else {
            f64::from(bytes[1]) / 255.0
        };

        let z = (text.len() as f64 / 100.0).min(1.0);

        let mut vector = vec![x, y, z];

        if self.dimensions > 3 {
            // Fill additional dimensions from a byte-position mix
            for i in 3..self.dimensions {
                let byte_index = i % bytes.len().max(1);
                let byte_val = if byte_index < bytes.len() {
                    bytes[byte_index]
                } else {
                    (i as u8).wrapping_mul(37)
                };
                let positional = i as f64 / self.dimensions as f64;
                vector.push((f64::from(byte_val) / 255.0 + positional) / 2.0);
            }
        } else if self.dimensions < 3 {
            vector.truncate(self.dimensions);
        }

        let magnitude: f64 = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if magnitude > 0.0 {
            vector.iter().map(|v| v / magnitude).collect()
        } else {
            // All-zero input text; return equal components
            vec![1.0 / (self.dimensions as f64).sqrt(); self.dimensions]
        }
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed_strings(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        Ok(texts
            .iter()
            .map(|text| self.generate_vector(text))
            .collect())
    }
}

/// Embedder that serves pre-registered vectors and counts invocations.
///
/// Fixtures map exact text to a vector; asking for an unregistered text
/// is an error, which usually means a test fixture is missing. The call
/// counter lets tests assert that an operation never reached the
/// embedder at all.
///
/// # Examples
///
/// ```rust
/// use semindex_test_utils::StaticEmbedder;
/// use semindex::Embedder;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let embedder = StaticEmbedder::new()
///         .with_fixture("hello", vec![1.0, 0.0]);
///
///     let vector = embedder.embed_query("hello").await?;
///     assert_eq!(vector, vec![1.0, 0.0]);
///     assert_eq!(embedder.calls(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Default)]
pub struct StaticEmbedder {
    fixtures: HashMap<String, Vec<f64>>,
    calls: AtomicUsize,
}

impl StaticEmbedder {
    /// Creates an embedder with no fixtures registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a vector for an exact text (builder pattern).
    #[must_use]
    pub fn with_fixture(mut self, text: impl Into<String>, vector: Vec<f64>) -> Self {
        self.fixtures.insert(text.into(), vector);
        self
    }

    /// Number of times `embed_strings` has been invoked.
    ///
    /// The default `embed_query` delegates to `embed_strings`, so both
    /// paths count.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for StaticEmbedder {
    async fn embed_strings(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|text| {
                self.fixtures.get(text).cloned().ok_or_else(|| {
                    Error::embedding(format!("no fixture registered for text '{text}'"))
                })
            })
            .collect()
    }
}
