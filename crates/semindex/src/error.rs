//! Error types shared across the semindex crates.
//!
//! One [`Error`] enum covers every failure a vector store operation can
//! surface: configuration, connection, index commands, embedding
//! collaborators, batched writes, and reply parsing. Backends construct
//! variants through the helper methods rather than building the enum
//! directly, so messages stay uniform across crates.
//!
//! Errors are terminal: no operation retries on failure, and partial
//! success is never reported as success.

use thiserror::Error;

/// Result type alias used throughout the semindex crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vector store operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration: missing embedder, non-positive dimension,
    /// malformed connection URL.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server could not be reached or a connection could not be
    /// established.
    #[error("Connection error: {0}")]
    Connection(String),

    /// An index command (existence check, create, verify, search) failed.
    #[error("Index error: {0}")]
    Index(String),

    /// The embedding collaborator failed or returned unusable output.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// A vector's length does not match the configured dimension.
    #[error("vector dimension mismatch: got {actual}, want {expected}")]
    DimensionMismatch {
        /// Dimension the index was created with.
        expected: usize,
        /// Dimension of the offending vector.
        actual: usize,
    },

    /// The batched write exchange failed.
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// A server reply did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Caller-supplied input was rejected before any network traffic.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Metadata could not be serialized to or deserialized from JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a connection error.
    pub fn connection<S: Into<String>>(msg: S) -> Self {
        Error::Connection(msg.into())
    }

    /// Create an index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        Error::Index(msg.into())
    }

    /// Create an embedding error.
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        Error::Embedding(msg.into())
    }

    /// Create a dimension mismatch error.
    #[must_use]
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Error::DimensionMismatch { expected, actual }
    }

    /// Create a pipeline error.
    pub fn pipeline<S: Into<String>>(msg: S) -> Self {
        Error::Pipeline(msg.into())
    }

    /// Create a parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Error::InvalidInput(msg.into())
    }
}
