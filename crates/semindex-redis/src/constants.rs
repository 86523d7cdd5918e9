//! Constants for the Redis vector store.
//!
//! Field names and defaults are wire-level contract: existing deployments
//! have hashes and an index built from these exact strings.

/// Default Redis key prefix for document hashes.
pub const DEFAULT_KEY_PREFIX: &str = "doc:";

/// Suffix joined to the key prefix with `:` to form the index name.
///
/// The default prefix therefore yields the index name `doc::vector_idx`.
pub const INDEX_NAME_SUFFIX: &str = "vector_idx";

/// Hash field holding the document text.
pub const CONTENT_FIELD: &str = "content";

/// Hash field holding the metadata JSON string.
pub const METADATA_FIELD: &str = "metadata";

/// Hash field holding the raw little-endian float32 embedding.
pub const VECTOR_FIELD: &str = "content_vector";

/// Search attribute (and returned metadata key) carrying the distance.
pub const DISTANCE_FIELD: &str = "distance";

/// Default number of nearest neighbors returned by a search.
pub const DEFAULT_TOP_K: usize = 3;
