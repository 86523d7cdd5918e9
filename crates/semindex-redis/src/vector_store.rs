//! Redis Stack vector store.
//!
//! [`RedisVectorStore`] turns a Redis instance with the RediSearch module
//! into a similarity index for embedding vectors. It owns the index
//! lifecycle (create-if-absent at construction), pipelined document
//! ingestion, and KNN query construction and reply parsing, and exposes
//! the two operation surfaces through the [`Indexer`] and [`Retriever`]
//! traits.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{IntoConnectionInfo, ProtocolVersion};
use semindex::error::{Error, Result};
use semindex::{Document, Embedder, Indexer, Retriever};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::constants::{
    CONTENT_FIELD, DEFAULT_KEY_PREFIX, DEFAULT_TOP_K, DISTANCE_FIELD, INDEX_NAME_SUFFIX,
    METADATA_FIELD, VECTOR_FIELD,
};
use crate::schema::RedisIndexSchema;
use crate::utils::encode_vector;

/// Configuration for [`RedisVectorStore`].
///
/// Plain data, injected at construction; the store never reads the
/// environment. Defaults are applied and invariants checked by
/// [`RedisVectorStore::new`] before any network traffic.
///
/// # Example
///
/// ```rust,ignore
/// use semindex_redis::RedisVectorStoreConfig;
/// use std::sync::Arc;
///
/// let config = RedisVectorStoreConfig::new("redis://localhost:6379", embedder, 768)
///     .with_key_prefix("kb:")
///     .with_top_k(5)
///     .with_min_score(0.5);
/// ```
#[derive(Clone)]
pub struct RedisVectorStoreConfig {
    /// Connection URL; a bare `host:port` is normalized to `redis://host:port`
    pub url: String,
    /// Embedding collaborator; required
    pub embedder: Option<Arc<dyn Embedder>>,
    /// Key prefix for document hashes; empty falls back to `doc:`
    pub key_prefix: String,
    /// Embedding dimensionality; must be positive
    pub dimension: usize,
    /// Number of nearest neighbors per search; `0` falls back to 3
    pub top_k: usize,
    /// Minimum similarity score a hit must reach to be returned;
    /// the default `0.0` drops only negative scores
    pub min_score: f64,
}

impl RedisVectorStoreConfig {
    /// Create a configuration with defaults for everything but the
    /// required fields.
    pub fn new(url: impl Into<String>, embedder: Arc<dyn Embedder>, dimension: usize) -> Self {
        Self {
            url: url.into(),
            embedder: Some(embedder),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            dimension,
            top_k: DEFAULT_TOP_K,
            min_score: 0.0,
        }
    }

    /// Set the key prefix (builder pattern).
    #[must_use]
    pub fn with_key_prefix(mut self, key_prefix: impl Into<String>) -> Self {
        self.key_prefix = key_prefix.into();
        self
    }

    /// Set the number of nearest neighbors per search (builder pattern).
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the minimum similarity score (builder pattern).
    #[must_use]
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Check invariants that must hold before connecting.
    pub fn validate(&self) -> Result<()> {
        if self.embedder.is_none() {
            return Err(Error::config("embedder not provided"));
        }
        if self.dimension == 0 {
            return Err(Error::config("dimension must be a positive integer"));
        }
        Ok(())
    }

    /// Key prefix with the default applied.
    #[must_use]
    pub fn effective_key_prefix(&self) -> String {
        if self.key_prefix.is_empty() {
            DEFAULT_KEY_PREFIX.to_string()
        } else {
            self.key_prefix.clone()
        }
    }

    /// Number of neighbors with the default applied.
    #[must_use]
    pub fn effective_top_k(&self) -> usize {
        if self.top_k == 0 {
            DEFAULT_TOP_K
        } else {
            self.top_k
        }
    }

    /// Index name derived from the key prefix.
    ///
    /// The prefix and suffix are joined with `:`, so the default prefix
    /// `doc:` yields `doc::vector_idx`. Existing deployments depend on
    /// that exact name.
    #[must_use]
    pub fn index_name(&self) -> String {
        format!("{}:{}", self.effective_key_prefix(), INDEX_NAME_SUFFIX)
    }

    /// Connection URL with the `redis://` scheme applied if missing.
    #[must_use]
    pub fn normalized_url(&self) -> String {
        if self.url.contains("://") {
            self.url.clone()
        } else {
            format!("redis://{}", self.url)
        }
    }
}

/// Redis Stack vector store.
///
/// One instance serves both halves of the workload: [`Indexer::store`]
/// embeds and writes documents, [`Retriever::retrieve`] embeds a query
/// and runs a KNN search. The instance is `Clone` (connections are
/// multiplexed through a shared [`ConnectionManager`]) and safe to use
/// from multiple tasks concurrently once constructed.
///
/// Construction connects, pings, and creates the vector index if it does
/// not exist yet. An index that already exists is trusted as-is; its
/// schema is not revalidated, so changing the embedding dimension
/// requires dropping the index out of band.
#[derive(Clone)]
pub struct RedisVectorStore {
    index_name: String,
    key_prefix: String,
    dimension: usize,
    top_k: usize,
    min_score: f64,
    embedder: Arc<dyn Embedder>,
    connection_manager: ConnectionManager,
}

impl RedisVectorStore {
    /// Connect to Redis and ensure the vector index exists.
    ///
    /// Fails with [`Error::Config`] before any network traffic when the
    /// configuration is invalid, [`Error::Connection`] when Redis cannot
    /// be reached, and [`Error::Index`] when the index can neither be
    /// found nor created.
    pub async fn new(config: RedisVectorStoreConfig) -> Result<Self> {
        config.validate()?;

        // validate() guarantees the embedder is present
        let Some(embedder) = config.embedder.clone() else {
            return Err(Error::config("embedder not provided"));
        };

        let url = config.normalized_url();
        let mut connection_info = url
            .as_str()
            .into_connection_info()
            .map_err(|e| Error::config(format!("invalid Redis URL '{url}': {e}")))?;
        // RESP3 makes FT.SEARCH replies arrive map-shaped
        connection_info.redis.protocol = ProtocolVersion::RESP3;

        let client = redis::Client::open(connection_info)
            .map_err(|e| Error::connection(format!("failed to create Redis client: {e}")))?;
        let mut connection_manager = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::connection(format!("failed to create connection manager: {e}")))?;

        redis::cmd("PING")
            .query_async::<()>(&mut connection_manager)
            .await
            .map_err(|e| Error::connection(format!("ping failed: {e}")))?;

        let index_name = config.index_name();
        let key_prefix = config.effective_key_prefix();

        Self::ensure_index(
            &mut connection_manager,
            &index_name,
            &key_prefix,
            config.dimension,
        )
        .await?;

        Ok(Self {
            index_name,
            key_prefix,
            dimension: config.dimension,
            top_k: config.effective_top_k(),
            min_score: config.min_score,
            embedder,
            connection_manager,
        })
    }

    /// Get the index name this store targets.
    #[must_use]
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Get the key prefix used for document hashes.
    #[must_use]
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// Get the configured embedding dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Create the index if no index with this name exists yet.
    async fn ensure_index(
        conn: &mut ConnectionManager,
        index_name: &str,
        key_prefix: &str,
        dimension: usize,
    ) -> Result<()> {
        if Self::index_exists(conn, index_name).await? {
            debug!(index = index_name, "vector index already exists");
            return Ok(());
        }

        let schema = RedisIndexSchema::with_dimension(dimension);
        let mut cmd = redis::cmd("FT.CREATE");
        cmd.arg(index_name)
            .arg("ON")
            .arg("HASH")
            .arg("PREFIX")
            .arg("1")
            .arg(key_prefix)
            .arg("SCHEMA");
        for schema_arg in schema.to_redis_schema_args() {
            cmd.arg(schema_arg);
        }

        match cmd.query_async::<()>(conn).await {
            Ok(()) => {
                debug!(index = index_name, dimension, "vector index created");
            }
            // A concurrent constructor won the create race; same outcome.
            Err(e) if is_index_exists_error(&e) => {
                debug!(index = index_name, "vector index created concurrently");
            }
            Err(e) => {
                return Err(Error::index(format!(
                    "failed to create index {index_name}: {e}"
                )));
            }
        }

        if Self::index_exists(conn, index_name).await? {
            Ok(())
        } else {
            Err(Error::index(format!(
                "index {index_name} not found after creation"
            )))
        }
    }

    /// Check whether the index exists via `FT.INFO`.
    ///
    /// Only a server reply in the unknown-index vocabulary means absent;
    /// any other failure is an error, because an ambiguous existence
    /// check must not silently trigger index creation.
    async fn index_exists(conn: &mut ConnectionManager, index_name: &str) -> Result<bool> {
        let result: redis::RedisResult<redis::Value> = redis::cmd("FT.INFO")
            .arg(index_name)
            .query_async(conn)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_unknown_index_error(&e) => Ok(false),
            Err(e) => Err(Error::index(format!(
                "failed to check existence of index {index_name}: {e}"
            ))),
        }
    }

    /// Embed one document's content and check the vector length.
    async fn embed_document(&self, position: usize, content: &str) -> Result<Vec<f64>> {
        let texts = [content.to_string()];
        let mut vectors = self.embedder.embed_strings(&texts).await?;
        if vectors.len() != 1 {
            return Err(Error::embedding(format!(
                "expected 1 vector for document {position}, got {}",
                vectors.len()
            )));
        }
        let vector = vectors
            .pop()
            .ok_or_else(|| Error::embedding("embedder returned no vectors"))?;
        self.check_dimension(&vector)?;
        Ok(vector)
    }

    fn check_dimension(&self, vector: &[f64]) -> Result<()> {
        if vector.len() != self.dimension {
            return Err(Error::dimension_mismatch(self.dimension, vector.len()));
        }
        Ok(())
    }
}

#[async_trait]
impl Indexer for RedisVectorStore {
    /// Embed and write a batch of documents in one pipelined exchange.
    ///
    /// All-or-nothing from the caller's perspective: content validation,
    /// embedding, and dimension checks complete for the whole batch
    /// before anything is sent, and an error return means no ids are
    /// reported stored. Returns ids in input order; documents without an
    /// id get a generated UUID.
    async fn store(&self, docs: &[Document]) -> Result<Vec<String>> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }

        for (i, doc) in docs.iter().enumerate() {
            if doc.content.is_empty() {
                return Err(Error::invalid_input(format!(
                    "document {i} has empty content"
                )));
            }
        }

        let mut ids = Vec::with_capacity(docs.len());
        let mut pipeline = redis::pipe();

        for (i, doc) in docs.iter().enumerate() {
            let id = match &doc.id {
                Some(id) if !id.is_empty() => id.clone(),
                _ => Uuid::new_v4().to_string(),
            };

            let vector = self.embed_document(i, &doc.content).await?;
            let metadata_json = serde_json::to_string(&doc.metadata)?;
            let key = format!("{}{}", self.key_prefix, id);

            pipeline
                .hset_multiple(
                    &key,
                    &[
                        (CONTENT_FIELD, doc.content.clone().into_bytes()),
                        (METADATA_FIELD, metadata_json.into_bytes()),
                        (VECTOR_FIELD, encode_vector(&vector)),
                    ],
                )
                .ignore();

            ids.push(id);
        }

        let mut conn = self.connection_manager.clone();
        pipeline.query_async::<()>(&mut conn).await.map_err(|e| {
            Error::pipeline(format!("failed to write {} documents: {e}", docs.len()))
        })?;

        debug!(
            count = docs.len(),
            index = self.index_name.as_str(),
            "stored documents"
        );
        Ok(ids)
    }
}

#[async_trait]
impl Retriever for RedisVectorStore {
    /// Embed the query and run a KNN search.
    ///
    /// Returns at most `top_k` documents in ascending-distance order,
    /// each with merged metadata (stored metadata plus the computed
    /// `distance` entry) and a populated score; hits scoring below
    /// `min_score` are dropped. An empty query returns an empty list
    /// without touching the embedder or the network.
    async fn retrieve(&self, query: &str) -> Result<Vec<Document>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed_query(query).await?;
        self.check_dimension(&vector)?;
        let blob = encode_vector(&vector);

        let mut cmd = redis::cmd("FT.SEARCH");
        cmd.arg(&self.index_name)
            .arg(knn_query(self.top_k))
            .arg("PARAMS")
            .arg("2")
            .arg("BLOB")
            .arg(blob)
            .arg("RETURN")
            .arg("4")
            .arg(CONTENT_FIELD)
            .arg(METADATA_FIELD)
            .arg(DISTANCE_FIELD)
            .arg("id")
            .arg("SORTBY")
            .arg(DISTANCE_FIELD)
            .arg("DIALECT")
            .arg("2");

        let mut conn = self.connection_manager.clone();
        let reply: redis::Value = cmd.query_async(&mut conn).await.map_err(|e| {
            Error::index(format!("search on index {} failed: {e}", self.index_name))
        })?;

        let reply = SearchReply::try_from(reply)?;
        debug!(
            total = reply.total,
            hits = reply.hits.len(),
            index = self.index_name.as_str(),
            "search reply parsed"
        );

        let documents = documents_from_hits(reply.hits, &self.key_prefix, self.min_score)?;
        debug!(kept = documents.len(), "search results filtered");
        Ok(documents)
    }
}

/// Build the KNN query clause for `FT.SEARCH`.
fn knn_query(top_k: usize) -> String {
    format!("*=>[KNN {top_k} @{VECTOR_FIELD} $BLOB AS {DISTANCE_FIELD}]")
}

/// Map a cosine distance to a similarity score.
///
/// Cosine distances land in [0, 2]; tiny negative values appear through
/// float error on near-identical vectors and are mapped symmetrically,
/// so -0.1 scores the same as 0.1.
fn score_from_distance(distance: f64) -> f64 {
    if distance < 0.0 {
        1.0 + distance
    } else {
        1.0 - distance
    }
}

/// True when a server reply says the index does not exist.
///
/// RediSearch versions word this differently ("Unknown index name",
/// "no such index"); match the stable substrings, case-insensitive, and
/// only on actual server replies so network failures stay errors.
fn is_unknown_index_error(err: &redis::RedisError) -> bool {
    if err.kind() != redis::ErrorKind::ResponseError {
        return false;
    }
    let msg = err.to_string().to_lowercase();
    msg.contains("unknown index") || msg.contains("no such index")
}

/// True when a server reply says the index already exists.
fn is_index_exists_error(err: &redis::RedisError) -> bool {
    err.kind() == redis::ErrorKind::ResponseError
        && err
            .to_string()
            .to_lowercase()
            .contains("index already exists")
}

/// One hit from a KNN search, before score and filter post-processing.
#[derive(Debug, Clone, PartialEq)]
struct SearchHit {
    /// Full Redis key, prefix included
    id: String,
    /// Stored document text
    content: String,
    /// Distance reported by the index
    distance: f64,
    /// Raw metadata JSON string, if the hash had one
    metadata: Option<String>,
}

/// Typed view of an `FT.SEARCH` RESP3 reply.
///
/// All shape checking happens in the one [`TryFrom`] pass; everything
/// downstream works with plain fields.
#[derive(Debug, Clone, PartialEq)]
struct SearchReply {
    total: i64,
    hits: Vec<SearchHit>,
}

impl TryFrom<redis::Value> for SearchReply {
    type Error = Error;

    fn try_from(value: redis::Value) -> Result<Self> {
        let entries = match value {
            redis::Value::Map(entries) => entries,
            other => {
                return Err(Error::parse(format!(
                    "search reply: expected map, got {}",
                    value_type_name(&other)
                )));
            }
        };

        let mut total: Option<i64> = None;
        let mut hits = Vec::new();

        for (key, val) in entries {
            let Some(key) = value_as_string(&key) else {
                continue;
            };
            match key.as_str() {
                "total_results" => total = Some(parse_total(&val)?),
                "results" => hits = parse_hits(val)?,
                _ => {}
            }
        }

        let total = total.ok_or_else(|| Error::parse("search reply: missing total_results"))?;
        Ok(SearchReply { total, hits })
    }
}

/// `total_results` arrives as an integer on most servers and as a double
/// on some; normalize to an integer.
fn parse_total(value: &redis::Value) -> Result<i64> {
    match value {
        redis::Value::Int(n) => Ok(*n),
        redis::Value::Double(d) => Ok(*d as i64),
        other => Err(Error::parse(format!(
            "total_results: expected integer, got {}",
            value_type_name(other)
        ))),
    }
}

fn parse_hits(value: redis::Value) -> Result<Vec<SearchHit>> {
    let rows = match value {
        redis::Value::Array(rows) => rows,
        other => {
            return Err(Error::parse(format!(
                "results: expected array, got {}",
                value_type_name(&other)
            )));
        }
    };
    rows.into_iter().map(parse_hit).collect()
}

fn parse_hit(value: redis::Value) -> Result<SearchHit> {
    let entries = match value {
        redis::Value::Map(entries) => entries,
        other => {
            return Err(Error::parse(format!(
                "result row: expected map, got {}",
                value_type_name(&other)
            )));
        }
    };

    let mut id = None;
    let mut content = None;
    let mut distance = None;
    let mut metadata = None;

    for (key, val) in entries {
        let Some(key) = value_as_string(&key) else {
            continue;
        };
        match key.as_str() {
            "id" => {
                id = Some(value_as_string(&val).ok_or_else(|| {
                    Error::parse(format!(
                        "result id: expected string, got {}",
                        value_type_name(&val)
                    ))
                })?);
            }
            "extra_attributes" => {
                let attrs = match val {
                    redis::Value::Map(attrs) => attrs,
                    other => {
                        return Err(Error::parse(format!(
                            "extra_attributes: expected map, got {}",
                            value_type_name(&other)
                        )));
                    }
                };
                for (attr_key, attr_val) in attrs {
                    let Some(attr_key) = value_as_string(&attr_key) else {
                        continue;
                    };
                    match attr_key.as_str() {
                        CONTENT_FIELD => content = value_as_string(&attr_val),
                        DISTANCE_FIELD => distance = Some(parse_distance(&attr_val)?),
                        METADATA_FIELD => metadata = value_as_string(&attr_val),
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    let id = id.ok_or_else(|| Error::parse("result row: missing id"))?;
    let content =
        content.ok_or_else(|| Error::parse(format!("result {id}: missing content attribute")))?;
    let distance =
        distance.ok_or_else(|| Error::parse(format!("result {id}: missing distance attribute")))?;

    Ok(SearchHit {
        id,
        content,
        distance,
        metadata,
    })
}

/// The index reports distance as a numeric string under DIALECT 2, but
/// some server versions type it; accept both.
fn parse_distance(value: &redis::Value) -> Result<f64> {
    match value {
        redis::Value::Double(d) => Ok(*d),
        redis::Value::Int(n) => Ok(*n as f64),
        other => {
            let raw = value_as_string(other).ok_or_else(|| {
                Error::parse(format!(
                    "distance: expected number or string, got {}",
                    value_type_name(other)
                ))
            })?;
            raw.parse::<f64>()
                .map_err(|e| Error::parse(format!("distance '{raw}': {e}")))
        }
    }
}

fn value_as_string(value: &redis::Value) -> Option<String> {
    match value {
        redis::Value::BulkString(bytes) => Some(String::from_utf8_lossy(bytes).to_string()),
        redis::Value::SimpleString(s) => Some(s.clone()),
        _ => None,
    }
}

fn value_type_name(value: &redis::Value) -> &'static str {
    match value {
        redis::Value::Nil => "nil",
        redis::Value::Int(_) => "integer",
        redis::Value::Double(_) => "double",
        redis::Value::BulkString(_) => "bulk string",
        redis::Value::SimpleString(_) => "simple string",
        redis::Value::Array(_) => "array",
        redis::Value::Map(_) => "map",
        redis::Value::Boolean(_) => "boolean",
        redis::Value::Okay => "ok",
        _ => "other",
    }
}

/// Turn a parsed hit into a returned [`Document`].
///
/// Strips the key prefix from the id, merges stored metadata, then sets
/// the computed `distance` entry (the computed value wins over a stored
/// key of that name) and the score.
fn document_from_hit(hit: SearchHit, key_prefix: &str) -> Result<Document> {
    let id = hit
        .id
        .strip_prefix(key_prefix)
        .unwrap_or(&hit.id)
        .to_string();

    let mut metadata: HashMap<String, serde_json::Value> = match hit.metadata.as_deref() {
        None | Some("") => HashMap::new(),
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| Error::parse(format!("result {id}: metadata is not valid JSON: {e}")))?,
    };
    metadata.insert(DISTANCE_FIELD.to_string(), serde_json::json!(hit.distance));

    Ok(Document {
        id: Some(id),
        content: hit.content,
        metadata,
        score: Some(score_from_distance(hit.distance)),
    })
}

/// Post-process parsed hits: build documents and apply the score floor.
///
/// A score exactly equal to `min_score` is kept; only strictly lower
/// scores are dropped. Order is preserved, the index already sorted by
/// distance.
fn documents_from_hits(
    hits: Vec<SearchHit>,
    key_prefix: &str,
    min_score: f64,
) -> Result<Vec<Document>> {
    let mut documents = Vec::with_capacity(hits.len());
    for hit in hits {
        let doc = document_from_hit(hit, key_prefix)?;
        if doc.score.is_some_and(|score| score < min_score) {
            continue;
        }
        documents.push(doc);
    }
    Ok(documents)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Embedder stub for configuration tests; never called.
    struct NoopEmbedder;

    #[async_trait]
    impl Embedder for NoopEmbedder {
        async fn embed_strings(&self, texts: &[String]) -> Result<Vec<Vec<f64>>> {
            Ok(texts.iter().map(|_| vec![0.0; 4]).collect())
        }
    }

    fn test_config() -> RedisVectorStoreConfig {
        RedisVectorStoreConfig::new("redis://localhost:6379", Arc::new(NoopEmbedder), 4)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ==================== config tests ====================

    #[test]
    fn test_config_defaults() {
        let config = test_config();
        assert_eq!(config.key_prefix, "doc:");
        assert_eq!(config.top_k, 3);
        assert!(approx(config.min_score, 0.0));
        assert_eq!(config.dimension, 4);
    }

    #[test]
    fn test_config_builders() {
        let config = test_config()
            .with_key_prefix("kb:")
            .with_top_k(7)
            .with_min_score(0.5);
        assert_eq!(config.key_prefix, "kb:");
        assert_eq!(config.top_k, 7);
        assert!(approx(config.min_score, 0.5));
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_embedder() {
        let config = RedisVectorStoreConfig {
            embedder: None,
            ..test_config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("embedder")));
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let config = RedisVectorStoreConfig {
            dimension: 0,
            ..test_config()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("dimension")));
    }

    #[test]
    fn test_effective_top_k_default() {
        let config = test_config().with_top_k(0);
        assert_eq!(config.effective_top_k(), 3);
        assert_eq!(test_config().with_top_k(9).effective_top_k(), 9);
    }

    #[test]
    fn test_effective_key_prefix_default() {
        let config = test_config().with_key_prefix("");
        assert_eq!(config.effective_key_prefix(), "doc:");
        assert_eq!(
            test_config().with_key_prefix("kb:").effective_key_prefix(),
            "kb:"
        );
    }

    #[test]
    fn test_index_name_default_prefix() {
        // Prefix and suffix joined with ':' - the double colon is
        // deliberate, existing indexes carry this name.
        assert_eq!(test_config().index_name(), "doc::vector_idx");
    }

    #[test]
    fn test_index_name_custom_prefix() {
        let config = test_config().with_key_prefix("kb:");
        assert_eq!(config.index_name(), "kb::vector_idx");
    }

    #[test]
    fn test_normalized_url_adds_scheme() {
        let config = RedisVectorStoreConfig {
            url: "localhost:6379".to_string(),
            ..test_config()
        };
        assert_eq!(config.normalized_url(), "redis://localhost:6379");
    }

    #[test]
    fn test_normalized_url_keeps_scheme() {
        assert_eq!(test_config().normalized_url(), "redis://localhost:6379");
        let tls = RedisVectorStoreConfig {
            url: "rediss://cache:6380".to_string(),
            ..test_config()
        };
        assert_eq!(tls.normalized_url(), "rediss://cache:6380");
    }

    // ==================== error classification tests ====================

    fn response_error(detail: &str) -> redis::RedisError {
        redis::RedisError::from((
            redis::ErrorKind::ResponseError,
            "An error was signalled by the server",
            detail.to_string(),
        ))
    }

    #[test]
    fn test_unknown_index_vocabulary() {
        assert!(is_unknown_index_error(&response_error("Unknown index name")));
        assert!(is_unknown_index_error(&response_error("no such index")));
        assert!(is_unknown_index_error(&response_error("Unknown Index name")));
    }

    #[test]
    fn test_unknown_index_other_response_errors() {
        assert!(!is_unknown_index_error(&response_error("syntax error")));
        assert!(!is_unknown_index_error(&response_error(
            "Index already exists"
        )));
    }

    #[test]
    fn test_unknown_index_requires_response_error() {
        // A dropped connection whose message happens to match must stay
        // an error, not become "index absent".
        let io_err = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "unknown index",
        ));
        assert!(!is_unknown_index_error(&io_err));
    }

    #[test]
    fn test_index_exists_vocabulary() {
        assert!(is_index_exists_error(&response_error(
            "Index already exists"
        )));
        assert!(!is_index_exists_error(&response_error("Unknown index name")));
        let io_err = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "Index already exists",
        ));
        assert!(!is_index_exists_error(&io_err));
    }

    // ==================== score tests ====================

    #[test]
    fn test_score_from_distance_zero() {
        assert!(approx(score_from_distance(0.0), 1.0));
    }

    #[test]
    fn test_score_from_distance_positive() {
        assert!(approx(score_from_distance(0.2), 0.8));
        assert!(approx(score_from_distance(1.0), 0.0));
        assert!(approx(score_from_distance(1.5), -0.5));
    }

    #[test]
    fn test_score_from_distance_negative() {
        // Float-error negatives mirror their positive counterparts.
        assert!(approx(score_from_distance(-0.1), 0.9));
        assert!(approx(score_from_distance(-0.001), 0.999));
    }

    // ==================== knn query tests ====================

    #[test]
    fn test_knn_query_format() {
        assert_eq!(knn_query(3), "*=>[KNN 3 @content_vector $BLOB AS distance]");
        assert_eq!(
            knn_query(10),
            "*=>[KNN 10 @content_vector $BLOB AS distance]"
        );
    }

    // ==================== reply parsing tests ====================

    fn bulk(s: &str) -> redis::Value {
        redis::Value::BulkString(s.as_bytes().to_vec())
    }

    fn hit_value(id: &str, content: &str, distance: &str, metadata: Option<&str>) -> redis::Value {
        let mut attrs = vec![
            (bulk(CONTENT_FIELD), bulk(content)),
            (bulk(DISTANCE_FIELD), bulk(distance)),
        ];
        if let Some(raw) = metadata {
            attrs.push((bulk(METADATA_FIELD), bulk(raw)));
        }
        redis::Value::Map(vec![
            (bulk("id"), bulk(id)),
            (bulk("extra_attributes"), redis::Value::Map(attrs)),
        ])
    }

    fn reply_value(total: redis::Value, hits: Vec<redis::Value>) -> redis::Value {
        redis::Value::Map(vec![
            (bulk("total_results"), total),
            (bulk("format"), bulk("STRING")),
            (bulk("results"), redis::Value::Array(hits)),
        ])
    }

    #[test]
    fn test_parse_reply_basic() {
        let value = reply_value(
            redis::Value::Int(2),
            vec![
                hit_value("doc:a", "first", "0.1", Some(r#"{"source":"x"}"#)),
                hit_value("doc:b", "second", "0.3", None),
            ],
        );

        let reply = SearchReply::try_from(value).unwrap();
        assert_eq!(reply.total, 2);
        assert_eq!(reply.hits.len(), 2);
        assert_eq!(reply.hits[0].id, "doc:a");
        assert_eq!(reply.hits[0].content, "first");
        assert!(approx(reply.hits[0].distance, 0.1));
        assert_eq!(reply.hits[0].metadata.as_deref(), Some(r#"{"source":"x"}"#));
        assert_eq!(reply.hits[1].id, "doc:b");
        assert!(reply.hits[1].metadata.is_none());
    }

    #[test]
    fn test_parse_reply_double_total() {
        let value = reply_value(redis::Value::Double(2.0), vec![]);
        let reply = SearchReply::try_from(value).unwrap();
        assert_eq!(reply.total, 2);
    }

    #[test]
    fn test_parse_reply_zero_results() {
        let value = reply_value(redis::Value::Int(0), vec![]);
        let reply = SearchReply::try_from(value).unwrap();
        assert_eq!(reply.total, 0);
        assert!(reply.hits.is_empty());
    }

    #[test]
    fn test_parse_reply_rejects_non_map() {
        let err = SearchReply::try_from(redis::Value::Array(vec![])).unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("expected map, got array")));
    }

    #[test]
    fn test_parse_reply_missing_total() {
        let value = redis::Value::Map(vec![(bulk("results"), redis::Value::Array(vec![]))]);
        let err = SearchReply::try_from(value).unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("total_results")));
    }

    #[test]
    fn test_parse_reply_bad_total_type() {
        let value = reply_value(bulk("2"), vec![]);
        let err = SearchReply::try_from(value).unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("total_results")));
    }

    #[test]
    fn test_parse_hit_missing_id() {
        let row = redis::Value::Map(vec![(
            bulk("extra_attributes"),
            redis::Value::Map(vec![
                (bulk(CONTENT_FIELD), bulk("text")),
                (bulk(DISTANCE_FIELD), bulk("0.1")),
            ]),
        )]);
        let err = SearchReply::try_from(reply_value(redis::Value::Int(1), vec![row])).unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("missing id")));
    }

    #[test]
    fn test_parse_hit_missing_content() {
        let row = redis::Value::Map(vec![
            (bulk("id"), bulk("doc:x")),
            (
                bulk("extra_attributes"),
                redis::Value::Map(vec![(bulk(DISTANCE_FIELD), bulk("0.1"))]),
            ),
        ]);
        let err = SearchReply::try_from(reply_value(redis::Value::Int(1), vec![row])).unwrap_err();
        assert!(
            matches!(err, Error::Parse(msg) if msg.contains("doc:x") && msg.contains("content"))
        );
    }

    #[test]
    fn test_parse_hit_missing_distance() {
        let row = redis::Value::Map(vec![
            (bulk("id"), bulk("doc:x")),
            (
                bulk("extra_attributes"),
                redis::Value::Map(vec![(bulk(CONTENT_FIELD), bulk("text"))]),
            ),
        ]);
        let err = SearchReply::try_from(reply_value(redis::Value::Int(1), vec![row])).unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("distance")));
    }

    #[test]
    fn test_parse_hit_typed_distance() {
        let row = redis::Value::Map(vec![
            (bulk("id"), bulk("doc:x")),
            (
                bulk("extra_attributes"),
                redis::Value::Map(vec![
                    (bulk(CONTENT_FIELD), bulk("text")),
                    (bulk(DISTANCE_FIELD), redis::Value::Double(0.25)),
                ]),
            ),
        ]);
        let reply = SearchReply::try_from(reply_value(redis::Value::Int(1), vec![row])).unwrap();
        assert!(approx(reply.hits[0].distance, 0.25));
    }

    #[test]
    fn test_parse_hit_bad_distance_string() {
        let row = hit_value("doc:x", "text", "not-a-number", None);
        let err = SearchReply::try_from(reply_value(redis::Value::Int(1), vec![row])).unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("not-a-number")));
    }

    // ==================== document assembly tests ====================

    fn hit(id: &str, distance: f64, metadata: Option<&str>) -> SearchHit {
        SearchHit {
            id: id.to_string(),
            content: "text".to_string(),
            distance,
            metadata: metadata.map(str::to_string),
        }
    }

    #[test]
    fn test_document_strips_prefix() {
        let doc = document_from_hit(hit("doc:abc", 0.2, None), "doc:").unwrap();
        assert_eq!(doc.id.as_deref(), Some("abc"));
    }

    #[test]
    fn test_document_keeps_unprefixed_id() {
        let doc = document_from_hit(hit("elsewhere:abc", 0.2, None), "doc:").unwrap();
        assert_eq!(doc.id.as_deref(), Some("elsewhere:abc"));
    }

    #[test]
    fn test_document_score_and_distance() {
        let doc = document_from_hit(hit("doc:a", 0.2, None), "doc:").unwrap();
        assert!(approx(doc.score.unwrap(), 0.8));
        let distance = doc.get_metadata("distance").unwrap().as_f64().unwrap();
        assert!(approx(distance, 0.2));
    }

    #[test]
    fn test_document_merges_stored_metadata() {
        let doc = document_from_hit(
            hit("doc:a", 0.1, Some(r#"{"source":"kb","page":3}"#)),
            "doc:",
        )
        .unwrap();
        assert_eq!(doc.get_metadata("source"), Some(&serde_json::json!("kb")));
        assert_eq!(doc.get_metadata("page"), Some(&serde_json::json!(3)));
        assert!(doc.get_metadata("distance").is_some());
    }

    #[test]
    fn test_document_computed_distance_wins() {
        let doc = document_from_hit(hit("doc:a", 0.1, Some(r#"{"distance":99}"#)), "doc:").unwrap();
        let distance = doc.get_metadata("distance").unwrap().as_f64().unwrap();
        assert!(approx(distance, 0.1));
    }

    #[test]
    fn test_document_empty_metadata_tolerated() {
        let doc = document_from_hit(hit("doc:a", 0.1, Some("")), "doc:").unwrap();
        assert_eq!(doc.metadata.len(), 1);
        assert!(doc.get_metadata("distance").is_some());
    }

    #[test]
    fn test_document_malformed_metadata_errors() {
        let err = document_from_hit(hit("doc:a", 0.1, Some("{broken")), "doc:").unwrap_err();
        assert!(matches!(err, Error::Parse(msg) if msg.contains("a") && msg.contains("JSON")));
    }

    // ==================== min-score filter tests ====================

    #[test]
    fn test_filter_drops_below_min_score() {
        // distances 0.1 / 0.3 / 0.6 score 0.9 / 0.7 / 0.4
        let hits = vec![
            hit("doc:a", 0.1, None),
            hit("doc:b", 0.3, None),
            hit("doc:c", 0.6, None),
        ];
        let docs = documents_from_hits(hits, "doc:", 0.5).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id.as_deref(), Some("a"));
        assert_eq!(docs[1].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_filter_keeps_equal_score() {
        // distance 0.5 scores exactly 0.5
        let hits = vec![hit("doc:a", 0.5, None)];
        let docs = documents_from_hits(hits, "doc:", 0.5).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_filter_zero_floor_drops_negative_scores() {
        // distance 1.5 scores -0.5
        let hits = vec![hit("doc:a", 1.5, None), hit("doc:b", 0.9, None)];
        let docs = documents_from_hits(hits, "doc:", 0.0).unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let hits = vec![
            hit("doc:c", 0.3, None),
            hit("doc:a", 0.1, None),
            hit("doc:b", 0.2, None),
        ];
        let docs = documents_from_hits(hits, "doc:", 0.0).unwrap();
        let ids: Vec<_> = docs.iter().filter_map(|d| d.id.as_deref()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }
}
