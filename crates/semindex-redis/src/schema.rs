//! Index schema declaration and `FT.CREATE` argument construction.
//!
//! The store creates one fixed schema: two TEXT fields (`content`,
//! `metadata`) and one FLAT FLOAT32 vector field (`content_vector`). The
//! types here exist so the argument lists are built and tested in one
//! place; the exact argument order is wire-level contract.

use crate::constants::{CONTENT_FIELD, METADATA_FIELD, VECTOR_FIELD};

/// Distance metric for vector similarity search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceMetric {
    /// Cosine distance (1 - cosine similarity). The score formula in
    /// search assumes this metric.
    #[default]
    Cosine,
    /// L2 Euclidean distance
    L2,
    /// Inner product
    IP,
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceMetric::Cosine => write!(f, "COSINE"),
            DistanceMetric::L2 => write!(f, "L2"),
            DistanceMetric::IP => write!(f, "IP"),
        }
    }
}

/// Storage type for vector components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorDataType {
    /// 32-bit floating point (default); what
    /// [`encode_vector`](crate::utils::encode_vector) produces
    #[default]
    Float32,
    /// 64-bit floating point
    Float64,
}

impl std::fmt::Display for VectorDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorDataType::Float32 => write!(f, "FLOAT32"),
            VectorDataType::Float64 => write!(f, "FLOAT64"),
        }
    }
}

/// A TEXT field in the index schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextField {
    /// Hash field name
    pub name: String,
}

impl TextField {
    /// Create a TEXT field with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Arguments this field contributes to the `SCHEMA` clause.
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        vec![self.name.clone(), "TEXT".to_string()]
    }
}

/// A FLAT (exact search) vector field in the index schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatVectorField {
    /// Hash field name
    pub name: String,
    /// Vector dimensionality
    pub dims: usize,
    /// Component storage type
    pub datatype: VectorDataType,
    /// Distance metric
    pub distance_metric: DistanceMetric,
}

impl FlatVectorField {
    /// Create a FLAT vector field with default datatype and metric.
    pub fn new(name: impl Into<String>, dims: usize) -> Self {
        Self {
            name: name.into(),
            dims,
            datatype: VectorDataType::default(),
            distance_metric: DistanceMetric::default(),
        }
    }

    /// Arguments this field contributes to the `SCHEMA` clause.
    ///
    /// The count after `FLAT` is the length of the attribute list that
    /// follows it, per the `FT.CREATE` grammar.
    #[must_use]
    pub fn to_redis_args(&self) -> Vec<String> {
        let attrs = [
            "TYPE".to_string(),
            self.datatype.to_string(),
            "DIM".to_string(),
            self.dims.to_string(),
            "DISTANCE_METRIC".to_string(),
            self.distance_metric.to_string(),
        ];

        let mut args = vec![
            self.name.clone(),
            "VECTOR".to_string(),
            "FLAT".to_string(),
            attrs.len().to_string(),
        ];
        args.extend(attrs);
        args
    }
}

/// The full schema this store creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisIndexSchema {
    /// Document text, indexed as TEXT
    pub content: TextField,
    /// Metadata JSON string, indexed as TEXT
    pub metadata: TextField,
    /// Embedding blob, indexed as a FLAT vector
    pub vector: FlatVectorField,
}

impl RedisIndexSchema {
    /// Schema with the standard field names and the given dimension.
    #[must_use]
    pub fn with_dimension(dims: usize) -> Self {
        Self {
            content: TextField::new(CONTENT_FIELD),
            metadata: TextField::new(METADATA_FIELD),
            vector: FlatVectorField::new(VECTOR_FIELD, dims),
        }
    }

    /// Flatten into the argument list that follows `SCHEMA` in `FT.CREATE`.
    #[must_use]
    pub fn to_redis_schema_args(&self) -> Vec<String> {
        let mut args = self.content.to_redis_args();
        args.extend(self.metadata.to_redis_args());
        args.extend(self.vector.to_redis_args());
        args
    }
}
