//! Vector byte codec for Redis storage.
//!
//! RediSearch expects FLOAT32 vectors as raw little-endian bytes, 4 bytes
//! per component, no header. Embedders hand the store `f64` components;
//! encoding narrows them to `f32` on the way in.

use semindex::error::{Error, Result};

/// Encode an embedding as bytes for Redis storage.
///
/// Each component is narrowed to `f32` and packed little-endian. The
/// narrowing is lossy and deliberate: the index schema declares
/// `TYPE FLOAT32`.
#[must_use]
pub fn encode_vector(vector: &[f64]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        bytes.extend_from_slice(&(*value as f32).to_le_bytes());
    }
    bytes
}

/// Decode bytes back into a vector of `f32` values.
///
/// Inverse of [`encode_vector`] up to the f64-to-f32 narrowing. Errors
/// when the byte length is not a multiple of 4.
pub fn decode_vector(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(Error::parse(format!(
            "vector blob length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}
