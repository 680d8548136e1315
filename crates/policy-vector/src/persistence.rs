//! Persistence layer for policy-vector.
//!
//! An index is written as a single `postcard`-encoded file holding the
//! dimensionality and the row-major vector buffer. There is no version
//! header or checksum.

use crate::error::{Error, Result};
use crate::index::FlatIndex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct StoredIndexRef<'a> {
    dimensions: usize,
    vectors: &'a [f32],
}

#[derive(Deserialize)]
struct StoredIndex {
    dimensions: usize,
    vectors: Vec<f32>,
}

/// Save an index to `path`, replacing any existing file.
pub fn save_index(index: &FlatIndex, path: &Path) -> Result<()> {
    let stored = StoredIndexRef {
        dimensions: index.dimensions(),
        vectors: index.raw(),
    };

    let bytes = postcard::to_allocvec(&stored)
        .map_err(|e| Error::Persistence(format!("Failed to encode index: {}", e)))?;
    fs::write(path, bytes)?;

    info!(path = ?path, vectors = index.len(), "Saved index");
    Ok(())
}

/// Load an index previously written by [`save_index`].
pub fn load_index(path: &Path) -> Result<FlatIndex> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }

    let bytes = fs::read(path)?;
    let stored: StoredIndex = postcard::from_bytes(&bytes)
        .map_err(|e| Error::Persistence(format!("Failed to decode index: {}", e)))?;

    let index = FlatIndex::from_raw(stored.dimensions, stored.vectors)?;
    info!(path = ?path, vectors = index.len(), "Loaded index");
    Ok(index)
}
