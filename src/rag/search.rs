//! Nearest-chunk retrieval.

use crate::rag::indexer::ChunkIndex;
use crate::types::Result;
use std::collections::HashSet;

/// Ranked hits, closest first. `distances[i]` belongs to `indices[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    pub indices: Vec<usize>,
    /// Squared Euclidean distances.
    pub distances: Vec<f32>,
}

impl SearchHits {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Texts of the hits in rank order, duplicates included.
    pub fn texts<'a>(&self, index: &'a ChunkIndex) -> Vec<&'a str> {
        self.indices.iter().filter_map(|&i| index.text(i)).collect()
    }

    /// Texts of the hits with repeated texts removed, keeping the first
    /// (closest) occurrence of each.
    pub fn unique_texts<'a>(&self, index: &'a ChunkIndex) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.texts(index)
            .into_iter()
            .filter(|text| seen.insert(*text))
            .collect()
    }
}

/// Return the `top_k` chunks closest to `query`.
///
/// Fewer than `top_k` hits come back when the index is smaller.
pub fn search(index: &ChunkIndex, query: &[f32], top_k: usize) -> Result<SearchHits> {
    let neighbors = index.flat().search(query, top_k)?;

    Ok(SearchHits {
        indices: neighbors.iter().map(|n| n.id).collect(),
        distances: neighbors.iter().map(|n| n.distance).collect(),
    })
}
