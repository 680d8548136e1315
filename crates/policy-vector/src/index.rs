//! Flat (brute-force) index.
//!
//! Vectors are stored row-major in one contiguous buffer. A search scans
//! every row, so results are exact and ties are broken by insertion order.

use crate::distance::squared_l2;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use tracing::{debug, trace};

/// A single search hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the vector in insertion order.
    pub id: usize,
    /// Squared Euclidean distance to the query.
    pub distance: f32,
}

/// Exact nearest-neighbor index using squared Euclidean distance.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    data: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::InvalidVector("Dimensions must be > 0".to_string()));
        }

        Ok(Self {
            dimensions,
            data: Vec::new(),
        })
    }

    /// Build an index from a batch of vectors.
    ///
    /// The first vector's dimensionality is authoritative; every other
    /// vector must match it.
    pub fn from_vectors(vectors: &[Vec<f32>]) -> Result<Self> {
        let first = vectors.first().ok_or_else(|| {
            Error::InvalidVector("Cannot build an index from zero vectors".to_string())
        })?;

        let mut index = Self::new(first.len())?;
        index.add(vectors)?;
        Ok(index)
    }

    /// Rebuild an index from its raw row-major buffer.
    pub(crate) fn from_raw(dimensions: usize, data: Vec<f32>) -> Result<Self> {
        if dimensions == 0 {
            return Err(Error::Persistence("Stored index has zero dimensions".to_string()));
        }
        if data.len() % dimensions != 0 {
            return Err(Error::Persistence(format!(
                "Stored buffer of {} floats is not a multiple of {} dimensions",
                data.len(),
                dimensions
            )));
        }

        Ok(Self { dimensions, data })
    }

    /// Get the vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Get the number of vectors in the index.
    pub fn len(&self) -> usize {
        self.data.len() / self.dimensions
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw row-major storage.
    pub(crate) fn raw(&self) -> &[f32] {
        &self.data
    }

    /// Get a stored vector by position.
    pub fn vector(&self, id: usize) -> Option<&[f32]> {
        let start = id.checked_mul(self.dimensions)?;
        self.data.get(start..start + self.dimensions)
    }

    /// Append vectors to the index.
    ///
    /// The batch is validated up front, so a failing batch leaves the index
    /// unchanged. Returns the number of vectors added.
    pub fn add(&mut self, vectors: &[Vec<f32>]) -> Result<usize> {
        for (i, vector) in vectors.iter().enumerate() {
            if vector.len() != self.dimensions {
                return Err(Error::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                });
            }

            if vector.iter().any(|v| v.is_nan() || v.is_infinite()) {
                return Err(Error::InvalidVector(format!(
                    "Vector at position {} contains NaN or Inf",
                    self.len() + i
                )));
            }
        }

        self.data.reserve(vectors.len() * self.dimensions);
        for vector in vectors {
            self.data.extend_from_slice(vector);
        }

        debug!(added = vectors.len(), total = self.len(), "Added vectors");
        Ok(vectors.len())
    }

    /// Find the `k` nearest vectors to `query`, closest first.
    ///
    /// When `k` exceeds the number of stored vectors, every stored vector is
    /// returned; the result is never padded.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(id, row)| Neighbor {
                id,
                distance: squared_l2(row, query),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        neighbors.truncate(k);

        trace!(k, returned = neighbors.len(), "Flat search");
        Ok(neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FlatIndex {
        FlatIndex::from_vectors(&[
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 5.0, 0.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(FlatIndex::new(0), Err(Error::InvalidVector(_))));
    }

    #[test]
    fn test_from_vectors_requires_input() {
        assert!(FlatIndex::from_vectors(&[]).is_err());
    }

    #[test]
    fn test_first_vector_dimension_is_authoritative() {
        let err = FlatIndex::from_vectors(&[vec![1.0, 2.0], vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_failed_add_leaves_index_unchanged() {
        let mut index = sample();
        let result = index.add(&[vec![2.0, 2.0, 2.0], vec![f32::NAN, 0.0, 0.0]]);
        assert!(result.is_err());
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_exact_match_has_zero_distance() {
        let index = sample();
        for id in 0..index.len() {
            let query = index.vector(id).unwrap().to_vec();
            let hits = index.search(&query, 1).unwrap();
            assert_eq!(hits[0].id, id);
            assert_eq!(hits[0].distance, 0.0);
        }
    }

    #[test]
    fn test_results_ascending() {
        let index = sample();
        let hits = index.search(&[0.1, 0.0, 0.0], 4).unwrap();
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![0, 1, 3, 2]);
        assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_k_larger_than_index_is_not_padded() {
        let index = sample();
        let hits = index.search(&[0.0, 0.0, 0.0], 10).unwrap();
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn test_ties_broken_by_position() {
        let index = FlatIndex::from_vectors(&[vec![1.0], vec![-1.0], vec![1.0]]).unwrap();
        let hits = index.search(&[0.0], 3).unwrap();
        assert_eq!(hits.iter().map(|h| h.id).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_query_dimension_checked() {
        let index = sample();
        assert!(matches!(
            index.search(&[0.0, 0.0], 1),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_vector_out_of_range() {
        let index = sample();
        assert!(index.vector(4).is_none());
        assert!(index.vector(usize::MAX).is_none());
    }
}
