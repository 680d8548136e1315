//! # policy-vector
//!
//! An exact, brute-force nearest-neighbor index over dense `f32` vectors.
//!
//! Every stored vector is compared against the query with the squared
//! Euclidean (L2) distance, so results are exact rather than approximate.
//! This is adequate for collections in the low thousands of vectors, which
//! is what a single ingested document produces.
//!
//! ## Quick Start
//!
//! ```rust
//! use policy_vector::FlatIndex;
//!
//! let mut index = FlatIndex::new(3)?;
//! index.add(&[vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]])?;
//!
//! let hits = index.search(&[0.9, 1.0, 1.1], 1)?;
//! assert_eq!(hits[0].id, 1);
//! # Ok::<(), policy_vector::Error>(())
//! ```
//!
//! ## Positional ids
//!
//! Vectors are identified by insertion position (`0..len`). Callers keep a
//! parallel list of payloads (for example chunk texts) and use the returned
//! ids to index into it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod distance;
pub mod error;
pub mod index;
pub mod persistence;

pub use distance::squared_l2;
pub use error::{Error, Result};
pub use index::{FlatIndex, Neighbor};
pub use persistence::{load_index, save_index};
