//! Chunk index: flat vectors paired positionally with chunk texts.

use crate::types::{AppError, Result};
use policy_vector::{load_index, save_index, FlatIndex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default base name of the persisted index pair.
pub const DEFAULT_INDEX_BASE: &str = "policy_index";

/// Locations of the persisted index and its texts file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPaths {
    pub index: PathBuf,
    pub texts: PathBuf,
}

impl IndexPaths {
    /// `<dir>/<base>.index` and `<dir>/<base>_texts.json`.
    pub fn for_base(dir: &Path, base: &str) -> Self {
        Self {
            index: dir.join(format!("{}.index", base)),
            texts: dir.join(format!("{}_texts.json", base)),
        }
    }
}

/// Flat L2 index whose row `i` is the embedding of `texts[i]`.
#[derive(Debug, Clone)]
pub struct ChunkIndex {
    index: FlatIndex,
    texts: Vec<String>,
}

impl ChunkIndex {
    /// Build an index from embeddings and the texts they were computed from.
    pub fn build(vectors: &[Vec<f32>], texts: Vec<String>) -> Result<Self> {
        if vectors.len() != texts.len() {
            return Err(AppError::Index(format!(
                "Got {} vectors for {} texts",
                vectors.len(),
                texts.len()
            )));
        }

        let index = FlatIndex::from_vectors(vectors)?;
        Ok(Self { index, texts })
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn text(&self, position: usize) -> Option<&str> {
        self.texts.get(position).map(String::as_str)
    }

    pub(crate) fn flat(&self) -> &FlatIndex {
        &self.index
    }

    /// Write the index binary, then the texts as a JSON array.
    ///
    /// The two writes are independent; a failure in between leaves only the
    /// index file behind.
    pub fn persist(&self, paths: &IndexPaths) -> Result<()> {
        if let Some(parent) = paths.index.parent() {
            fs::create_dir_all(parent)?;
        }

        save_index(&self.index, &paths.index)?;
        fs::write(&paths.texts, serde_json::to_string_pretty(&self.texts)?)?;

        info!(
            index = %paths.index.display(),
            texts = %paths.texts.display(),
            vectors = self.len(),
            "Persisted chunk index"
        );
        Ok(())
    }

    /// Load a persisted pair. Either file missing is a not-found error.
    pub fn load(paths: &IndexPaths) -> Result<Self> {
        let index = load_index(&paths.index)?;

        if !paths.texts.exists() {
            return Err(AppError::NotFound(format!(
                "Index or texts file not found ({}). Run the ingestion first.",
                paths.texts.display()
            )));
        }
        let texts: Vec<String> = serde_json::from_str(&fs::read_to_string(&paths.texts)?)?;

        if index.len() != texts.len() {
            return Err(AppError::Index(format!(
                "Index holds {} vectors but texts file holds {} entries",
                index.len(),
                texts.len()
            )));
        }

        Ok(Self { index, texts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ChunkIndex {
        ChunkIndex::build(
            &[vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 5.0]],
            vec!["origin".into(), "east".into(), "north".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_paths_for_base() {
        let paths = IndexPaths::for_base(Path::new("data"), DEFAULT_INDEX_BASE);
        assert_eq!(paths.index, PathBuf::from("data/policy_index.index"));
        assert_eq!(paths.texts, PathBuf::from("data/policy_index_texts.json"));
    }

    #[test]
    fn test_build_rejects_length_mismatch() {
        let err = ChunkIndex::build(&[vec![1.0]], vec!["a".into(), "b".into()]).unwrap_err();
        assert!(matches!(err, AppError::Index(_)));
    }

    #[test]
    fn test_build_rejects_dimension_mismatch() {
        let err = ChunkIndex::build(&[vec![1.0, 2.0], vec![1.0]], vec!["a".into(), "b".into()])
            .unwrap_err();
        assert!(matches!(err, AppError::Index(_)));
    }

    #[test]
    fn test_persist_and_load() {
        let dir = TempDir::new().unwrap();
        let paths = IndexPaths::for_base(&dir.path().join("nested"), "doc");
        let original = sample();
        original.persist(&paths).unwrap();

        let texts: Vec<String> =
            serde_json::from_str(&fs::read_to_string(&paths.texts).unwrap()).unwrap();
        assert_eq!(texts, vec!["origin", "east", "north"]);

        let loaded = ChunkIndex::load(&paths).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dimensions(), 2);
        assert_eq!(loaded.text(2), Some("north"));
        assert_eq!(loaded.flat().vector(1), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn test_load_missing_texts_file() {
        let dir = TempDir::new().unwrap();
        let paths = IndexPaths::for_base(dir.path(), "doc");
        sample().persist(&paths).unwrap();
        fs::remove_file(&paths.texts).unwrap();

        let err = ChunkIndex::load(&paths).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_load_missing_index_file() {
        let dir = TempDir::new().unwrap();
        let paths = IndexPaths::for_base(dir.path(), "absent");
        let err = ChunkIndex::load(&paths).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_load_rejects_inconsistent_pair() {
        let dir = TempDir::new().unwrap();
        let paths = IndexPaths::for_base(dir.path(), "doc");
        sample().persist(&paths).unwrap();
        fs::write(&paths.texts, r#"["only one"]"#).unwrap();

        let err = ChunkIndex::load(&paths).unwrap_err();
        assert!(matches!(err, AppError::Index(_)));
    }
}
