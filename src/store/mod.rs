use chrono::{DateTime, Utc};
use std::{
    path::PathBuf,
    sync::{Arc, OnceLock},
};

use crate::{
    config::Config,
    models::{Catalog, SimilarityMatrix},
};

pub mod snapshot;

/// Reasons the startup snapshots could not be turned into usable data
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("snapshot not found or unreadable: {path}")]
    NotFound { path: String },

    #[error("snapshot {path} is corrupt: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("similarity matrix has {rows} rows but the catalog has {catalog} movies")]
    DimensionMismatch { catalog: usize, rows: usize },

    #[error("similarity matrix row {row} has {len} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("similarity matrix holds a non-finite score at ({row}, {column})")]
    InvalidScore { row: usize, column: usize },
}

/// Catalog and similarity matrix, validated against each other
#[derive(Debug)]
pub struct MovieData {
    pub catalog: Catalog,
    pub matrix: SimilarityMatrix,
    pub loaded_at: DateTime<Utc>,
}

impl MovieData {
    /// Pairs a catalog with its matrix
    ///
    /// The matrix must be square, sized to the catalog, and hold only finite
    /// scores.
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> Result<Self, LoadError> {
        if matrix.size() != catalog.len() {
            return Err(LoadError::DimensionMismatch {
                catalog: catalog.len(),
                rows: matrix.size(),
            });
        }

        if let Some(row) = matrix.first_ragged_row() {
            return Err(LoadError::RaggedRow {
                row,
                len: matrix.row(row).map_or(0, <[f64]>::len),
                expected: matrix.size(),
            });
        }

        if let Some((row, column)) = matrix.first_non_finite() {
            return Err(LoadError::InvalidScore { row, column });
        }

        Ok(Self {
            catalog,
            matrix,
            loaded_at: Utc::now(),
        })
    }

    /// Reads and validates both snapshots
    pub fn load(paths: &SnapshotPaths) -> Result<Self, LoadError> {
        let catalog = snapshot::read_catalog(&paths.catalog)?;
        let matrix = snapshot::read_matrix(&paths.similarity)?;
        Self::new(catalog, matrix)
    }
}

/// Locations of the two startup snapshots
#[derive(Debug, Clone, Default)]
pub struct SnapshotPaths {
    pub catalog: PathBuf,
    pub similarity: PathBuf,
}

impl From<&Config> for SnapshotPaths {
    fn from(config: &Config) -> Self {
        Self {
            catalog: PathBuf::from(&config.catalog_path),
            similarity: PathBuf::from(&config.similarity_path),
        }
    }
}

/// Load-once handle to the movie data
///
/// The first call to [`SnapshotCache::get`] reads the snapshots; every later
/// call returns the same data, or the same error. A failed load is never
/// retried: the environment has to be fixed and the process restarted.
#[derive(Debug)]
pub struct SnapshotCache {
    paths: SnapshotPaths,
    cell: OnceLock<Result<Arc<MovieData>, LoadError>>,
}

impl SnapshotCache {
    /// Creates a cache that loads from `paths` on first use
    pub fn new(paths: SnapshotPaths) -> Self {
        Self {
            paths,
            cell: OnceLock::new(),
        }
    }

    /// Creates a cache around data that is already in memory
    pub fn preloaded(data: MovieData) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(Ok(Arc::new(data)));
        Self {
            paths: SnapshotPaths::default(),
            cell,
        }
    }

    /// Returns the cached data, loading it on the first call
    pub fn get(&self) -> Result<Arc<MovieData>, LoadError> {
        self.cell
            .get_or_init(|| {
                let result = MovieData::load(&self.paths).map(Arc::new);
                match &result {
                    Ok(data) => tracing::info!(
                        movies = data.catalog.len(),
                        catalog = %self.paths.catalog.display(),
                        similarity = %self.paths.similarity.display(),
                        "Movie snapshots loaded"
                    ),
                    Err(e) => tracing::error!(error = %e, "Movie snapshots unavailable"),
                }
                result
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn catalog(titles: &[&str]) -> Catalog {
        Catalog::new(titles.iter().map(|t| t.to_string()))
    }

    fn write_snapshots(dir: &std::path::Path, movies: &str, matrix: &str) -> SnapshotPaths {
        let paths = SnapshotPaths {
            catalog: dir.join("movies.json"),
            similarity: dir.join("matrix.json"),
        };
        fs::write(&paths.catalog, movies).unwrap();
        fs::write(&paths.similarity, matrix).unwrap();
        paths
    }

    #[test]
    fn test_dimension_mismatch() {
        let matrix = SimilarityMatrix::new(vec![vec![1.0, 0.5], vec![0.5, 1.0]]);
        let err = MovieData::new(catalog(&["A", "B", "C"]), matrix).unwrap_err();
        assert_eq!(err, LoadError::DimensionMismatch { catalog: 3, rows: 2 });
    }

    #[test]
    fn test_ragged_matrix() {
        let matrix = SimilarityMatrix::new(vec![vec![1.0, 0.5], vec![0.5]]);
        let err = MovieData::new(catalog(&["A", "B"]), matrix).unwrap_err();
        assert_eq!(
            err,
            LoadError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_non_finite_score() {
        let matrix = SimilarityMatrix::new(vec![vec![1.0, f64::INFINITY], vec![0.5, 1.0]]);
        let err = MovieData::new(catalog(&["A", "B"]), matrix).unwrap_err();
        assert_eq!(err, LoadError::InvalidScore { row: 0, column: 1 });
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_snapshots(
            dir.path(),
            r#"[{"title": "A"}, {"title": "B"}]"#,
            "[[1.0, 0.25], [0.25, 1.0]]",
        );

        let data = MovieData::load(&paths).unwrap();
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.matrix.row(1), Some(&[0.25, 1.0][..]));
    }

    #[test]
    fn test_missing_matrix_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SnapshotPaths {
            catalog: dir.path().join("movies.json"),
            similarity: dir.path().join("matrix.json"),
        };
        fs::write(&paths.catalog, r#"[{"title": "A"}]"#).unwrap();

        let err = MovieData::load(&paths).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { path } if path.ends_with("matrix.json")));
    }

    #[test]
    fn test_cache_loads_once() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_snapshots(dir.path(), r#"[{"title": "A"}]"#, "[[1.0]]");
        let cache = SnapshotCache::new(paths.clone());

        let first = cache.get().unwrap();

        // Later edits to the files are not picked up
        fs::write(&paths.catalog, r#"[{"title": "A"}, {"title": "B"}]"#).unwrap();
        let second = cache.get().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.catalog.len(), 1);
    }

    #[test]
    fn test_cache_keeps_failure() {
        let dir = tempfile::tempdir().unwrap();
        let paths = SnapshotPaths {
            catalog: dir.path().join("movies.json"),
            similarity: dir.path().join("matrix.json"),
        };
        let cache = SnapshotCache::new(paths.clone());
        assert!(cache.get().is_err());

        // Files appearing later do not revive the cache
        write_snapshots(dir.path(), r#"[{"title": "A"}]"#, "[[1.0]]");
        assert!(matches!(cache.get(), Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_preloaded_cache() {
        let matrix = SimilarityMatrix::new(vec![vec![1.0]]);
        let data = MovieData::new(catalog(&["Solo"]), matrix).unwrap();
        let cache = SnapshotCache::preloaded(data);
        assert_eq!(cache.get().unwrap().catalog.len(), 1);
    }
}
