use serde::{de::DeserializeOwned, Deserialize};
use std::{fs::File, io::BufReader, path::Path};

use super::LoadError;
use crate::models::{Catalog, SimilarityMatrix};

/// One row of the catalog snapshot
///
/// The offline pipeline writes extra columns (ids, tags) next to the title;
/// only the title is needed here.
#[derive(Debug, Deserialize)]
struct MovieRecord {
    title: String,
}

/// Reads the catalog snapshot, keeping records in file order
pub fn read_catalog(path: &Path) -> Result<Catalog, LoadError> {
    let records: Vec<MovieRecord> = read_json(path)?;
    Ok(Catalog::new(records.into_iter().map(|r| r.title)))
}

/// Reads the similarity matrix snapshot
pub fn read_matrix(path: &Path) -> Result<SimilarityMatrix, LoadError> {
    let rows: Vec<Vec<f64>> = read_json(path)?;
    Ok(SimilarityMatrix::new(rows))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let shown = path.display().to_string();

    let file = File::open(path).map_err(|e| {
        tracing::error!(path = %shown, error = %e, "Snapshot could not be opened");
        LoadError::NotFound {
            path: shown.clone(),
        }
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            LoadError::NotFound { path: shown }
        } else {
            LoadError::Corrupt {
                path: shown,
                reason: e.to_string(),
            }
        }
    })
}
