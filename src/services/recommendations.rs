use std::ops::RangeInclusive;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, Recommendation, RecommendationSet, SimilarityMatrix},
};

/// Result counts a client may ask for
pub const RECOMMENDATION_COUNT_RANGE: RangeInclusive<usize> = 3..=10;

/// Finds the titles most similar to `query_title`
///
/// The title is resolved by exact match to its first catalog entry. Every other
/// entry in its matrix row is ranked by score, highest first, with ties going
/// to the lower catalog index. The query entry itself is excluded by index, so
/// it never shows up even if its self-similarity is not the row maximum.
///
/// Returns `min(count, catalog.len() - 1)` recommendations.
pub fn recommend(
    query_title: &str,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    count: usize,
) -> AppResult<Vec<Recommendation>> {
    if count == 0 {
        return Err(AppError::InvalidInput(
            "Must ask for at least one recommendation".to_string(),
        ));
    }

    let query_index = catalog
        .position(query_title)
        .ok_or_else(|| AppError::TitleNotFound(query_title.to_string()))?;

    let row = matrix.row(query_index).ok_or_else(|| {
        AppError::Internal(format!("No similarity row for catalog index {}", query_index))
    })?;

    let mut candidates: Vec<(usize, f64)> = row
        .iter()
        .copied()
        .enumerate()
        .filter(|(index, _)| *index != query_index)
        .collect();

    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let recommendations = candidates
        .into_iter()
        .take(count)
        .filter_map(|(index, score)| {
            catalog
                .get(index)
                .map(|movie| Recommendation::new(movie.title.clone(), score))
        })
        .collect();

    Ok(recommendations)
}

/// Checks a client-supplied count against [`RECOMMENDATION_COUNT_RANGE`]
pub fn validate_count(count: usize) -> AppResult<usize> {
    if RECOMMENDATION_COUNT_RANGE.contains(&count) {
        Ok(count)
    } else {
        Err(AppError::InvalidInput(format!(
            "Number of recommendations must be between {} and {}",
            RECOMMENDATION_COUNT_RANGE.start(),
            RECOMMENDATION_COUNT_RANGE.end()
        )))
    }
}

/// Plain-text summary of a result set for sharing
pub fn share_text(results: &RecommendationSet) -> String {
    let mut text = format!(
        "Check out these movies similar to {}:\n",
        results.query
    );
    for rec in &results.recommendations {
        text.push_str(&format!(
            "• {} ({:.1}% match)\n",
            rec.title, rec.similarity_score
        ));
    }
    text
}
