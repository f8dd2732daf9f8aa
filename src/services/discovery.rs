use rand::{seq::SliceRandom, Rng};

use crate::models::{Catalog, RecommendationSet};

/// Draws up to `count` catalog entries uniformly, without replacement
///
/// `count` is clamped to the catalog size, so asking for more titles than
/// exist returns the whole catalog in random order.
pub fn random_sample<R: Rng + ?Sized>(catalog: &Catalog, count: usize, rng: &mut R) -> Vec<String> {
    let count = count.min(catalog.len());
    catalog
        .movies()
        .choose_multiple(rng, count)
        .map(|movie| movie.title.clone())
        .collect()
}

/// One uniformly chosen title, or `None` for an empty catalog
pub fn random_title<R: Rng + ?Sized>(catalog: &Catalog, rng: &mut R) -> Option<String> {
    catalog.movies().choose(rng).map(|movie| movie.title.clone())
}

/// Picks the next query out of a previous result set
pub fn pick_from_results<R: Rng + ?Sized>(
    results: &RecommendationSet,
    rng: &mut R,
) -> Option<String> {
    results
        .recommendations
        .choose(rng)
        .map(|rec| rec.title.clone())
}
