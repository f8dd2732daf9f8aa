use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Position in the catalog, also the row/column of the similarity matrix
    pub index: usize,
    /// Display title of the movie
    pub title: String,
}

/// Ordered, immutable table of movies
///
/// Titles are not required to be unique. Lookups by title always resolve to the
/// first record carrying that title.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    positions: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from titles in their snapshot order
    pub fn new<I>(titles: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut movies = Vec::new();
        let mut positions = HashMap::new();

        for (index, title) in titles.into_iter().enumerate() {
            positions.entry(title.clone()).or_insert(index);
            movies.push(Movie { index, title });
        }

        Self { movies, positions }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Resolves a title to its catalog index (exact, case-sensitive)
    pub fn position(&self, title: &str) -> Option<usize> {
        self.positions.get(title).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.positions.contains_key(title)
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Titles in catalog order, duplicates included
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }
}
