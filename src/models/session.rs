use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::RecommendationSet;

/// Titles the user saved from recommendation results
///
/// Saving the same title twice keeps a single entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<String>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds titles to the set (set union)
    pub fn add<I>(&mut self, titles: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.0.extend(titles);
    }

    /// Removes every saved title
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn contains(&self, title: &str) -> bool {
        self.0.contains(title)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Saved titles in sorted order
    pub fn titles(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// Per-session UI state
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SessionState {
    /// Title currently selected in the picker
    pub selected_title: Option<String>,
    /// Saved favorites
    pub favorites: Favorites,
    /// Titles drawn by the last random pick
    pub random_picks: Vec<String>,
    /// Results of the last recommendation request
    pub last_results: Option<RecommendationSet>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, title: String) {
        self.selected_title = Some(title);
    }

    /// Saves every title of the last results, returning how many were offered
    pub fn save_last_results(&mut self) -> Option<usize> {
        let results = self.last_results.as_ref()?;
        let titles: Vec<String> = results
            .recommendations
            .iter()
            .map(|r| r.title.clone())
            .collect();
        let offered = titles.len();
        self.favorites.add(titles);
        Some(offered)
    }
}
