use serde::{Deserialize, Serialize};

pub mod movie;
pub mod session;
pub mod similarity;

pub use movie::{Catalog, Movie};
pub use session::{Favorites, SessionState};
pub use similarity::SimilarityMatrix;

/// A recommended title with its similarity to the query, as a percentage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    /// Raw similarity scaled to [0, 100] and rounded to one decimal
    pub similarity_score: f64,
}

impl Recommendation {
    /// Creates a recommendation from a raw similarity score
    pub fn new(title: String, raw_score: f64) -> Self {
        Self {
            title,
            similarity_score: normalize_score(raw_score),
        }
    }
}

/// Scales a raw similarity to a percentage with one decimal
///
/// Rounds the exact decimal value of `raw_score * 100` with ties to even, so
/// `0.0625` becomes `6.2` and `0.1235` (stored just below the half) `12.3`.
pub fn normalize_score(raw_score: f64) -> f64 {
    let percent = raw_score * 100.0;
    // `{:.1}` formats from the exact binary value
    format!("{:.1}", percent).parse().unwrap_or(percent)
}

/// Recommendations produced for one query title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    pub query: String,
    pub recommendations: Vec<Recommendation>,
}

/// A random pick with a label short enough for a button
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomPick {
    pub title: String,
    pub label: String,
}

const LABEL_MAX_CHARS: usize = 30;

impl RandomPick {
    pub fn new(title: String) -> Self {
        let label = if title.chars().count() > LABEL_MAX_CHARS {
            let head: String = title.chars().take(LABEL_MAX_CHARS).collect();
            format!("{}...", head)
        } else {
            title.clone()
        };

        Self { title, label }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_score() {
        assert_eq!(normalize_score(0.8), 80.0);
        assert_eq!(normalize_score(0.2), 20.0);
        assert_eq!(normalize_score(0.45678), 45.7);
        assert_eq!(normalize_score(1.0), 100.0);
        assert_eq!(normalize_score(0.0), 0.0);
    }

    #[test]
    fn test_normalize_score_ties_to_even() {
        // 6.25, 1.25, 31.25, 56.25 and 81.25 are exact in binary
        assert_eq!(normalize_score(0.0625), 6.2);
        assert_eq!(normalize_score(0.0125), 1.2);
        assert_eq!(normalize_score(0.3125), 31.2);
        assert_eq!(normalize_score(0.5625), 56.2);
        assert_eq!(normalize_score(0.8125), 81.2);
        assert_eq!(normalize_score(0.0375), 3.8);
    }

    #[test]
    fn test_normalize_score_uses_stored_value() {
        // 0.1235 * 100 is stored as 12.3499999...
        assert_eq!(normalize_score(0.1235), 12.3);
        assert_eq!(normalize_score(0.123), 12.3);
    }

    #[test]
    fn test_recommendation_serialization() {
        let rec = Recommendation::new("Inception".to_string(), 0.5);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"title":"Inception","similarity_score":50.0}"#);
    }

    #[test]
    fn test_random_pick_short_title_keeps_label() {
        let pick = RandomPick::new("Up".to_string());
        assert_eq!(pick.label, "Up");
    }

    #[test]
    fn test_random_pick_long_title_truncated() {
        let title = "Pirates of the Caribbean: At World's End".to_string();
        let pick = RandomPick::new(title.clone());
        assert_eq!(pick.title, title);
        assert_eq!(pick.label, "Pirates of the Caribbean: At W...");
    }

    #[test]
    fn test_random_pick_truncates_on_chars() {
        let title = "é".repeat(31);
        let pick = RandomPick::new(title);
        assert_eq!(pick.label, format!("{}...", "é".repeat(30)));
    }
}
