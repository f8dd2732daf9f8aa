use crate::models::Catalog;

/// Titles containing `query`, ignoring case, in catalog order
///
/// An empty query matches every title.
pub fn search_titles(catalog: &Catalog, query: &str) -> Vec<String> {
    let needle = query.to_lowercase();
    catalog
        .titles()
        .filter(|title| title.to_lowercase().contains(&needle))
        .map(String::from)
        .collect()
}

/// Title the picker should start on
///
/// Keeps the session's selection while it still names a catalog entry and
/// falls back to the first title otherwise.
pub fn default_selection(catalog: &Catalog, selected: Option<&str>) -> Option<String> {
    match selected {
        Some(title) if catalog.contains(title) => Some(title.to_string()),
        _ => catalog.get(0).map(|movie| movie.title.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            ["The Dark Knight", "Dark City", "Amélie", "Up"]
                .iter()
                .map(|t| t.to_string()),
        )
    }

    #[test]
    fn test_search_ignores_case() {
        let matches = search_titles(&catalog(), "DARK");
        assert_eq!(matches, vec!["The Dark Knight", "Dark City"]);
    }

    #[test]
    fn test_search_non_ascii() {
        assert_eq!(search_titles(&catalog(), "AMÉL"), vec!["Amélie"]);
    }

    #[test]
    fn test_search_no_match() {
        assert!(search_titles(&catalog(), "zzz").is_empty());
    }

    #[test]
    fn test_empty_query_matches_all() {
        assert_eq!(search_titles(&catalog(), "").len(), 4);
    }

    #[test]
    fn test_search_is_literal() {
        assert!(search_titles(&catalog(), "D.rk").is_empty());
    }

    #[test]
    fn test_default_selection() {
        let catalog = catalog();
        assert_eq!(
            default_selection(&catalog, Some("Up")),
            Some("Up".to_string())
        );
        assert_eq!(
            default_selection(&catalog, Some("Removed Movie")),
            Some("The Dark Knight".to_string())
        );
        assert_eq!(
            default_selection(&catalog, None),
            Some("The Dark Knight".to_string())
        );
        assert_eq!(default_selection(&Catalog::default(), None), None);
    }
}
