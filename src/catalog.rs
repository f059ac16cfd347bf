use std::sync::Arc;

/// Titles accepted when no other catalog is configured.
pub const DEFAULT_MOVIES: [&str; 11] = [
    "Black Panther",
    "Dangerous Lies",
    "Avengers Endgame",
    "Joker",
    "Ford v Ferrari",
    "Fast & Furious Presents: Hobbs & Shaw",
    "Charlie's Angels",
    "Escape Room",
    "The Outpost",
    "Furiosa: A Mad Max Saga",
    "Neema",
];

/// The fixed, ordered list of movies a review may be written about.
///
/// Built once at startup and shared read-only by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCatalog {
    titles: Arc<[String]>,
}

impl MovieCatalog {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl Default for MovieCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MOVIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_preserves_order() {
        let catalog = MovieCatalog::default();
        assert_eq!(catalog.titles().len(), 11);
        assert_eq!(catalog.titles()[0], "Black Panther");
        assert_eq!(catalog.titles()[10], "Neema");
    }

    #[test]
    fn membership_is_exact() {
        let catalog = MovieCatalog::default();
        assert!(catalog.contains("Joker"));
        assert!(catalog.contains("Fast & Furious Presents: Hobbs & Shaw"));
        assert!(!catalog.contains("joker"));
        assert!(!catalog.contains("Not A Real Movie"));
    }

    #[test]
    fn custom_catalog() {
        let catalog = MovieCatalog::new(["Heat"]);
        assert!(catalog.contains("Heat"));
        assert!(!catalog.contains("Joker"));
    }
}
