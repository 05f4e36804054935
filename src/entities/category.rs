// 🏷️ Category Catalog - the fixed, ordered list of spending categories
//
// Catalog order is meaningful: fuzzy lookups that tie keep the earlier name.

use crate::rules::CategoryRules;
use crate::similarity::{closest_match, DEFAULT_CUTOFF};

// ============================================================================
// CATEGORY CATALOG
// ============================================================================

/// Immutable list of category names, built once at startup
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    names: Vec<String>,
}

impl CategoryCatalog {
    /// Create catalog from names, keeping the first copy of any duplicate
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = CategoryCatalog { names: Vec::new() };
        for name in names {
            let name = name.into();
            if !catalog.contains(&name) {
                catalog.names.push(name);
            }
        }
        catalog
    }

    /// Catalog from the built-in rules
    pub fn with_defaults() -> Self {
        Self::from_rules(&CategoryRules::with_defaults())
    }

    pub fn from_rules(rules: &CategoryRules) -> Self {
        Self::new(rules.categories.iter().cloned())
    }

    /// Exact (case-sensitive) membership
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Closest catalog name at or above the default similarity cutoff
    ///
    /// Example: "Resturants" → "Restaurants"
    pub fn closest(&self, name: &str) -> Option<&str> {
        self.closest_with_cutoff(name, DEFAULT_CUTOFF)
    }

    pub fn closest_with_cutoff(&self, name: &str, cutoff: f64) -> Option<&str> {
        closest_match(name, self.names.iter().map(String::as_str), cutoff)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        let catalog = CategoryCatalog::with_defaults();

        assert_eq!(catalog.len(), 67);
        assert!(catalog.contains("Target"));
        assert!(catalog.contains("Gas stations (U.S.)"));
        assert!(!catalog.contains("target"));
    }

    #[test]
    fn test_catalog_keeps_order_and_dedupes() {
        let catalog = CategoryCatalog::new(["Gas", "Grocery", "Gas", "Gym"]);

        let names: Vec<&str> = catalog.iter().collect();
        assert_eq!(names, vec!["Gas", "Grocery", "Gym"]);
    }

    #[test]
    fn test_closest_typo() {
        let catalog = CategoryCatalog::with_defaults();

        assert_eq!(catalog.closest("Resturants"), Some("Restaurants"));
        assert_eq!(catalog.closest("Walgreen"), Some("Walgreens"));
        assert_eq!(catalog.closest("Grocery Store"), Some("Grocery stores (U.S.)"));
    }

    #[test]
    fn test_closest_no_match() {
        let catalog = CategoryCatalog::with_defaults();

        assert_eq!(catalog.closest("Joe's Random Diner"), None);
        assert_eq!(catalog.closest(""), None);
    }

    #[test]
    fn test_closest_with_custom_cutoff() {
        let catalog = CategoryCatalog::new(["Grocery"]);

        assert_eq!(catalog.closest_with_cutoff("Grocery Store", 0.6), Some("Grocery"));
        assert_eq!(catalog.closest_with_cutoff("Grocery Store", 0.8), None);
    }
}
