// 🏷️ Category Rules - Rules as Data
// Category catalog, brand overrides and place-type mappings

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::RewardsError;

/// Category used when nothing else matches
pub const OTHER_PURCHASES: &str = "Other purchases";

// ============================================================================
// RULE DEFINITIONS
// ============================================================================

/// Direct place-name → category mapping, applied before place types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandOverride {
    /// Brand text as written ("barnes & noble", "kohl's")
    pub pattern: String,

    /// Category to assign
    pub category: String,
}

/// Place-type tag → category mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceTypeRule {
    /// Tag from the place-lookup taxonomy ("restaurant", "gas_station")
    pub place_type: String,

    /// Category to assign
    pub category: String,
}

// ============================================================================
// RULE SET
// ============================================================================

/// All lookup tables the resolver needs. Order matters in every list:
/// earlier entries win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRules {
    pub categories: Vec<String>,

    #[serde(default)]
    pub brand_overrides: Vec<BrandOverride>,

    #[serde(default)]
    pub place_types: Vec<PlaceTypeRule>,
}

impl CategoryRules {
    /// Built-in tables
    pub fn with_defaults() -> Self {
        CategoryRules {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            brand_overrides: DEFAULT_BRAND_OVERRIDES
                .iter()
                .map(|(pattern, category)| BrandOverride {
                    pattern: pattern.to_string(),
                    category: category.to_string(),
                })
                .collect(),
            place_types: DEFAULT_PLACE_TYPES
                .iter()
                .map(|(place_type, category)| PlaceTypeRule {
                    place_type: place_type.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        }
    }

    /// Load rules from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rules file: {:?}", path.as_ref()))?;

        let rules: CategoryRules =
            serde_json::from_str(&content).context("Failed to parse rules JSON")?;

        rules.validate()?;
        Ok(rules)
    }

    /// Catalog names must be unique and non-empty
    pub fn validate(&self) -> Result<(), RewardsError> {
        if self.categories.is_empty() {
            return Err(RewardsError::config("category catalog is empty"));
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.as_str()) {
                return Err(RewardsError::config(format!(
                    "duplicate category in catalog: {}",
                    category
                )));
            }
        }

        Ok(())
    }

    /// Category for a place-type tag (first rule wins)
    pub fn category_for_type(&self, place_type: &str) -> Option<&str> {
        self.place_types
            .iter()
            .find(|rule| rule.place_type == place_type)
            .map(|rule| rule.category.as_str())
    }

    /// Get number of rules loaded
    pub fn rule_count(&self) -> usize {
        self.brand_overrides.len() + self.place_types.len()
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// BUILT-IN TABLES
// ============================================================================

const DEFAULT_CATEGORIES: &[&str] = &[
    "AAA", "AT&T", "Alaska Air", "Amazon", "Amtrak", "Athleta", "Banana Republic",
    "Barnes & Noble", "Bass Pro", "Beauty", "Bed Bath & Beyond", "Belk", "Bloomingdale",
    "Book Store", "British Air", "Bus", "Car Rental", "Choice", "Costco Gas", "Cruise",
    "Department Stores", "Dining", "Drugstore", "Electronics retailers (up to $2M spend/yr)",
    "Entertainment", "Fast Food", "Flights (Amex Travel)", "Food Delivery", "Gas",
    "Gas stations (U.S.)", "Grocery", "Grocery stores (U.S.)", "Gym", "Hilton hotels/resorts",
    "Home Improvement", "Hotel", "IHG", "JCPenney", "Kohl's", "Kroger", "Lowe's", "Lyft",
    "Macy's", "Marriott", "Marshalls", "Menards", "Old Navy", "Online retail (U.S.)",
    "Other purchases", "REI", "Restaurants", "Ride-Sharing", "Sam's Club", "Sporting Good",
    "Starbucks", "Streaming services", "Supermarkets (U.S.)", "TJ Maxx", "Target",
    "Telecommunication", "Transit", "Travel", "Walgreens", "Wayfair", "Whole Foods",
    "Wholesale Club", "Wireless telephone services (direct, U.S. providers)",
];

const DEFAULT_BRAND_OVERRIDES: &[(&str, &str)] = &[
    ("target", "Target"),
    ("walmart", "Department Stores"),
    ("costco", "Wholesale Club"),
    ("sam's club", "Sam's Club"),
    ("bjs", "Wholesale Club"),
    ("whole foods", "Whole Foods"),
    ("trader joe", "Grocery"),
    ("ralphs", "Grocery"),
    ("starbucks", "Starbucks"),
    ("mcdonald", "Fast Food"),
    ("in n out", "Fast Food"),
    ("chipotle", "Dining"),
    ("panera", "Dining"),
    ("shell", "Gas stations (U.S.)"),
    ("chevron", "Gas stations (U.S.)"),
    ("hilton", "Hilton hotels/resorts"),
    ("marriott", "Marriott"),
    ("hyatt", "Hotel"),
    ("ihg", "IHG"),
    ("aaa", "AAA"),
    ("at&t", "AT&T"),
    ("att", "AT&T"),
    ("old navy", "Old Navy"),
    ("marshalls", "Marshalls"),
    ("athleta", "Athleta"),
    ("banana republic", "Banana Republic"),
    ("barnes & noble", "Barnes & Noble"),
    ("barnes and noble", "Barnes & Noble"),
    ("bass pro", "Bass Pro"),
    ("belk", "Belk"),
    ("bloomingdale", "Bloomingdale"),
    ("choice", "Choice"),
    ("jcpenney", "JCPenney"),
    ("jcpenny", "JCPenney"),
    ("kohl's", "Kohl's"),
    ("kohls", "Kohl's"),
    ("kroger", "Kroger"),
    ("lowe's", "Lowe's"),
    ("lowes", "Lowe's"),
    ("lyft", "Lyft"),
    ("macy's", "Macy's"),
    ("macys", "Macy's"),
    ("menards", "Menards"),
    ("rei", "REI"),
    ("sams club", "Sam's Club"),
    ("tj maxx", "TJ Maxx"),
    ("walgreens", "Walgreens"),
    ("wayfair", "Wayfair"),
];

const DEFAULT_PLACE_TYPES: &[(&str, &str)] = &[
    // Food / dining
    ("restaurant", "Restaurants"),
    ("cafe", "Dining"),
    ("bar", "Dining"),
    ("meal_takeaway", "Takeout/Delivery (U.S.)"),
    ("bakery", "Dining"),
    ("fast_food_restaurant", "Fast Food"),
    ("food", "Dining"),
    // Retail / shopping
    ("supermarket", "Supermarkets (U.S.)"),
    ("grocery_or_supermarket", "Grocery"),
    ("department_store", "Department Stores"),
    ("clothing_store", "Department Stores"),
    ("electronics_store", "Electronics retailers (up to $2M spend/yr)"),
    ("home_goods_store", "Home Improvement"),
    ("book_store", "Book Store"),
    ("pharmacy", "Drugstore"),
    ("store", "Department Stores"),
    // Travel & transport
    ("gas_station", "Gas stations (U.S.)"),
    ("lodging", "Hotel"),
    ("hotel", "Hotel"),
    ("car_rental", "Car Rental"),
    ("bus_station", "Transit"),
    ("train_station", "Transit"),
    ("airport", "Travel"),
    // Entertainment & recreation
    ("gym", "Gym"),
    ("movie_theater", "Entertainment"),
    ("amusement_park", "Entertainment"),
    ("stadium", "Entertainment"),
    ("museum", "Entertainment"),
    ("night_club", "Entertainment"),
    ("spa", "Beauty"),
];

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let rules = CategoryRules::with_defaults();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.categories.len(), 67);
        assert!(rules.categories.iter().any(|c| c == OTHER_PURCHASES));
    }

    #[test]
    fn test_category_for_type() {
        let rules = CategoryRules::with_defaults();
        assert_eq!(rules.category_for_type("restaurant"), Some("Restaurants"));
        assert_eq!(rules.category_for_type("gas_station"), Some("Gas stations (U.S.)"));
        assert_eq!(rules.category_for_type("point_of_interest"), None);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut rules = CategoryRules::with_defaults();
        rules.categories.push("Target".to_string());

        let err = rules.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn test_from_file_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "categories": ["Coffee", "Other purchases"],
                "brand_overrides": [
                    {{"pattern": "blue bottle", "category": "Coffee"}},
                    {{"pattern": "blue", "category": "Other purchases"}}
                ],
                "place_types": [{{"place_type": "cafe", "category": "Coffee"}}]
            }}"#
        )
        .unwrap();

        let rules = CategoryRules::from_file(&path).unwrap();
        assert_eq!(rules.categories, vec!["Coffee", "Other purchases"]);
        assert_eq!(rules.brand_overrides[0].pattern, "blue bottle");
        assert_eq!(rules.category_for_type("cafe"), Some("Coffee"));
        assert_eq!(rules.rule_count(), 3);
    }

    #[test]
    fn test_from_file_missing() {
        let result = CategoryRules::from_file("/nonexistent/rules.json");
        assert!(result.is_err());
    }
}
