// 🏪 Brand Overrides - exact-business matching on the place name
//
// Problem solved:
// - "TARGET", "Target®", "target-store" → all the Target category
// - "Barnes & Noble" and "barnes and noble" → same brand
// - Brands win over place-type tags ("Starbucks" is Starbucks, not "Dining")

use crate::rules::{BrandOverride, CategoryRules};

// ============================================================================
// BRAND ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    /// Pattern as written in the rules ("kohl's")
    pub pattern: String,

    /// Pattern with case and punctuation removed ("kohls")
    pub normalized: String,

    /// Category assigned when this brand matches
    pub category: String,
}

impl Brand {
    pub fn new(pattern: &str, category: &str) -> Self {
        Brand {
            pattern: pattern.to_string(),
            normalized: normalize_brand_text(pattern),
            category: category.to_string(),
        }
    }
}

// ============================================================================
// BRAND REGISTRY
// ============================================================================

/// Ordered brand table. Earlier brands win when several match.
#[derive(Debug, Clone)]
pub struct BrandRegistry {
    brands: Vec<Brand>,
}

impl BrandRegistry {
    pub fn new(overrides: &[BrandOverride]) -> Self {
        BrandRegistry {
            brands: overrides
                .iter()
                .map(|o| Brand::new(&o.pattern, &o.category))
                .collect(),
        }
    }

    /// Registry with the built-in brand table
    pub fn with_defaults() -> Self {
        Self::new(&CategoryRules::with_defaults().brand_overrides)
    }

    /// Category for the first brand found in `place_name`
    ///
    /// Two passes:
    /// 1. normalized pattern contained in the normalized name (absorbs
    ///    punctuation and spacing variants)
    /// 2. plain lowercase substring, for patterns that normalize to nothing
    pub fn find_category(&self, place_name: &str) -> Option<&str> {
        self.find(place_name).map(|brand| brand.category.as_str())
    }

    pub fn find(&self, place_name: &str) -> Option<&Brand> {
        let name_norm = normalize_brand_text(place_name);
        let name_lower = place_name.to_lowercase();

        self.brands
            .iter()
            .find(|brand| !brand.normalized.is_empty() && name_norm.contains(&brand.normalized))
            .or_else(|| {
                self.brands
                    .iter()
                    .find(|brand| name_lower.contains(&brand.pattern))
            })
    }

    pub fn count(&self) -> usize {
        self.brands.len()
    }
}

impl Default for BrandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Normalize text for brand matching
///
/// - Lowercase
/// - Drop '&'
/// - Keep only ASCII letters and digits
///
/// Example: "Barnes & Noble®" → "barnesnoble"
pub fn normalize_brand_text(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| *c != '&' && c.is_ascii_alphanumeric())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
