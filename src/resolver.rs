// 🧭 Category Resolver - place name + place types → spending category
//
// Priority:
// 1. Brand override on the place name   → brand_category
// 2. First recognized place-type tag    → default_category
// 3. Fuzzy match of the name to catalog → default_category
// 4. "Other purchases"                  → default_category
//
// The brand pass and the default pass are independent: a Target store tagged
// "department_store" resolves to brand "Target" AND default "Department Stores".

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::entities::{BrandRegistry, CategoryCatalog};
use crate::rules::{CategoryRules, OTHER_PURCHASES};

// ============================================================================
// RESOLUTION RESULT
// ============================================================================

/// How the default category was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchSource {
    PlaceType,
    Fuzzy,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Category from a brand override, if the name contains a known brand
    pub brand_category: Option<String>,

    /// Category from place types, fuzzy matching or the fallback
    pub default_category: String,

    pub default_source: MatchSource,
}

impl Resolution {
    /// Brand category when present, otherwise the default
    pub fn primary(&self) -> &str {
        self.brand_category
            .as_deref()
            .unwrap_or(&self.default_category)
    }

    /// The other category, when both are present and differ
    pub fn secondary(&self) -> Option<&str> {
        match &self.brand_category {
            Some(brand) if *brand != self.default_category => Some(&self.default_category),
            _ => None,
        }
    }

    /// Categories to rank against, primary first
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![self.primary().to_string()];
        if let Some(secondary) = self.secondary() {
            categories.push(secondary.to_string());
        }
        categories
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

pub struct CategoryResolver {
    rules: CategoryRules,
    catalog: CategoryCatalog,
    brands: BrandRegistry,
}

impl CategoryResolver {
    /// Build resolver from validated rules
    pub fn new(rules: CategoryRules) -> Result<Self> {
        rules.validate()?;

        let catalog = CategoryCatalog::from_rules(&rules);
        let brands = BrandRegistry::new(&rules.brand_overrides);

        Ok(CategoryResolver {
            rules,
            catalog,
            brands,
        })
    }

    /// Resolver with the built-in tables
    pub fn with_defaults() -> Self {
        let rules = CategoryRules::with_defaults();
        CategoryResolver {
            catalog: CategoryCatalog::from_rules(&rules),
            brands: BrandRegistry::new(&rules.brand_overrides),
            rules,
        }
    }

    /// Map a place to its brand and default categories
    pub fn resolve<S: AsRef<str>>(&self, place_name: &str, place_types: &[S]) -> Resolution {
        let brand_category = self.brands.find_category(place_name).map(str::to_string);

        let (default_category, default_source) = self.default_category(place_name, place_types);

        debug!(
            place = place_name,
            brand = ?brand_category,
            default = %default_category,
            source = ?default_source,
            "resolved place category"
        );

        Resolution {
            brand_category,
            default_category,
            default_source,
        }
    }

    /// Default path: ignores brand overrides entirely
    fn default_category<S: AsRef<str>>(
        &self,
        place_name: &str,
        place_types: &[S],
    ) -> (String, MatchSource) {
        if let Some(category) = place_types
            .iter()
            .find_map(|t| self.rules.category_for_type(t.as_ref()))
        {
            return (category.to_string(), MatchSource::PlaceType);
        }

        if let Some(category) = self.catalog.closest(place_name) {
            return (category.to_string(), MatchSource::Fuzzy);
        }

        (OTHER_PURCHASES.to_string(), MatchSource::Fallback)
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// TESTS
// ============================================================================
