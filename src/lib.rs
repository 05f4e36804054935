// Card Rewards - Core Library
// Place → spending category → cards ranked by reward rate

pub mod cli;
pub mod config;
pub mod entities;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod places;
pub mod ranking;
pub mod recommend;
pub mod report;
pub mod resolver;
pub mod rules;
pub mod similarity;

// Re-export commonly used types
pub use config::AppConfig;
pub use entities::{normalize_brand_text, Brand, BrandRegistry, CategoryCatalog};
pub use error::RewardsError;
pub use matrix::{parse_rate, CardRow, RewardMatrix};
pub use places::{LatLng, Place, PlaceLookup};
pub use ranking::{build_search_terms, rank, CardRanker, RankedCard};
pub use recommend::{Recommendation, Recommender};
pub use resolver::{CategoryResolver, MatchSource, Resolution};
pub use rules::{BrandOverride, CategoryRules, PlaceTypeRule, OTHER_PURCHASES};
pub use similarity::{closest_match, sequence_ratio};

#[cfg(feature = "places")]
pub use places::GooglePlacesClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
