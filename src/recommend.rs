// 💳 Recommendation flow - place → categories → ranked cards
//
// The rewards matrix is read fresh on every call so edits to the CSV show up
// without restarting anything.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::config::AppConfig;
use crate::matrix::RewardMatrix;
use crate::places::{LatLng, Place, PlaceLookup};
use crate::ranking::{CardRanker, RankedCard};
use crate::resolver::{CategoryResolver, Resolution};
use crate::rules::CategoryRules;

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub place: Place,
    pub resolution: Resolution,

    /// Categories ranked against, primary first
    pub categories: Vec<String>,

    pub cards: Vec<RankedCard>,
}

impl Recommendation {
    /// Category shown to the user
    pub fn primary_category(&self) -> &str {
        self.resolution.primary()
    }

    /// Top card, if any card earns something here
    pub fn best_card(&self) -> Option<&RankedCard> {
        self.cards.first().filter(|card| card.rate > 0.0)
    }
}

pub struct Recommender {
    resolver: CategoryResolver,
    ranker: CardRanker,
    matrix_path: PathBuf,
}

impl Recommender {
    pub fn new(resolver: CategoryResolver, ranker: CardRanker, matrix_path: impl Into<PathBuf>) -> Self {
        Recommender {
            resolver,
            ranker,
            matrix_path: matrix_path.into(),
        }
    }

    /// Build from config, loading the rules file when one is set
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let rules = match &config.rules_path {
            Some(path) => CategoryRules::from_file(path)?,
            None => CategoryRules::with_defaults(),
        };

        let resolver = CategoryResolver::new(rules)?;
        let ranker = CardRanker::new(config.cards.iter().cloned()).with_top_n(config.top_n);

        Ok(Self::new(resolver, ranker, &config.matrix_path))
    }

    pub fn resolver(&self) -> &CategoryResolver {
        &self.resolver
    }

    /// Current rewards matrix snapshot
    pub fn load_matrix(&self) -> Result<RewardMatrix> {
        RewardMatrix::load_csv(&self.matrix_path)
    }

    /// Resolve a known place and rank cards for it
    pub fn recommend_for_place(&self, place: Place) -> Result<Recommendation> {
        let matrix = self.load_matrix()?;
        Ok(self.recommend_with_matrix(place, &matrix))
    }

    fn recommend_with_matrix(&self, place: Place, matrix: &RewardMatrix) -> Recommendation {
        let resolution = self.resolver.resolve(&place.name, &place.types);
        let categories = resolution.categories();
        let cards = self.ranker.rank(&categories, matrix);

        info!(
            place = %place.name,
            category = resolution.primary(),
            cards = cards.len(),
            "recommendation ready"
        );

        Recommendation {
            place,
            resolution,
            categories,
            cards,
        }
    }

    /// Look up a free-text location, then recommend. Ok(None) when the
    /// lookup finds no place.
    pub fn lookup_and_recommend(
        &self,
        lookup: &dyn PlaceLookup,
        query: &str,
    ) -> Result<Option<Recommendation>> {
        match lookup.find_place(query)? {
            Some(place) => self.recommend_for_place(place).map(Some),
            None => {
                info!(query, "no place found");
                Ok(None)
            }
        }
    }

    /// Recommendations for every place around a point (one matrix load)
    pub fn recommend_nearby(
        &self,
        lookup: &dyn PlaceLookup,
        location: LatLng,
        radius_m: u32,
    ) -> Result<Vec<Recommendation>> {
        let places = lookup.nearby(location, radius_m)?;
        if places.is_empty() {
            return Ok(Vec::new());
        }

        let matrix = self.load_matrix()?;
        Ok(places
            .into_iter()
            .map(|place| self.recommend_with_matrix(place, &matrix))
            .collect())
    }

    /// Rank directly for categories, skipping place resolution
    pub fn rank_categories<S: AsRef<str>>(&self, categories: &[S]) -> Result<Vec<RankedCard>> {
        let matrix = self.load_matrix()?;
        Ok(self.ranker.rank(categories, &matrix))
    }
}

// ============================================================================
// TESTS
// ============================================================================
