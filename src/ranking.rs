// 🏆 Card Ranker - rank cards by reward rate for one or more categories
//
// Pipeline:
// 1. Restrict rows to the whitelist (missing cards become zero rows)
// 2. Build search terms from the categories + generic fallbacks
// 3. Select reward columns matching any term (or generic keyword columns)
// 4. Score = max parsed rate over selected columns
// 5. Stable sort, highest first, then build offer text

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::matrix::{CardRow, RewardMatrix};

/// Generic terms appended after the category-specific ones
pub const DEFAULT_FALLBACK_TERMS: [&str; 2] = ["Everywhere", "Other purchases"];

/// Keywords for the last-resort column selection
pub const FALLBACK_KEYWORDS: [&str; 4] = [
    "everywhere",
    "other purchases",
    "all purchases",
    "everything else",
];

pub const DEFAULT_TOP_N: usize = 20;

// ============================================================================
// RANKED CARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCard {
    pub card_name: String,

    /// Best rate over the selected columns
    pub rate: f64,

    /// "5% — Target | 1% — Everywhere", empty when rate is 0
    pub offer_text: String,
}

// ============================================================================
// SEARCH TERMS
// ============================================================================

/// Terms derived from a category alone: the category itself plus every
/// column that already contains it (no generic fallbacks)
pub fn category_terms(category: &str, columns: &[String]) -> Vec<String> {
    let category = category.trim();
    if category.is_empty() {
        return Vec::new();
    }

    let category_lower = category.to_lowercase();
    let mut terms = vec![category.to_string()];
    terms.extend(
        columns
            .iter()
            .filter(|column| column.to_lowercase().contains(&category_lower))
            .cloned(),
    );

    dedupe_terms(terms)
}

/// Search terms for one category, generic fallbacks included
pub fn build_search_terms(category: &str, columns: &[String]) -> Vec<String> {
    let mut terms = category_terms(category, columns);
    terms.extend(DEFAULT_FALLBACK_TERMS.iter().map(|t| t.to_string()));
    dedupe_terms(terms)
}

/// Union of per-category search terms; earlier categories come first
pub fn combined_search_terms<S: AsRef<str>>(categories: &[S], columns: &[String]) -> Vec<String> {
    if categories.is_empty() {
        return build_search_terms("", columns);
    }

    let terms = categories
        .iter()
        .flat_map(|category| build_search_terms(category.as_ref(), columns))
        .collect();

    dedupe_terms(terms)
}

/// Drop case-insensitive duplicates, keeping the first spelling
fn dedupe_terms(terms: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    terms
        .into_iter()
        .filter(|term| seen.insert(term.to_lowercase()))
        .collect()
}

fn contains_any(column: &str, lowered_terms: &[String]) -> bool {
    let column = column.to_lowercase();
    lowered_terms.iter().any(|term| column.contains(term.as_str()))
}

// ============================================================================
// CARD RANKER
// ============================================================================

/// A card considered for ranking: a matrix row or a synthetic zero row
struct Candidate<'a> {
    name: &'a str,
    row: Option<&'a CardRow>,
}

impl Candidate<'_> {
    fn rate(&self, column: usize) -> f64 {
        self.row.map(|row| row.rate(column)).unwrap_or(0.0)
    }
}

pub struct CardRanker {
    /// Cards the user holds (empty = rank the whole matrix)
    whitelist: Vec<String>,
    top_n: usize,
}

impl CardRanker {
    pub fn new<I, S>(whitelist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CardRanker {
            whitelist: whitelist.into_iter().map(Into::into).collect(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank cards for the given categories, best first
    ///
    /// Returns an empty list when no card or no reward column applies.
    pub fn rank<S: AsRef<str>>(&self, categories: &[S], matrix: &RewardMatrix) -> Vec<RankedCard> {
        let candidates = self.candidates(matrix);
        if candidates.is_empty() {
            return Vec::new();
        }

        let columns = matrix.reward_columns();
        let search_terms = combined_search_terms(categories, columns);
        let display_terms = display_terms(categories, columns);

        let selected = select_columns(columns, &search_terms);
        if selected.is_empty() {
            debug!(terms = ?search_terms, "no reward columns match");
            return Vec::new();
        }

        debug!(
            terms = ?search_terms,
            columns = ?selected.iter().map(|i| &columns[*i]).collect::<Vec<_>>(),
            "selected reward columns"
        );

        let mut scored: Vec<(Candidate, f64)> = candidates
            .into_iter()
            .map(|candidate| {
                let score = selected
                    .iter()
                    .map(|column| candidate.rate(*column))
                    .fold(f64::NEG_INFINITY, f64::max);
                // -0.0 and 0.0 tie
                (candidate, score + 0.0)
            })
            .collect();

        // sort_by is stable: equal scores keep matrix order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        scored
            .into_iter()
            .take(self.top_n)
            .map(|(candidate, score)| {
                let offer_text = if score > 0.0 {
                    offer_text(&candidate, columns, &display_terms)
                } else {
                    String::new()
                };

                RankedCard {
                    card_name: candidate.name.to_string(),
                    rate: score,
                    offer_text,
                }
            })
            .collect()
    }

    /// Rows to rank, one per distinct card name
    fn candidates<'a>(&'a self, matrix: &'a RewardMatrix) -> Vec<Candidate<'a>> {
        let mut seen = HashSet::new();

        if self.whitelist.is_empty() {
            return matrix
                .rows()
                .iter()
                .filter(|row| seen.insert(row.name.to_lowercase()))
                .map(|row| Candidate {
                    name: &row.name,
                    row: Some(row),
                })
                .collect();
        }

        let wanted: HashSet<String> = self.whitelist.iter().map(|c| c.to_lowercase()).collect();

        let mut candidates: Vec<Candidate> = matrix
            .rows()
            .iter()
            .filter(|row| {
                let key = row.name.to_lowercase();
                wanted.contains(&key) && seen.insert(key)
            })
            .map(|row| Candidate {
                name: &row.name,
                row: Some(row),
            })
            .collect();

        // Cards the user holds but the matrix doesn't know: zero rates
        for card in &self.whitelist {
            if seen.insert(card.to_lowercase()) {
                warn!(card = %card, "card not found in rewards matrix");
                candidates.push(Candidate {
                    name: card,
                    row: None,
                });
            }
        }

        candidates
    }
}

/// Convenience wrapper around `CardRanker`
pub fn rank<S: AsRef<str>, W: AsRef<str>>(
    categories: &[S],
    matrix: &RewardMatrix,
    whitelist: &[W],
    top_n: usize,
) -> Vec<RankedCard> {
    CardRanker::new(whitelist.iter().map(|w| w.as_ref().to_string()))
        .with_top_n(top_n)
        .rank(categories, matrix)
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Indices of reward columns matching any search term, falling back to
/// generic keyword columns
fn select_columns(columns: &[String], search_terms: &[String]) -> Vec<usize> {
    let lowered: Vec<String> = search_terms.iter().map(|t| t.to_lowercase()).collect();

    let selected: Vec<usize> = (0..columns.len())
        .filter(|i| contains_any(&columns[*i], &lowered))
        .collect();
    if !selected.is_empty() {
        return selected;
    }

    let keywords: Vec<String> = FALLBACK_KEYWORDS.iter().map(|k| k.to_string()).collect();
    (0..columns.len())
        .filter(|i| contains_any(&columns[*i], &keywords))
        .collect()
}

/// Terms eligible for offer text: only what the categories themselves
/// produced, so generic "Everywhere" columns never show up as an offer
/// unless a category asked for them
fn display_terms<S: AsRef<str>>(categories: &[S], columns: &[String]) -> Vec<String> {
    let terms = categories
        .iter()
        .flat_map(|category| category_terms(category.as_ref(), columns))
        .map(|term| term.to_lowercase())
        .collect();
    dedupe_terms(terms)
}

/// "4% — Restaurants | 3% — Dining", highest rate first
fn offer_text(candidate: &Candidate, columns: &[String], display_terms: &[String]) -> String {
    let mut offers: Vec<(&str, f64)> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| (column.as_str(), candidate.rate(i)))
        .filter(|(column, rate)| *rate > 0.0 && contains_any(column, display_terms))
        .collect();

    offers.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    offers
        .iter()
        .map(|(column, rate)| format!("{}% — {}", format_rate(*rate), column))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Whole numbers without a decimal point: 5.0 → "5", 3.5 → "3.5"
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 && rate.abs() < 1e15 {
        format!("{}", rate as i64)
    } else {
        format!("{}", rate)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(csv: &str) -> RewardMatrix {
        RewardMatrix::from_reader(csv.as_bytes()).unwrap()
    }

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    const NO_CARDS: &[&str] = &[];

    #[test]
    fn test_build_search_terms() {
        let cols = columns(&["Gas", "Gas stations (U.S.)", "Costco Gas", "Everywhere"]);
        let terms = build_search_terms("Gas", &cols);

        assert_eq!(
            terms,
            vec!["Gas", "Gas stations (U.S.)", "Costco Gas", "Everywhere", "Other purchases"]
        );
    }

    #[test]
    fn test_build_search_terms_empty_category() {
        let cols = columns(&["Target"]);
        assert_eq!(build_search_terms("  ", &cols), vec!["Everywhere", "Other purchases"]);
    }

    #[test]
    fn test_combined_terms_keep_first_category_order() {
        let cols = columns(&["Target", "Department Stores", "Everywhere"]);
        let terms = combined_search_terms(&["Target", "Department Stores"], &cols);

        assert_eq!(
            terms,
            vec!["Target", "Everywhere", "Other purchases", "Department Stores"]
        );
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(5.0), "5");
        assert_eq!(format_rate(3.5), "3.5");
        assert_eq!(format_rate(1.25), "1.25");
        assert_eq!(format_rate(-2.0), "-2");
    }

    #[test]
    fn test_rank_target() {
        let m = matrix(
            "Card Name,Target,Restaurants,Everywhere\n\
             Chase Sapphire Reserve®,,3,1\n\
             Target REDcard,5,,1\n",
        );
        let ranked = rank(&["Target", "Department Stores"], &m, NO_CARDS, 20);

        assert_eq!(ranked[0].card_name, "Target REDcard");
        assert_eq!(ranked[0].rate, 5.0);
        assert_eq!(ranked[0].offer_text, "5% — Target");
        assert_eq!(ranked[1].card_name, "Chase Sapphire Reserve®");
        assert_eq!(ranked[1].rate, 1.0);
        assert_eq!(ranked[1].offer_text, "");
    }

    #[test]
    fn test_rank_generic_fallback_columns_hidden_from_offer() {
        let m = matrix(
            "Card Name,Everywhere\n\
             Card A,1\n\
             Card B,1\n",
        );
        let ranked = rank(&["Restaurants"], &m, NO_CARDS, 20);

        assert_eq!(ranked.len(), 2);
        for card in &ranked {
            assert_eq!(card.rate, 1.0);
            assert_eq!(card.offer_text, "");
        }
        // Stable order on ties
        assert_eq!(ranked[0].card_name, "Card A");
        assert_eq!(ranked[1].card_name, "Card B");
    }

    #[test]
    fn test_rank_keyword_fallback() {
        // "All purchases" is not a search term, only a fallback keyword
        let m = matrix(
            "Card Name,Hotels,All purchases\n\
             Card A,10,1.5\n\
             Card B,,2\n",
        );
        let ranked = rank(&["Restaurants"], &m, NO_CARDS, 20);

        assert_eq!(ranked[0].card_name, "Card B");
        assert_eq!(ranked[0].rate, 2.0);
        assert_eq!(ranked[1].rate, 1.5);
        assert_eq!(ranked[0].offer_text, "");
    }

    #[test]
    fn test_rank_no_columns() {
        let m = matrix("Card Name,Hotels\nCard A,10\n");
        assert!(rank(&["Restaurants"], &m, NO_CARDS, 20).is_empty());
    }

    #[test]
    fn test_rank_whitelist_adds_missing_cards() {
        let m = matrix(
            "Card Name,Dining,Everywhere\n\
             Amex Gold,4,1\n\
             Other Card,5,1\n",
        );
        let ranked = rank(&["Dining"], &m, &["amex gold", "My Store Card"], 20);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].card_name, "Amex Gold");
        assert_eq!(ranked[0].rate, 4.0);
        assert_eq!(ranked[0].offer_text, "4% — Dining");
        assert_eq!(ranked[1].card_name, "My Store Card");
        assert_eq!(ranked[1].rate, 0.0);
        assert_eq!(ranked[1].offer_text, "");
    }

    #[test]
    fn test_rank_whitelist_dedupes() {
        let m = matrix("Card Name,Dining\nAmex Gold,4\nAMEX GOLD,9\n");
        let ranked = rank(&["Dining"], &m, &["Amex Gold", "amex gold", "New Card", "NEW CARD"], 20);

        let names: Vec<&str> = ranked.iter().map(|c| c.card_name.as_str()).collect();
        assert_eq!(names, vec!["Amex Gold", "New Card"]);
        assert_eq!(ranked[0].rate, 4.0);
    }

    #[test]
    fn test_rank_empty_rows() {
        let m = matrix("Card Name,Dining\n");
        assert!(rank(&["Dining"], &m, NO_CARDS, 20).is_empty());
    }

    #[test]
    fn test_rank_offer_text_sorted_and_filtered() {
        let m = matrix(
            "Card Name,Gas,Costco Gas,Gas stations (U.S.),Hotels,Everywhere\n\
             Card A,2,4,3.5,10,1\n",
        );
        let ranked = rank(&["Gas stations (U.S.)", "Gas"], &m, NO_CARDS, 20);

        assert_eq!(ranked[0].rate, 4.0);
        assert_eq!(
            ranked[0].offer_text,
            "4% — Costco Gas | 3.5% — Gas stations (U.S.) | 2% — Gas"
        );
    }

    #[test]
    fn test_rank_top_n() {
        let m = matrix("Card Name,Dining\nA,1\nB,3\nC,2\n");
        let ranked = rank(&["Dining"], &m, NO_CARDS, 2);

        let names: Vec<&str> = ranked.iter().map(|c| c.card_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_rank_other_purchases_category_shows_offer() {
        let m = matrix("Card Name,Other purchases\nA,1.5\n");
        let ranked = rank(&["Other purchases"], &m, NO_CARDS, 20);

        assert_eq!(ranked[0].offer_text, "1.5% — Other purchases");
    }

    #[test]
    fn test_rank_is_deterministic() {
        let m = matrix("Card Name,Dining,Everywhere\nA,3,1\nB,3,1\nC,,2\n");
        let first = rank(&["Dining"], &m, &["C", "B", "A"], 20);
        let second = rank(&["Dining"], &m, &["C", "B", "A"], 20);

        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_negative_zero_ties_with_zero() {
        let m = matrix("Card Name,Dining\nA,-0\nB,0\n");
        let ranked = rank(&["Dining"], &m, NO_CARDS, 20);

        let names: Vec<&str> = ranked.iter().map(|c| c.card_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(ranked[0].rate.is_sign_positive());
        assert_eq!(ranked[0].offer_text, "");
    }
}
