// Text rendering for the command line

use std::fmt::Write;

use crate::places::Place;
use crate::ranking::{format_rate, RankedCard};
use crate::recommend::Recommendation;
use crate::resolver::Resolution;

pub const NO_PLACE_FOUND: &str = "No place found.";
pub const NO_REWARDS_FOUND: &str = "No rewards data found for this category.";

/// Score as a decimal: 5.0 → "5.0", 3.25 → "3.25"
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.1}", score)
    } else {
        format!("{}", score)
    }
}

pub fn render_place(place: &Place) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", place.name);
    let _ = writeln!(out, "Address: {}", place.address().unwrap_or("-"));
    let _ = writeln!(out, "Place ID: {}", place.place_id);
    let _ = writeln!(out, "Types: {}", place.types.join(", "));
    out
}

pub fn render_categories(categories: &[String]) -> String {
    let mut out = String::new();
    if let Some(primary) = categories.first() {
        let _ = writeln!(out, "Mapped Category: {}", primary);
    }
    if categories.len() > 1 {
        let _ = writeln!(out, "Also considering categories: {}", categories[1..].join(", "));
    }
    out
}

pub fn render_resolution(name: &str, resolution: &Resolution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", name);
    let _ = writeln!(
        out,
        "Brand Category: {}",
        resolution.brand_category.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "Default Category: {} ({:?})",
        resolution.default_category, resolution.default_source
    );
    out.push_str(&render_categories(&resolution.categories()));
    out
}

/// "  1. Target REDcard: 5.0 — 5% — Target"
pub fn render_cards(cards: &[RankedCard]) -> String {
    if cards.is_empty() {
        return format!("{}\n", NO_REWARDS_FOUND);
    }

    let mut out = String::from("Top cards for category:\n");
    for (rank, card) in cards.iter().enumerate() {
        let offer = if card.offer_text.is_empty() {
            String::new()
        } else {
            format!(" — {}", card.offer_text)
        };
        let _ = writeln!(
            out,
            "  {}. {}: {}{}",
            rank + 1,
            card.card_name,
            format_score(card.rate),
            offer
        );
    }
    out
}

pub fn render_recommendation(recommendation: &Recommendation) -> String {
    let mut out = render_place(&recommendation.place);
    out.push_str(&render_categories(&recommendation.categories));
    out.push_str(&render_cards(&recommendation.cards));
    out
}

/// One line per nearby place: name, category, best card
pub fn render_nearby(recommendations: &[Recommendation]) -> String {
    if recommendations.is_empty() {
        return format!("{}\n", NO_PLACE_FOUND);
    }

    let mut out = String::new();
    for rec in recommendations {
        let best = match rec.best_card() {
            Some(card) => format!("{} ({}%)", card.card_name, format_rate(card.rate)),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{} [{}] → {}",
            rec.place.name,
            rec.primary_category(),
            best
        );
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MatchSource;

    fn card(name: &str, rate: f64, offer: &str) -> RankedCard {
        RankedCard {
            card_name: name.to_string(),
            rate,
            offer_text: offer.to_string(),
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(5.0), "5.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(3.25), "3.25");
    }

    #[test]
    fn test_render_cards() {
        let out = render_cards(&[
            card("Target REDcard", 5.0, "5% — Target"),
            card("Venture X", 0.0, ""),
        ]);

        assert_eq!(
            out,
            "Top cards for category:\n  1. Target REDcard: 5.0 — 5% — Target\n  2. Venture X: 0.0\n"
        );
    }

    #[test]
    fn test_render_cards_empty() {
        assert_eq!(render_cards(&[]), "No rewards data found for this category.\n");
    }

    #[test]
    fn test_render_categories() {
        let out = render_categories(&["Target".to_string(), "Department Stores".to_string()]);
        assert_eq!(
            out,
            "Mapped Category: Target\nAlso considering categories: Department Stores\n"
        );
    }

    #[test]
    fn test_render_recommendation() {
        let mut place = Place::new("Target", vec!["department_store".to_string(), "store".to_string()]);
        place.place_id = "ChIJ123".to_string();
        place.formatted_address = Some("789 Mission St".to_string());

        let rec = Recommendation {
            place,
            resolution: Resolution {
                brand_category: Some("Target".to_string()),
                default_category: "Department Stores".to_string(),
                default_source: MatchSource::PlaceType,
            },
            categories: vec!["Target".to_string(), "Department Stores".to_string()],
            cards: vec![card("Target REDcard", 5.0, "5% — Target")],
        };

        let out = render_recommendation(&rec);
        assert!(out.starts_with("Name: Target\nAddress: 789 Mission St\nPlace ID: ChIJ123\n"));
        assert!(out.contains("Types: department_store, store\n"));
        assert!(out.contains("Mapped Category: Target\n"));
        assert!(out.ends_with("  1. Target REDcard: 5.0 — 5% — Target\n"));
    }

    #[test]
    fn test_render_nearby() {
        assert_eq!(render_nearby(&[]), "No place found.\n");
    }
}
