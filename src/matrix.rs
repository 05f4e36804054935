// 📊 Reward Matrix - card × category reward rates loaded from CSV
//
// Format:
//   Card Name,Target,Restaurants,Everywhere
//   Target REDcard,5,,1
//   American Express® Gold Card,,4x points,1
//
// Cells are free text. Rates are pulled out with a lenient parser:
// "3.5% cash back" → 3.5, "—" → 0.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::error::RewardsError;

/// Column holding the card name
pub const CARD_NAME_COLUMN: &str = "Card Name";

static RATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-?\d+(?:\.\d+)?").expect("rate pattern is valid")
});

// ============================================================================
// CARD ROW
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CardRow {
    pub name: String,

    /// Raw cell text, aligned with `RewardMatrix::reward_columns`
    pub cells: Vec<String>,
}

impl CardRow {
    pub fn new(name: impl Into<String>, cells: Vec<String>) -> Self {
        CardRow {
            name: name.into(),
            cells,
        }
    }

    /// Parsed rate for a reward column (0.0 when missing or unparseable)
    pub fn rate(&self, column: usize) -> f64 {
        self.cells
            .get(column)
            .and_then(|cell| parse_rate(cell))
            .unwrap_or(0.0)
    }
}

// ============================================================================
// REWARD MATRIX
// ============================================================================

/// Read-only snapshot of the rewards CSV
#[derive(Debug, Clone)]
pub struct RewardMatrix {
    reward_columns: Vec<String>,
    rows: Vec<CardRow>,
}

impl RewardMatrix {
    /// Build matrix directly (rows shorter than the header are padded)
    pub fn new(reward_columns: Vec<String>, rows: Vec<CardRow>) -> Self {
        let width = reward_columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.cells.resize(width, String::new());
                row
            })
            .collect();

        RewardMatrix {
            reward_columns,
            rows,
        }
    }

    /// Load matrix from a CSV file
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open rewards matrix: {}", path.display()))?;

        let matrix = Self::from_reader(file)
            .with_context(|| format!("Failed to load rewards matrix: {}", path.display()))?;

        info!(
            cards = matrix.rows.len(),
            columns = matrix.reward_columns.len(),
            path = %path.display(),
            "loaded rewards matrix"
        );

        Ok(matrix)
    }

    /// Load matrix from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().context("Failed to read CSV header")?.clone();

        let name_index = headers
            .iter()
            .position(|h| h == CARD_NAME_COLUMN)
            .ok_or_else(|| RewardsError::missing_column(CARD_NAME_COLUMN))?;

        let reward_indices: Vec<usize> = (0..headers.len()).filter(|i| *i != name_index).collect();
        let reward_columns: Vec<String> = reward_indices
            .iter()
            .map(|i| headers[*i].to_string())
            .collect();

        let mut rows = Vec::new();
        for (line_num, result) in reader.records().enumerate() {
            let record = result.with_context(|| {
                format!("Failed to parse CSV line {}", line_num + 2)
            })?;

            let name = record.get(name_index).unwrap_or("").trim();
            if name.is_empty() {
                debug!(line = line_num + 2, "skipping row without card name");
                continue;
            }

            let cells = reward_indices
                .iter()
                .map(|i| record.get(*i).unwrap_or("").to_string())
                .collect();

            rows.push(CardRow::new(name, cells));
        }

        Ok(RewardMatrix::new(reward_columns, rows))
    }

    /// Reward column names, header order, card-name column excluded
    pub fn reward_columns(&self) -> &[String] {
        &self.reward_columns
    }

    pub fn rows(&self) -> &[CardRow] {
        &self.rows
    }

    /// Row for a card, matched case-insensitively
    pub fn find_card(&self, name: &str) -> Option<&CardRow> {
        let needle = name.to_lowercase();
        self.rows.iter().find(|row| row.name.to_lowercase() == needle)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Extract a reward rate from free-form cell text
///
/// Thousands separators are dropped, then the first signed decimal number
/// is taken. Returns None when the text holds no number.
///
/// Example: "3.5% cash back" → Some(3.5), "$1,500 bonus" → Some(1500.0)
pub fn parse_rate(cell: &str) -> Option<f64> {
    let cleaned = cell.replace(',', "");
    RATE_PATTERN
        .find(cleaned.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

// ============================================================================
// TESTS
// ============================================================================
