use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

pub const USAGE_HINT: &str = "Usage: card-rewards '1600 Amphitheatre Pkwy, Mountain View, CA'";

/// Find the best card in your wallet for a place
#[derive(Parser, Debug)]
#[command(name = "card-rewards")]
#[command(about = "Map a place to a spending category and rank your cards by reward rate")]
#[command(version)]
pub struct Cli {
    /// Address or place name, e.g. '1600 Amphitheatre Pkwy, Mountain View, CA'
    pub location: Vec<String>,

    /// Config file (JSON). Defaults to ./card-rewards.json when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Rewards matrix CSV
    #[arg(long, global = true)]
    pub matrix: Option<PathBuf>,

    /// Category rules JSON replacing the built-in tables
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Card to rank (repeatable); replaces the configured card list
    #[arg(long = "card", global = true)]
    pub cards: Vec<String>,

    /// Number of cards to show
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a place name to categories without any lookup
    Resolve {
        /// Place name as shown by the lookup service
        name: String,

        /// Place-type tag (repeatable), e.g. --type restaurant
        #[arg(short = 't', long = "type")]
        types: Vec<String>,
    },
    /// Rank cards for one or more categories directly
    Category {
        /// Category names, primary first
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Best card for each place around a point
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,

        /// Search radius in meters
        #[arg(long, default_value_t = 500)]
        radius: u32,
    },
}

impl Cli {
    /// Location words joined back into one query
    pub fn query(&self) -> Option<String> {
        let query = self.location.join(" ");
        let query = query.trim();
        if query.is_empty() {
            None
        } else {
            Some(query.to_string())
        }
    }

    /// Query for the default flow; an error with a usage hint when none was given
    pub fn require_query(&self) -> Result<String> {
        self.query()
            .ok_or_else(|| anyhow!("No location given!\n   {}", USAGE_HINT))
    }

    /// Command-line flags layered over the file config
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(matrix) = &self.matrix {
            config.matrix_path = matrix.clone();
        }
        if let Some(rules) = &self.rules {
            config.rules_path = Some(rules.clone());
        }
        if !self.cards.is_empty() {
            config.cards = self.cards.clone();
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        config
    }
}
