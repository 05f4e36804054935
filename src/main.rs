use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use card_rewards::cli::{Cli, Commands};
use card_rewards::config::AppConfig;
use card_rewards::recommend::Recommender;
use card_rewards::report;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = card_rewards::logging::init(cli.verbose) {
        eprintln!("⚠️  {:#}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.apply_overrides(AppConfig::load_or_default(cli.config.as_deref())?);

    match &cli.command {
        Some(Commands::Resolve { name, types }) => run_resolve(cli, &config, name, types),
        Some(Commands::Category { categories }) => run_category(cli, &config, categories),
        Some(Commands::Nearby { lat, lng, radius }) => run_nearby(cli, &config, *lat, *lng, *radius),
        None => run_lookup(cli, &config, &cli.require_query()?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_resolve(cli: &Cli, config: &AppConfig, name: &str, types: &[String]) -> Result<()> {
    let recommender = Recommender::from_config(config)?;
    let resolution = recommender.resolver().resolve(name, types);

    if cli.json {
        print_json(&resolution)
    } else {
        print!("{}", report::render_resolution(name, &resolution));
        Ok(())
    }
}

fn run_category(cli: &Cli, config: &AppConfig, categories: &[String]) -> Result<()> {
    let recommender = Recommender::from_config(config)?;
    let cards = recommender.rank_categories(categories)?;

    if cli.json {
        print_json(&cards)
    } else {
        print!("{}", report::render_categories(categories));
        print!("{}", report::render_cards(&cards));
        Ok(())
    }
}

#[cfg(feature = "places")]
fn run_lookup(cli: &Cli, config: &AppConfig, query: &str) -> Result<()> {
    use card_rewards::places::GooglePlacesClient;

    let client = GooglePlacesClient::from_config(config)?;
    let recommender = Recommender::from_config(config)?;

    match recommender.lookup_and_recommend(&client, query)? {
        Some(rec) if cli.json => print_json(&rec),
        Some(rec) => {
            print!("{}", report::render_recommendation(&rec));
            Ok(())
        }
        None => {
            println!("{}", report::NO_PLACE_FOUND);
            Ok(())
        }
    }
}

#[cfg(feature = "places")]
fn run_nearby(cli: &Cli, config: &AppConfig, lat: f64, lng: f64, radius: u32) -> Result<()> {
    use card_rewards::places::{GooglePlacesClient, LatLng};

    let client = GooglePlacesClient::from_config(config)?;
    let recommender = Recommender::from_config(config)?;
    let recs = recommender.recommend_nearby(&client, LatLng { lat, lng }, radius)?;

    if cli.json {
        print_json(&recs)
    } else {
        print!("{}", report::render_nearby(&recs));
        Ok(())
    }
}

#[cfg(not(feature = "places"))]
fn run_lookup(_cli: &Cli, _config: &AppConfig, _query: &str) -> Result<()> {
    places_unavailable()
}

#[cfg(not(feature = "places"))]
fn run_nearby(_cli: &Cli, _config: &AppConfig, _lat: f64, _lng: f64, _radius: u32) -> Result<()> {
    places_unavailable()
}

#[cfg(not(feature = "places"))]
fn places_unavailable() -> Result<()> {
    eprintln!("❌ Place lookup not available!");
    eprintln!("   Rebuild with: cargo build --features places");
    eprintln!("   Or rank directly: card-rewards category 'Restaurants'");
    std::process::exit(1);
}
