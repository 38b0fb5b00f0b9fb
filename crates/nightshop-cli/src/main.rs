mod storage;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use nightshop_core::app_config::AppConfig;
use nightshop_core::config::{load_app_config, ConfigError};
use nightshop_core::geo::format_distance;
use nightshop_core::types::{Coordinate, OpenState, Shop};
use nightshop_places::PlacesClient;
use nightshop_search::{FlagLedger, SearchConfig, SearchOrchestrator};

use crate::storage::FileStore;

#[derive(Debug, Parser)]
#[command(name = "nightshop")]
#[command(about = "Find night shops near you that are actually open")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for open shops around a coordinate
    Search {
        /// Latitude of the search origin, in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude of the search origin, in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Search radius in meters (defaults to the configured radius)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Report a shop as actually closed
    Flag { place_id: String },
    /// Withdraw a "reported closed" flag (the shop is open after all)
    Unflag { place_id: String },
    /// List unexpired "reported closed" flags
    Flags,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app = load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&app.log_level)),
        )
        .init();

    let search_config = search_config_from(&app);
    let mut ledger = FlagLedger::new(FileStore::new(&app.flag_store_path), &search_config);

    match cli.command {
        Commands::Search { lat, lng, radius } => {
            let origin = Coordinate::new(lat, lng)?;
            let radius = radius.unwrap_or(search_config.default_radius_meters);
            let client = build_client(&app)?;
            let orchestrator = SearchOrchestrator::new(client, search_config);

            let shops = orchestrator
                .search_nearby_open_shops(&mut ledger, origin, radius)
                .await
                .context("search failed — every provider query errored")?;

            if shops.is_empty() {
                println!("No shops found within {}.", format_distance(radius));
            } else {
                print_shops(&shops);
            }
        }
        Commands::Flag { place_id } => {
            ledger.flag(&place_id);
            #[allow(clippy::cast_precision_loss)]
            let hours = app.flag_retention_secs as f64 / 3600.0;
            println!("Flagged {place_id} as closed for the next {hours:.1} hours.");
        }
        Commands::Unflag { place_id } => {
            ledger.unflag(&place_id);
            println!("Cleared the flag on {place_id}.");
        }
        Commands::Flags => {
            let mapping = ledger.read();
            if mapping.is_empty() {
                println!("No active flags.");
            } else {
                let mut entries: Vec<(String, i64)> = mapping.into_iter().collect();
                entries.sort_by_key(|(_, ts)| *ts);
                for (place_id, ts) in entries {
                    let flagged_at = chrono::DateTime::from_timestamp_millis(ts)
                        .map_or_else(|| "?".to_string(), |t| t.format("%H:%M:%S").to_string());
                    println!("{place_id}  (flagged at {flagged_at})");
                }
            }
        }
    }

    Ok(())
}

fn search_config_from(app: &AppConfig) -> SearchConfig {
    let retention_secs = i64::try_from(app.flag_retention_secs).unwrap_or(i64::MAX);
    SearchConfig {
        default_radius_meters: app.default_radius_meters,
        flag_retention: chrono::Duration::seconds(retention_secs),
        ..SearchConfig::default()
    }
}

fn build_client(app: &AppConfig) -> anyhow::Result<PlacesClient> {
    let api_key = app
        .places_api_key
        .as_deref()
        .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_PLACES_API_KEY".to_string()))?;

    let client = match app.places_base_url.as_deref() {
        Some(base_url) => {
            PlacesClient::with_base_url(api_key, app.request_timeout_secs, &app.user_agent, base_url)
        }
        None => PlacesClient::new(api_key, app.request_timeout_secs, &app.user_agent),
    }?;

    Ok(client.retry_policy(app.max_retries, app.retry_backoff_base_ms))
}

fn print_shops(shops: &[Shop]) {
    for (index, shop) in shops.iter().enumerate() {
        let open = match shop.open_state {
            OpenState::Open => "open now",
            OpenState::Unknown => "hours unknown",
            OpenState::Closed => "closed",
        };
        let flag_note = if shop.flagged {
            "  [reported closed]"
        } else {
            ""
        };
        println!(
            "{:>2}. {}  — {} — {}{}",
            index + 1,
            shop.name,
            format_distance(shop.distance_meters),
            open,
            flag_note
        );
        println!("    {}", shop.address);
        if let (Some(rating), Some(count)) = (shop.rating, shop.user_rating_count) {
            println!("    rated {rating:.1} ({count} reviews)");
        }
    }
}
