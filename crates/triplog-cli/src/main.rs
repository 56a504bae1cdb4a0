mod enrich;
mod export;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use triplog_core::AppConfig;
use triplog_geocoder::NominatimClient;
use triplog_notion::NotionClient;

use crate::enrich::{enrich_direction, Direction};

#[derive(Debug, Parser)]
#[command(name = "triplog")]
#[command(about = "Geocode travel-log rows in Notion and export them for the trip map")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Enrich arrivals and departures, then export (the default)
    Run,
    /// Geocode rows whose details field is still empty
    Enrich {
        /// Only enrich one direction
        #[arg(long, value_enum)]
        direction: Option<Direction>,
        /// Look places up but do not write anything back to Notion
        #[arg(long)]
        dry_run: bool,
    },
    /// Write the trips JSON from rows that already have details
    Export {
        /// Output file (defaults to TRIPLOG_OUTPUT_PATH or cities.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = triplog_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "triplog: configuration loaded");

    let notion = build_notion_client(&config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let geocoder = build_geocoder(&config)?;
            let arrival = enrich_direction(&notion, &geocoder, Direction::Arrival, false).await?;
            let departure =
                enrich_direction(&notion, &geocoder, Direction::Departure, false).await?;
            println!(
                "Done. Updated Arrival={}, Departure={}",
                arrival.updated, departure.updated
            );
            run_export(&notion, &config.output_path).await?;
        }
        Commands::Enrich { direction, dry_run } => {
            let geocoder = build_geocoder(&config)?;
            let directions = direction.map_or(Direction::ALL.to_vec(), |d| vec![d]);
            for direction in directions {
                let summary = enrich_direction(&notion, &geocoder, direction, dry_run).await?;
                println!(
                    "{direction}: updated={} not_found={} skipped={}{}",
                    summary.updated,
                    summary.not_found,
                    summary.skipped,
                    if dry_run { " (dry run)" } else { "" }
                );
            }
        }
        Commands::Export { output } => {
            let path = output.unwrap_or_else(|| config.output_path.clone());
            run_export(&notion, &path).await?;
        }
    }

    Ok(())
}

async fn run_export(notion: &NotionClient, path: &std::path::Path) -> anyhow::Result<()> {
    let count = export::export_trips(notion, path).await?;
    println!("Exported {count} trip(s) to {}", path.display());
    Ok(())
}

fn build_notion_client(config: &AppConfig) -> anyhow::Result<NotionClient> {
    let client = NotionClient::new(
        &config.notion_api_base,
        &config.notion_token,
        &config.notion_version,
        &config.notion_database_id,
        config.request_timeout_secs,
    )?
    .with_page_size(config.page_size);
    Ok(client)
}

fn build_geocoder(config: &AppConfig) -> anyhow::Result<NominatimClient> {
    let client = NominatimClient::new(
        &config.nominatim_base_url,
        &config.nominatim_user_agent,
        config.request_timeout_secs,
    )?;
    Ok(client)
}
