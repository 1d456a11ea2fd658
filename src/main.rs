mod config;
mod loader;
mod models;
mod pipeline;
mod scraper;
mod storage;
mod utils;

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::pipeline::{AlbumsPipeline, BandsPipeline, ReviewsPipeline};
use crate::storage::DatasetStore;

#[derive(Parser)]
#[command(name = "amg-etl", about = "Metal review dataset ETL", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape the review site by score category; write raw + cleaned datasets
    Reviews,

    /// Scrape the Wikipedia band lists; write the band test split
    Bands,

    /// Scrape the Reddit essentials post + album chart; write the album test split
    Albums,

    /// Run all three pipelines in sequence
    All,

    /// Show row counts for the output datasets
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "amg_dataset=info,warn",
        1 => "amg_dataset=debug,info",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = AppConfig::load()?;

    match cli.command {
        Command::Reviews => run_reviews(&config).await?,
        Command::Bands => run_bands(&config).await?,
        Command::Albums => run_albums(&config).await?,
        Command::All => {
            run_reviews(&config).await?;
            run_bands(&config).await?;
            run_albums(&config).await?;
        }
        Command::Stats => print_stats(&config)?,
    }

    Ok(())
}

async fn run_reviews(config: &AppConfig) -> Result<()> {
    let _t = utils::Timer::start("Review scrape");
    let stats = ReviewsPipeline::new(config.clone()).run().await?;
    info!(
        "Done: {} categories, {} reviews",
        stats.categories, stats.records
    );
    Ok(())
}

async fn run_bands(config: &AppConfig) -> Result<()> {
    let _t = utils::Timer::start("Band list scrape");
    let stats = BandsPipeline::new(config.clone()).run().await?;
    info!(
        "Done: {} bands scraped, {} kept after filtering",
        stats.scraped, stats.written
    );
    Ok(())
}

async fn run_albums(config: &AppConfig) -> Result<()> {
    let _t = utils::Timer::start("Album list scrape");
    let stats = AlbumsPipeline::new(config.clone()).run().await?;
    info!(
        "Done: {} from Reddit + {} from chart, {} rows written",
        stats.from_reddit, stats.from_chart, stats.written
    );
    Ok(())
}

fn print_stats(config: &AppConfig) -> Result<()> {
    let datasets: [(&str, &Path); 4] = [
        ("Raw reviews", &config.output.raw_reviews_path),
        ("Clean reviews", &config.output.clean_reviews_path),
        ("Band split", &config.output.bands_test_path),
        ("Album split", &config.output.albums_test_path),
    ];

    println!("─────────────────────────────────────────────");
    println!("  amg-etl — Dataset Stats");
    println!("─────────────────────────────────────────────");
    for (label, path) in datasets {
        if path.exists() {
            let rows = DatasetStore::row_count(path)?;
            let modified: DateTime<Local> = fs::metadata(path)?.modified()?.into();
            println!(
                "  {:<13}: {:>8} rows  ({})",
                label,
                utils::fmt_number(rows),
                modified.format("%Y-%m-%d %H:%M")
            );
        } else {
            println!("  {:<13}: —", label);
        }
    }
    println!("─────────────────────────────────────────────");

    Ok(())
}
