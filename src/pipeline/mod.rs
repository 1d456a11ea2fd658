//! Pipeline orchestrators: tie scraper → cleaner → storage together.
//!
//! One orchestrator per output dataset family:
//!   `ReviewsPipeline` — paginated review-site scrape, raw + cleaned CSVs.
//!   `BandsPipeline`   — Wikipedia band lists, anti-joined band test split.
//!   `AlbumsPipeline`  — Reddit list + album chart, shuffled album test split.
//!
//! All three run to completion or abort on the first unrecoverable fetch;
//! only the review scraper treats a status miss as recoverable (it ends the
//! current category and moves on).

use crate::config::AppConfig;
use crate::loader::load_known_bands;
use crate::models::{AlbumRow, BandEntry, Genre, TestAlbumEntry};
use crate::scraper::cleaner::{anti_join, clean_band_list, clean_reviews, dedup_sorted};
use crate::scraper::freeform::extract_album_pairs;
use crate::scraper::http_client::HttpClient;
use crate::scraper::parsers::{
    parse_all_list_items, parse_band_columns, parse_chart_releases, parse_reddit_selftext,
};
use crate::scraper::{AmgScraper, ReviewSource};
use crate::storage::DatasetStore;
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

// ── Reviews ───────────────────────────────────────────────────────────────────

pub struct ReviewsPipeline {
    config: AppConfig,
}

impl ReviewsPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<ReviewStats> {
        let scraper = AmgScraper::new(&self.config.scraper).context("Failed to build scraper")?;
        let store = DatasetStore::new(self.config.output.clone());
        let tags = &self.config.sources.score_tags;

        info!("=== Step 1: Scraping {} score categories ===", tags.len());
        let mut raw = Vec::new();
        for tag in tags {
            let records = scraper.fetch_score_category(tag).await?;
            info!("Score {}: {} reviews", tag.score, records.len());
            raw.extend(records);
        }

        info!("=== Step 2: Writing raw + cleaned datasets ===");
        store.write_raw_reviews(&raw)?;
        let cleaned = clean_reviews(&raw);
        let written = store.write_clean_reviews(&cleaned)?;

        Ok(ReviewStats {
            categories: tags.len(),
            records: written,
        })
    }
}

#[derive(Debug)]
pub struct ReviewStats {
    pub categories: usize,
    pub records: usize,
}

// ── Bands ─────────────────────────────────────────────────────────────────────

pub struct BandsPipeline {
    config: AppConfig,
}

impl BandsPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Any non-success fetch here aborts the whole run: the list pages are
    /// single static documents, not a pagination walk.
    pub async fn run(&self) -> Result<BandStats> {
        let client = HttpClient::new(&self.config.scraper)?;
        let store = DatasetStore::new(self.config.output.clone());

        info!("=== Step 1: Scraping death metal band lists ===");
        let mut death = Vec::new();
        for url in &self.config.sources.death_list_urls {
            info!("Scraping {}", url);
            let html = client
                .get_text(url)
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;
            death.extend(parse_band_columns(&html)?);
        }
        let death = dedup_sorted(death);

        info!("=== Step 2: Scraping black metal band lists ===");
        let mut black = Vec::new();
        for url in &self.config.sources.black_list_urls {
            info!("Scraping {}", url);
            let html = client
                .get_text(url)
                .await
                .with_context(|| format!("Failed to fetch {}", url))?;
            black.extend(parse_all_list_items(&html)?);
        }
        let black = dedup_sorted(clean_band_list(&black));

        let mut entries: Vec<BandEntry> = death
            .into_iter()
            .map(|band| BandEntry {
                band,
                genre: Genre::DeathMetal,
            })
            .collect();
        entries.extend(black.into_iter().map(|band| BandEntry {
            band,
            genre: Genre::BlackMetal,
        }));
        let scraped = entries.len();
        info!("Total bands scraped: {}", scraped);

        info!("=== Step 3: Filtering against the training set ===");
        let known = load_known_bands(&self.config.output.training_reviews_path)?;
        let entries = anti_join(entries, &known);

        let written = store.write_band_entries(&entries)?;

        Ok(BandStats {
            scraped,
            written,
        })
    }
}

#[derive(Debug)]
pub struct BandStats {
    pub scraped: usize,
    pub written: usize,
}

// ── Albums ────────────────────────────────────────────────────────────────────

pub struct AlbumsPipeline {
    config: AppConfig,
}

impl AlbumsPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<AlbumStats> {
        let client = HttpClient::new(&self.config.scraper)?;
        let store = DatasetStore::new(self.config.output.clone());

        info!("=== Step 1: Fetching the death metal essentials post ===");
        let url = &self.config.sources.reddit_post_url;
        let body = client
            .get_text(url)
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        let selftext = parse_reddit_selftext(&body)?;
        let death = extract_album_pairs(&selftext, Genre::DeathMetal);
        info!("{} death metal albums extracted", death.len());

        info!("=== Step 2: Fetching the black metal chart ===");
        let url = &self.config.sources.chart_url;
        let html = client
            .get_text(url)
            .await
            .with_context(|| format!("Failed to fetch {}", url))?;
        let black: Vec<TestAlbumEntry> = parse_chart_releases(&html)?
            .into_iter()
            .map(|album| TestAlbumEntry {
                album,
                genre: Genre::BlackMetal,
                band: None,
            })
            .collect();
        info!("{} black metal albums extracted", black.len());

        info!("=== Step 3: Merging and shuffling ===");
        let from_reddit = death.len();
        let from_chart = black.len();
        let rows = assemble_test_albums(death, black, self.config.output.shuffle_seed);
        let written = store.write_album_rows(&rows)?;

        Ok(AlbumStats {
            from_reddit,
            from_chart,
            written,
        })
    }
}

#[derive(Debug)]
pub struct AlbumStats {
    pub from_reddit: usize,
    pub from_chart: usize,
    pub written: usize,
}

// ── Assembler ─────────────────────────────────────────────────────────────────

/// Merge the test-album subsets into one split: the Band column is dropped,
/// the subsets concatenated, and the order permuted by a seeded RNG so the
/// split is reproducible run to run.
pub fn assemble_test_albums(
    death: Vec<TestAlbumEntry>,
    black: Vec<TestAlbumEntry>,
    seed: u64,
) -> Vec<AlbumRow> {
    let mut rows: Vec<AlbumRow> = death
        .into_iter()
        .chain(black)
        .map(|entry| AlbumRow {
            album: entry.album,
            genre: entry.genre,
        })
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
    rows
}

// ── Tests ─────────────────────────────────────────────────────────────────────
