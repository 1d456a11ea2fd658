pub mod cleaner;
pub mod freeform;
pub mod http_client;
pub mod parsers;

use crate::config::{ScoreTag, ScraperConfig};
use crate::models::ReviewRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::info;
use url::Url;

use self::http_client::{FetchError, HttpClient};
use self::parsers::parse_review_page;

// ── Source trait ──────────────────────────────────────────────────────────────

/// Swappable review source abstraction.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// All reviews for one score category, across its listing pages.
    async fn fetch_score_category(&self, tag: &ScoreTag) -> Result<Vec<ReviewRecord>>;
}

// ── Angry Metal Guy scraper ───────────────────────────────────────────────────

pub struct AmgScraper {
    client: HttpClient,
}

impl AmgScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    /// URL of the n-th listing page of a category: `<tag URL>page/<n>/`.
    fn page_url(tag_url: &str, page: u32) -> Result<String> {
        let base = Url::parse(tag_url).with_context(|| format!("Bad tag URL {}", tag_url))?;
        let url = base
            .join(&format!("page/{}/", page))
            .with_context(|| format!("Bad page path for {}", tag_url))?;
        Ok(url.to_string())
    }
}

#[async_trait]
impl ReviewSource for AmgScraper {
    /// Walks `page/1/`, `page/2/`, … until the site answers with a
    /// non-success status or a page without review blocks — both are normal
    /// category termination, not errors. Transport failures propagate.
    async fn fetch_score_category(&self, tag: &ScoreTag) -> Result<Vec<ReviewRecord>> {
        let mut records = Vec::new();
        let mut page = 1u32;

        loop {
            let url = Self::page_url(&tag.url, page)?;
            info!("Scraping {} (score {})", url, tag.score);

            let html = match self.client.get_text(&url).await {
                Ok(html) => html,
                Err(FetchError::Status(status)) => {
                    info!(
                        "Page {} returned status {}, stopping for score {}",
                        page, status, tag.score
                    );
                    break;
                }
                Err(err) => {
                    return Err(err).with_context(|| format!("Failed to fetch {}", url));
                }
            };

            let page_records = parse_review_page(&html, tag.score)?;
            if page_records.is_empty() {
                info!("No more reviews found, moving to next score tag");
                break;
            }
            records.extend(page_records);

            page += 1;
            self.client.polite_delay().await;
        }

        Ok(records)
    }
}
