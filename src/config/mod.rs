use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub scraper: ScraperConfig,
    pub sources: SourcesConfig,
    pub output: OutputConfig,
}

/// Scraper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    #[serde(default = "default_jitter_ms")]
    pub jitter_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// One review-site score category: a tag page URL and the discrete score
/// every review listed under it carries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreTag {
    pub url: String,
    pub score: f64,
}

/// Source URL configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default = "default_score_tags")]
    pub score_tags: Vec<ScoreTag>,

    #[serde(default = "default_death_list_urls")]
    pub death_list_urls: Vec<String>,

    #[serde(default = "default_black_list_urls")]
    pub black_list_urls: Vec<String>,

    #[serde(default = "default_reddit_post_url")]
    pub reddit_post_url: String,

    #[serde(default = "default_chart_url")]
    pub chart_url: String,
}

/// Output file configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_raw_reviews_path")]
    pub raw_reviews_path: PathBuf,

    #[serde(default = "default_clean_reviews_path")]
    pub clean_reviews_path: PathBuf,

    #[serde(default = "default_bands_test_path")]
    pub bands_test_path: PathBuf,

    #[serde(default = "default_albums_test_path")]
    pub albums_test_path: PathBuf,

    /// Anti-join reference: the training set the band split must stay
    /// disjoint from. Defaults to the cleaned reviews file.
    #[serde(default = "default_clean_reviews_path")]
    pub training_reviews_path: PathBuf,

    #[serde(default = "default_shuffle_seed")]
    pub shuffle_seed: u64,
}

// ── Defaults ─────────────────────────────────────────────────────────────────

fn default_timeout_secs() -> u64 {
    30
}
fn default_request_delay_ms() -> u64 {
    1000
}
fn default_jitter_ms() -> u64 {
    250
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/116.0 Safari/537.36"
        .to_string()
}

fn default_score_tags() -> Vec<ScoreTag> {
    // Tag slugs are not uniform on the site: most scores drop the decimal
    // point, 2.5/1.0/0.5 keep a dash. Kept as a literal table.
    [
        ("https://www.angrymetalguy.com/tag/50/", 5.0),
        ("https://www.angrymetalguy.com/tag/45/", 4.5),
        ("https://www.angrymetalguy.com/tag/40/", 4.0),
        ("https://www.angrymetalguy.com/tag/35/", 3.5),
        ("https://www.angrymetalguy.com/tag/30/", 3.0),
        ("https://www.angrymetalguy.com/tag/2-5/", 2.5),
        ("https://www.angrymetalguy.com/tag/20/", 2.0),
        ("https://www.angrymetalguy.com/tag/15/", 1.5),
        ("https://www.angrymetalguy.com/tag/1-0/", 1.0),
        ("https://www.angrymetalguy.com/tag/0-5/", 0.5),
    ]
    .into_iter()
    .map(|(url, score)| ScoreTag {
        url: url.to_string(),
        score,
    })
    .collect()
}

fn default_death_list_urls() -> Vec<String> {
    vec![
        "https://en.wikipedia.org/wiki/List_of_death_metal_bands,_!%E2%80%93K".to_string(),
        "https://en.wikipedia.org/wiki/List_of_death_metal_bands,_L%E2%80%93Z".to_string(),
    ]
}

fn default_black_list_urls() -> Vec<String> {
    vec![
        "https://en.wikipedia.org/wiki/List_of_black_metal_bands,_0%E2%80%93K".to_string(),
        "https://en.wikipedia.org/wiki/List_of_black_metal_bands,_L%E2%80%93Z".to_string(),
    ]
}

fn default_reddit_post_url() -> String {
    "https://www.reddit.com/r/Metal/comments/1g0dcv/essential_death_metal_albums/.json".to_string()
}

fn default_chart_url() -> String {
    "https://www.albumoftheyear.org/genre/34-black-metal/".to_string()
}

fn default_raw_reviews_path() -> PathBuf {
    PathBuf::from("data/amg_reviews_raw.csv")
}
fn default_clean_reviews_path() -> PathBuf {
    PathBuf::from("data/amg_reviews_clean.csv")
}
fn default_bands_test_path() -> PathBuf {
    PathBuf::from("data/bands_test.csv")
}
fn default_albums_test_path() -> PathBuf {
    PathBuf::from("data/albums_test.csv")
}
fn default_shuffle_seed() -> u64 {
    42
}

// ── Loader ───────────────────────────────────────────────────────────────────

impl AppConfig {
    /// Load configuration from file + environment overrides
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let cfg = config::Config::builder()
            .add_source(
                config::File::with_name("config/default")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(
                config::File::with_name("config/local")
                    .required(false)
                    .format(config::FileFormat::Toml),
            )
            .add_source(config::Environment::with_prefix("AMG").separator("__"))
            .build()?;

        let app_cfg: AppConfig = cfg.try_deserialize().unwrap_or_else(|_| AppConfig::default());
        Ok(app_cfg)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig {
                timeout_secs: default_timeout_secs(),
                request_delay_ms: default_request_delay_ms(),
                jitter_ms: default_jitter_ms(),
                user_agent: default_user_agent(),
            },
            sources: SourcesConfig {
                score_tags: default_score_tags(),
                death_list_urls: default_death_list_urls(),
                black_list_urls: default_black_list_urls(),
                reddit_post_url: default_reddit_post_url(),
                chart_url: default_chart_url(),
            },
            output: OutputConfig {
                raw_reviews_path: default_raw_reviews_path(),
                clean_reviews_path: default_clean_reviews_path(),
                bands_test_path: default_bands_test_path(),
                albums_test_path: default_albums_test_path(),
                training_reviews_path: default_clean_reviews_path(),
                shuffle_seed: default_shuffle_seed(),
            },
        }
    }
}
