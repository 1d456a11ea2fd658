use serde::{Deserialize, Serialize};
use std::fmt;

// ── Genre ─────────────────────────────────────────────────────────────────────

/// The two genres the test splits are built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "Death Metal")]
    DeathMetal,
    #[serde(rename = "Black Metal")]
    BlackMetal,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Genre::DeathMetal => write!(f, "Death Metal"),
            Genre::BlackMetal => write!(f, "Black Metal"),
        }
    }
}

// ── Review record ─────────────────────────────────────────────────────────────

/// One album review scraped from a listing page.
///
/// `genres` holds the full ", "-joined tag list in link order; cleaning
/// reduces it to the first entry. `score` is one of the ten discrete values
/// of the category mapping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ReviewRecord {
    pub band: String,
    pub album: String,
    pub genres: String,
    pub score: f64,
}

// ── Band test-split entry ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BandEntry {
    pub band: String,
    pub genre: Genre,
}

// ── Album test-split entries ──────────────────────────────────────────────────

/// A candidate album for the test split. `band` is only present for the
/// Reddit source and is dropped before the final merge.
#[derive(Debug, Clone, PartialEq)]
pub struct TestAlbumEntry {
    pub album: String,
    pub genre: Genre,
    pub band: Option<String>,
}

/// Final album test-split row, post-merge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AlbumRow {
    pub album: String,
    pub genre: Genre,
}

// ── Reddit wire shapes ────────────────────────────────────────────────────────

/// Minimal slice of the Reddit `.json` listing payload: just enough to reach
/// the selftext of the first post.
#[derive(Debug, Deserialize)]
pub struct RedditListing {
    pub data: RedditListingData,
}

#[derive(Debug, Deserialize)]
pub struct RedditListingData {
    #[serde(default)]
    pub children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
pub struct RedditChild {
    pub data: RedditPost,
}

#[derive(Debug, Deserialize)]
pub struct RedditPost {
    #[serde(default)]
    pub selftext: String,
}
