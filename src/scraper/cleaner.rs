//! Pure cleaning functions: raw scrape output → normalized datasets.
//! No I/O; inputs are never mutated.

use crate::models::{BandEntry, ReviewRecord};
use std::collections::{BTreeSet, HashSet};

// ── Review cleaning ───────────────────────────────────────────────────────────

/// Clean raw review records: keep the first genre only, strip the " Review"
/// suffix from album titles, normalize Black/Death genre variants.
pub fn clean_reviews(records: &[ReviewRecord]) -> Vec<ReviewRecord> {
    records.iter().map(clean_review).collect()
}

fn clean_review(record: &ReviewRecord) -> ReviewRecord {
    ReviewRecord {
        band: record.band.clone(),
        album: strip_review_suffix(&record.album),
        genres: normalise_genre(first_genre(&record.genres)),
        score: record.score,
    }
}

/// First entry of the ", "-joined tag list; empty if there is none.
fn first_genre(genres: &str) -> &str {
    genres.split(',').next().unwrap_or("")
}

/// Drop one trailing " Review" suffix (case-sensitive, end-anchored).
pub fn strip_review_suffix(album: &str) -> String {
    album.strip_suffix(" Review").unwrap_or(album).to_string()
}

/// Substring-based genre normalization. "Black Metal" wins over
/// "Death Metal"; anything else passes through unchanged.
pub fn normalise_genre(genre: &str) -> String {
    if genre.contains("Black Metal") {
        "Black Metal".to_string()
    } else if genre.contains("Death Metal") {
        "Death Metal".to_string()
    } else {
        genre.to_string()
    }
}

// ── Band-list cleaning ────────────────────────────────────────────────────────

/// Filter the unstructured list-item superset: drops empties, the "0–9"
/// section header, and single uppercase letters (section markers); keeps
/// only entries starting with an ASCII uppercase letter or digit.
pub fn clean_band_list(bands: &[String]) -> Vec<String> {
    bands
        .iter()
        .map(|band| band.trim())
        .filter(|band| keep_band(band))
        .map(str::to_string)
        .collect()
}

fn keep_band(band: &str) -> bool {
    if band.is_empty() || band == "0–9" {
        return false;
    }

    let mut chars = band.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    // A lone uppercase letter is a section header, not a band.
    if first.is_ascii_uppercase() && chars.next().is_none() {
        return false;
    }

    first.is_ascii_uppercase() || first.is_ascii_digit()
}

/// Exact-match dedup + lexical ascending sort.
pub fn dedup_sorted(bands: Vec<String>) -> Vec<String> {
    bands
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Anti-join: drop entries whose band name exactly matches one in the
/// reference set.
pub fn anti_join(entries: Vec<BandEntry>, known: &HashSet<String>) -> Vec<BandEntry> {
    entries
        .into_iter()
        .filter(|entry| !known.contains(&entry.band))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Genre;

    fn record(band: &str, album: &str, genres: &str, score: f64) -> ReviewRecord {
        ReviewRecord {
            band: band.to_string(),
            album: album.to_string(),
            genres: genres.to_string(),
            score,
        }
    }

    #[test]
    fn test_clean_keeps_first_genre_only() {
        let raw = vec![record("Ulcerate", "Cutted", "Death Metal, Technical Death Metal", 4.0)];
        let clean = clean_reviews(&raw);
        assert_eq!(clean[0].genres, "Death Metal");
    }

    #[test]
    fn test_strip_review_suffix() {
        assert_eq!(strip_review_suffix("Sunbather Review"), "Sunbather");
        assert_eq!(strip_review_suffix("Panopticon"), "Panopticon");
        assert_eq!(strip_review_suffix("Reviewer"), "Reviewer");
    }

    #[test]
    fn test_normalise_genre_black_wins_over_death() {
        assert_eq!(normalise_genre("Melodic Black Metal"), "Black Metal");
        assert_eq!(normalise_genre("Melodic Black Metal/Death Metal"), "Black Metal");
        assert_eq!(normalise_genre("Technical Death Metal"), "Death Metal");
        assert_eq!(normalise_genre("Progressive Metal"), "Progressive Metal");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let raw = vec![
            record("Deafheaven", "Sunbather Review", "Post-Black Metal, Shoegaze", 4.5),
            record("Gorguts", "Colored Sands Review", "Technical Death Metal", 5.0),
            record("Unknown", "", "", 2.5),
        ];
        let once = clean_reviews(&raw);
        let twice = clean_reviews(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_does_not_mutate_input() {
        let raw = vec![record("Deafheaven", "Sunbather Review", "Black Metal, Shoegaze", 4.5)];
        let _ = clean_reviews(&raw);
        assert_eq!(raw[0].album, "Sunbather Review");
        assert_eq!(raw[0].genres, "Black Metal, Shoegaze");
    }

    #[test]
    fn test_clean_band_list_drops_header_artifacts() {
        let bands: Vec<String> = ["0–9", "A", "", "Abigail", "Zorn"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(clean_band_list(&bands), vec!["Abigail", "Zorn"]);
    }

    #[test]
    fn test_clean_band_list_requires_uppercase_or_digit_start() {
        let bands: Vec<String> = ["1349", "deafheaven", "Émyn Muil", "Taake"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(clean_band_list(&bands), vec!["1349", "Taake"]);
    }

    #[test]
    fn test_dedup_sorted() {
        let bands = vec![
            "Zorn".to_string(),
            "Abigail".to_string(),
            "Zorn".to_string(),
        ];
        assert_eq!(dedup_sorted(bands), vec!["Abigail", "Zorn"]);
    }

    #[test]
    fn test_anti_join_removes_known_bands() {
        let entries = vec![
            BandEntry { band: "Morbid Angel".to_string(), genre: Genre::DeathMetal },
            BandEntry { band: "Gorguts".to_string(), genre: Genre::DeathMetal },
        ];
        let known: HashSet<String> = ["Morbid Angel".to_string()].into_iter().collect();

        let kept = anti_join(entries, &known);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].band, "Gorguts");
    }
}
