//! Extracts (band, album) pairs from a bulleted free-form text list, the
//! shape the Reddit essentials post uses in its selftext.

use crate::models::{Genre, TestAlbumEntry};
use regex::Regex;
use std::sync::LazyLock;

/// Numbered subsection headers: "7)", "7a)" at line start.
static SECTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[a-z]?\)").unwrap());

/// Extract test-album entries from a bulleted list, tagged with the fixed
/// genre for this source.
///
/// Only '*'-bulleted lines are candidates. Subsection headers and pairs
/// whose album starts with a digit are section titles, not entries; lines
/// without a " - " separator carry no pair and are skipped.
pub fn extract_album_pairs(text: &str, genre: Genre) -> Vec<TestAlbumEntry> {
    text.lines()
        .filter_map(parse_bullet_line)
        .map(|(band, album)| TestAlbumEntry {
            album,
            genre,
            band: Some(band),
        })
        .collect()
}

fn parse_bullet_line(line: &str) -> Option<(String, String)> {
    let rest = line.trim().strip_prefix('*')?.trim();

    if SECTION_HEADER_RE.is_match(rest) {
        return None;
    }

    let (band, album) = rest.split_once(" - ")?;
    let band = band.trim().to_string();
    let album = album.trim().to_string();

    if album.chars().next()?.is_ascii_digit() {
        return None;
    }

    Some((band, album))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulleted_pair_is_extracted() {
        let entries = extract_album_pairs("* Morbid Angel - Altars of Madness", Genre::DeathMetal);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].band.as_deref(), Some("Morbid Angel"));
        assert_eq!(entries[0].album, "Altars of Madness");
        assert_eq!(entries[0].genre, Genre::DeathMetal);
    }

    #[test]
    fn test_unbulleted_line_is_skipped() {
        assert!(extract_album_pairs("7a) Technical Death Metal", Genre::DeathMetal).is_empty());
    }

    #[test]
    fn test_bulleted_section_header_is_rejected() {
        assert!(extract_album_pairs("* 7a) Technical Death Metal", Genre::DeathMetal).is_empty());
        assert!(extract_album_pairs("* 12) Old School", Genre::DeathMetal).is_empty());
    }

    #[test]
    fn test_numeric_album_is_rejected() {
        assert!(extract_album_pairs("* Entombed - 1991", Genre::DeathMetal).is_empty());
    }

    #[test]
    fn test_line_without_separator_is_skipped() {
        assert!(extract_album_pairs("* Just a band name", Genre::DeathMetal).is_empty());
    }

    #[test]
    fn test_mixed_list() {
        let text = "\
Intro paragraph, not a bullet.

* 1) Foundations
* Death - Leprosy
* Autopsy - Severed Survival
random chatter
* Entombed - 1991";

        let entries = extract_album_pairs(text, Genre::DeathMetal);
        let albums: Vec<&str> = entries.iter().map(|e| e.album.as_str()).collect();
        assert_eq!(albums, vec!["Leprosy", "Severed Survival"]);
    }
}
