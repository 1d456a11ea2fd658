use crate::models::{RedditListing, ReviewRecord};
use anyhow::{Context, Result};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;

/// The glyph the review site uses between band and album in entry titles.
/// It is the field delimiter during parsing and never survives into output.
pub const TITLE_SEPARATOR: char = '–';

static YEAR_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)$").unwrap());

fn sel(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| anyhow::anyhow!("selector {}: {:?}", s, e))
}

fn element_text(el: &scraper::ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// ── Review listing page ───────────────────────────────────────────────────────

/// Split a review title on the first separator into (band, album).
///
/// Titles without the separator are all band, album empty. Both sides are
/// trimmed.
pub fn split_title(title: &str) -> (String, String) {
    match title.split_once(TITLE_SEPARATOR) {
        Some((band, album)) => (band.trim().to_string(), album.trim().to_string()),
        None => (title.trim().to_string(), String::new()),
    }
}

/// Parse one listing page of a score category into review records.
///
/// Review blocks are `<article>` elements carrying the `category-reviews`
/// class. A block without a title yields the placeholder band "Unknown";
/// a block without a metadata region yields an empty genre list.
pub fn parse_review_page(html: &str, score: f64) -> Result<Vec<ReviewRecord>> {
    let doc = Html::parse_document(html);

    let article_sel = sel("article.category-reviews")?;
    let title_sel = sel("h2.entry-title")?;
    let meta_sel = sel("div.entry-meta")?;
    let a_sel = sel("a")?;

    let mut records = Vec::new();

    for article in doc.select(&article_sel) {
        let (band, album) = match article.select(&title_sel).next() {
            Some(title) => split_title(&element_text(&title)),
            None => ("Unknown".to_string(), String::new()),
        };

        // Genre tags, in link order. Only links into the tag namespace count.
        let genres: Vec<String> = article
            .select(&meta_sel)
            .next()
            .map(|meta| {
                meta.select(&a_sel)
                    .filter(|a| {
                        a.value()
                            .attr("href")
                            .map(|href| href.contains("/tag/"))
                            .unwrap_or(false)
                    })
                    .map(|a| element_text(&a))
                    .collect()
            })
            .unwrap_or_default();

        records.push(ReviewRecord {
            band,
            album,
            genres: genres.join(", "),
            score,
        });
    }

    Ok(records)
}

// ── Wikipedia band lists ──────────────────────────────────────────────────────

/// Structured strategy: list items inside the two-column `div.div-col`
/// containers. Trailing bracketed citation markers are dropped.
pub fn parse_band_columns(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let col_sel = sel("div.div-col")?;
    let li_sel = sel("li")?;

    let mut bands = Vec::new();
    for col in doc.select(&col_sel) {
        for li in col.select(&li_sel) {
            bands.push(strip_citation(&li.text().collect::<String>()));
        }
    }
    Ok(bands)
}

/// Unstructured strategy: every list item on the page. This is a superset
/// including navigation and header noise; `cleaner::clean_band_list` filters
/// it afterwards.
pub fn parse_all_list_items(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let li_sel = sel("li")?;

    Ok(doc
        .select(&li_sel)
        .map(|li| strip_citation(&li.text().collect::<String>()))
        .collect())
}

/// "Abigail[2]" → "Abigail"
fn strip_citation(text: &str) -> String {
    text.split('[').next().unwrap_or("").trim().to_string()
}

// ── Album chart page ──────────────────────────────────────────────────────────

/// Release names from the chart page, one per release-name container link.
pub fn parse_chart_releases(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    let name_sel = sel(".albumListTitle a")?;

    Ok(doc
        .select(&name_sel)
        .map(|a| strip_year_suffix(&element_text(&a)))
        .collect())
}

/// "De Mysteriis Dom Sathanas (1994)" → "De Mysteriis Dom Sathanas"
pub fn strip_year_suffix(name: &str) -> String {
    YEAR_SUFFIX_RE.replace(name.trim(), "").to_string()
}

// ── Reddit listing payload ────────────────────────────────────────────────────

/// Selftext of the first post in a Reddit listing payload.
///
/// The `.json` endpoint returns an array of listings; the post itself is the
/// first child of the first listing. A malformed body is fatal.
pub fn parse_reddit_selftext(body: &str) -> Result<String> {
    let listings: Vec<RedditListing> =
        serde_json::from_str(body).context("Malformed Reddit listing payload")?;

    let post = listings
        .first()
        .and_then(|l| l.data.children.first())
        .context("Reddit listing has no posts")?;

    Ok(post.data.selftext.clone())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_title_on_separator() {
        let (band, album) = split_title("Fell Voices – Regnum Saturni Review");
        assert_eq!(band, "Fell Voices");
        assert_eq!(album, "Regnum Saturni Review");
    }

    #[test]
    fn test_split_title_rejoin_round_trip() {
        let original = "Gorguts – Colored Sands";
        let (band, album) = split_title(original);
        assert_eq!(format!("{} {} {}", band, TITLE_SEPARATOR, album), original);
    }

    #[test]
    fn test_split_title_without_separator() {
        let (band, album) = split_title("  Record o' the Month  ");
        assert_eq!(band, "Record o' the Month");
        assert_eq!(album, "");
    }

    #[test]
    fn test_split_title_keeps_later_separators_in_album() {
        let (band, album) = split_title("Band – Album – Deluxe");
        assert_eq!(band, "Band");
        assert_eq!(album, "Album – Deluxe");
    }

    const LISTING_PAGE: &str = r#"
        <html><body>
        <article class="post category-reviews">
            <h2 class="entry-title"><a href="/x">Sulphur Aeon – Seven Crowns Review</a></h2>
            <div class="entry-meta">
                <a href="/author/steel/">Steel Druhm</a>
                <a href="/tag/death-metal/">Death Metal</a>
                <a href="/tag/45/">4.5</a>
            </div>
        </article>
        <article class="post category-reviews">
            <div class="entry-meta"></div>
        </article>
        <article class="post category-news">
            <h2 class="entry-title">Not a review</h2>
        </article>
        </body></html>"#;

    #[test]
    fn test_parse_review_page_extracts_review_blocks_only() {
        let records = parse_review_page(LISTING_PAGE, 4.5).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].band, "Sulphur Aeon");
        assert_eq!(records[0].album, "Seven Crowns Review");
        assert_eq!(records[0].genres, "Death Metal, 4.5");
        assert_eq!(records[0].score, 4.5);
    }

    #[test]
    fn test_parse_review_page_missing_title_is_unknown() {
        let records = parse_review_page(LISTING_PAGE, 4.5).unwrap();
        assert_eq!(records[1].band, "Unknown");
        assert_eq!(records[1].album, "");
        assert_eq!(records[1].genres, "");
    }

    #[test]
    fn test_parse_review_page_empty_page_yields_no_records() {
        let records = parse_review_page("<html><body></body></html>", 3.0).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_band_columns_strips_citations() {
        let html = r#"
            <div class="div-col">
                <ul><li>Abigail[1]</li><li> Gorguts </li></ul>
            </div>
            <ul><li>Navigation noise</li></ul>"#;
        let bands = parse_band_columns(html).unwrap();
        assert_eq!(bands, vec!["Abigail", "Gorguts"]);
    }

    #[test]
    fn test_parse_all_list_items_is_a_superset() {
        let html = r#"
            <div class="div-col"><ul><li>Abigail</li></ul></div>
            <ul><li>Main page</li></ul>"#;
        let items = parse_all_list_items(html).unwrap();
        assert_eq!(items, vec!["Abigail", "Main page"]);
    }

    #[test]
    fn test_parse_chart_releases_strips_year() {
        let html = r#"
            <div class="albumListTitle"><a href="/a/1">Filosofem (1996)</a></div>
            <div class="albumListTitle"><a href="/a/2">Hvis lyset tar oss</a></div>"#;
        let releases = parse_chart_releases(html).unwrap();
        assert_eq!(releases, vec!["Filosofem", "Hvis lyset tar oss"]);
    }

    #[test]
    fn test_strip_year_suffix_only_at_end() {
        assert_eq!(strip_year_suffix("1349 (2004)"), "1349");
        assert_eq!(strip_year_suffix("(1996) Filosofem"), "(1996) Filosofem");
        assert_eq!(strip_year_suffix("Panopticon"), "Panopticon");
    }

    #[test]
    fn test_parse_reddit_selftext() {
        let body = r#"[{"data":{"children":[{"data":{"selftext":"* A - B"}}]}}]"#;
        assert_eq!(parse_reddit_selftext(body).unwrap(), "* A - B");
    }

    #[test]
    fn test_parse_reddit_selftext_malformed_is_fatal() {
        assert!(parse_reddit_selftext("not json").is_err());
        assert!(parse_reddit_selftext("[]").is_err());
    }
}
