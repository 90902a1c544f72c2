use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;

use crate::models::{MatchSet, Query};

static CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.product-container").expect("valid container selector"));
static TITLE_HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"h5[itemprop="name"]"#).expect("valid heading selector"));
static PRODUCT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.product-name").expect("valid link selector"));

static MLC_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(MLC\)\s*").expect("valid prefix pattern"));
static TRAILING_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{3,}$").expect("valid ellipsis pattern"));

/// Collects the cleaned titles of every listing on the page that satisfies `query`.
///
/// Listings without a heading, link or `title` attribute are skipped.
pub fn extract_matches(html: &str, query: &Query) -> MatchSet {
    let document = Html::parse_document(html);

    let mut containers = 0usize;
    let matches: MatchSet = document
        .select(&CONTAINER)
        .inspect(|_| containers += 1)
        .filter_map(listing_title)
        .filter(|title| query.matches(title))
        .map(clean_product_title)
        .collect();

    debug!(
        "Scanned {} product containers, {} distinct matches",
        containers,
        matches.len()
    );
    matches
}

/// container -> `h5[itemprop=name]` -> `a.product-name` -> `title`
fn listing_title(container: ElementRef<'_>) -> Option<&str> {
    let heading = container.select(&TITLE_HEADING).next()?;
    let link = heading.select(&PRODUCT_LINK).next()?;
    link.value().attr("title")
}

/// Normalizes a listing title for display.
///
/// Whitespace (newlines and tabs included) collapses to single spaces, a leading
/// `(MLC)` marker and a trailing `...` are dropped. Applied until stable, so the
/// result is a fixed point.
pub fn clean_product_title(title: &str) -> String {
    let mut current = clean_once(title);
    loop {
        let next = clean_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_once(title: &str) -> String {
    let collapsed = title.split_whitespace().collect::<Vec<_>>().join(" ");
    let without_marker = MLC_PREFIX.replace(&collapsed, "");
    let without_dots = TRAILING_DOTS.replace(&without_marker, "");
    without_dots.trim().to_string()
}
