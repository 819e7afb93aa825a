//! Playlist identifier extraction and canonicalization.
//!
//! A playlist identifier is the opaque token from a `list=` query
//! parameter or a `/playlist?list=` path. Identity is the token string:
//! two URLs carrying the same token are the same playlist and collapse
//! to one entry before the final lexicographic sort.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Host used when rendering identifiers back to canonical URLs.
pub const CANONICAL_HOST: &str = "www.youtube.com";

/// Matches a playlist token inside any `list=` parameter.
static LIST_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"list=([A-Za-z0-9_-]+)").expect("list param regex"));

/// Matches quoted `/playlist?list=<id>` references in raw HTML. This is
/// what static pages expose; script-rendered pages won't match and fall
/// through to the browser strategy.
static HTML_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']/playlist\?list=([A-Za-z0-9_-]+)["']"#).expect("html ref regex")
});

/// First `<title>` tag, case-insensitive, possibly spanning lines.
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"<title>(.*?)</title>")
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("title regex")
});

/// Render an identifier back to its canonical absolute URL.
pub fn canonical_url(id: &str) -> String {
    format!("https://{CANONICAL_HOST}/playlist?list={id}")
}

/// Extract the playlist token from a single href, if present.
pub fn id_from_href(href: &str) -> Option<String> {
    LIST_PARAM_RE
        .captures(href)
        .map(|caps| caps[1].to_string())
}

/// Scan a raw HTML body for quoted `/playlist?list=` references and
/// return the canonical URL set, sorted and deduplicated.
pub fn scan_html_body(body: &str) -> Vec<String> {
    let ids: BTreeSet<String> = HTML_REF_RE
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect();
    ids.iter().map(|id| canonical_url(id)).collect()
}

/// Deduplicate a sequence of hrefs into sorted canonical URLs.
pub fn canonicalize_hrefs<I, S>(hrefs: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ids: BTreeSet<String> = hrefs
        .into_iter()
        .filter_map(|href| id_from_href(href.as_ref()))
        .collect();
    ids.iter().map(|id| canonical_url(id)).collect()
}

/// Extract the first `<title>` text from an HTML body, trimmed.
pub fn extract_title(body: &str) -> Option<String> {
    TITLE_RE
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|t| !t.is_empty())
}
