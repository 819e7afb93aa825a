//! Sibling-URL suggestion for listing pages.
//!
//! Channel pages expose two list-type tabs with the same content model:
//! `.../releases` and `.../playlists`. When one yields nothing, the
//! other is worth offering as a single alternate attempt.

use url::Url;

/// The two recognized trailing list-type path segments.
const LIST_SEGMENTS: [&str; 2] = ["releases", "playlists"];

/// Propose the sibling listing URL, if the path ends in a recognized
/// list-type segment (ignoring a trailing slash).
///
/// Pure function: preserves scheme, host, query, and fragment; returns
/// `None` when no suggestion is possible.
pub fn suggest_alternate(url: &Url) -> Option<Url> {
    let path = url.path().trim_end_matches('/');
    let (prefix, last) = path.rsplit_once('/')?;

    let replacement = if last == LIST_SEGMENTS[0] {
        LIST_SEGMENTS[1]
    } else if last == LIST_SEGMENTS[1] {
        LIST_SEGMENTS[0]
    } else {
        return None;
    };

    let mut suggested = url.clone();
    suggested.set_path(&format!("{prefix}/{replacement}"));
    Some(suggested)
}
