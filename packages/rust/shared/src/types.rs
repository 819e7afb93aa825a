//! Core domain types for Playscout.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

/// Title used when a strategy completes without recovering a real page
/// title. Also the base of the fallback output filename.
pub const PLACEHOLDER_TITLE: &str = "playlist_data";

// ---------------------------------------------------------------------------
// FetchOutcome
// ---------------------------------------------------------------------------

/// The tri-state result of one strategy invocation.
///
/// Modeled as an explicit tagged enum rather than two optionals so the
/// fallback logic in the orchestrator stays unambiguous:
/// - [`FetchOutcome::Failure`] — hard failure: the strategy could not even
///   determine a title. Recoverable as long as another strategy remains.
/// - [`FetchOutcome::Empty`] — soft failure: ran to completion, found
///   nothing. A valid basis for fallback, never for aborting.
/// - [`FetchOutcome::Found`] — success: non-empty, sorted, deduplicated
///   canonical playlist URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The strategy could not complete at all.
    Failure,
    /// The strategy ran but found no playlist references.
    Empty {
        /// Extracted page title, or [`PLACEHOLDER_TITLE`].
        title: String,
    },
    /// Playlist references were found.
    Found {
        /// Extracted page title.
        title: String,
        /// Canonical playlist URLs, sorted and deduplicated.
        playlist_urls: Vec<String>,
    },
}

impl FetchOutcome {
    /// The title carried by this outcome, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Failure => None,
            Self::Empty { title } | Self::Found { title, .. } => Some(title),
        }
    }

    /// True only for [`FetchOutcome::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

// ---------------------------------------------------------------------------
// Strategy and gate seams
// ---------------------------------------------------------------------------

/// One self-contained method of fetching a page and extracting playlist
/// references. Implementations absorb their own failures and convert
/// them to [`FetchOutcome`] data; `fetch` never errors.
#[async_trait]
pub trait PageStrategy: Send + Sync {
    /// Short name used in diagnostics ("http", "browser").
    fn name(&self) -> &'static str;

    /// Fetch the page and scan it for playlist references.
    async fn fetch(&self, url: &Url) -> FetchOutcome;
}

/// A yes/no prompt with a bounded wait and an explicit default.
#[async_trait]
pub trait ConfirmGate: Send + Sync {
    /// Present `prompt` on the diagnostic stream and wait up to
    /// `timeout` for an answer. Returns `true` for yes.
    async fn confirm(&self, prompt: &str, timeout: Duration) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_title_accessor() {
        assert_eq!(FetchOutcome::Failure.title(), None);
        assert_eq!(
            FetchOutcome::Empty {
                title: "My Channel".into()
            }
            .title(),
            Some("My Channel")
        );

        let found = FetchOutcome::Found {
            title: "My Channel".into(),
            playlist_urls: vec!["https://www.youtube.com/playlist?list=A".into()],
        };
        assert!(found.is_found());
        assert_eq!(found.title(), Some("My Channel"));
    }
}
