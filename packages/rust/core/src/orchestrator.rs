//! Strategy sequencing for a single target URL.
//!
//! One pass runs the lightweight strategy, then the browser strategy
//! only if needed. Exhaustion (both strategies ran and found nothing)
//! is a legitimate terminal outcome, not an error; the caller decides
//! whether to try a suggested alternate URL.

use tracing::{debug, info, instrument};
use url::Url;

use playscout_shared::{FetchOutcome, PageStrategy};

/// Result of one full orchestrator pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    /// Best-known title. `None` only when every strategy in the pass
    /// hard-failed, which is the catastrophic signal upstream.
    pub title: Option<String>,
    /// Canonical playlist URLs; empty on exhaustion.
    pub playlist_urls: Vec<String>,
}

/// Runs the two strategies in cost order against one URL at a time.
pub struct Orchestrator<'a> {
    lightweight: &'a dyn PageStrategy,
    rendered: &'a dyn PageStrategy,
}

impl<'a> Orchestrator<'a> {
    pub fn new(lightweight: &'a dyn PageStrategy, rendered: &'a dyn PageStrategy) -> Self {
        Self {
            lightweight,
            rendered,
        }
    }

    /// One pass: lightweight first, browser fallback on failure or an
    /// empty result. The most recent title produced by any strategy
    /// overwrites the running title.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn run_pass(&self, url: &Url) -> PassOutcome {
        let mut title: Option<String> = None;

        for strategy in [self.lightweight, self.rendered] {
            info!(strategy = strategy.name(), "attempting strategy");
            let outcome = strategy.fetch(url).await;

            if let Some(t) = outcome.title() {
                title = Some(t.to_string());
            }

            match outcome {
                FetchOutcome::Found { playlist_urls, .. } => {
                    return PassOutcome {
                        title,
                        playlist_urls,
                    };
                }
                FetchOutcome::Empty { .. } => {
                    debug!(strategy = strategy.name(), "strategy found nothing");
                }
                FetchOutcome::Failure => {
                    debug!(strategy = strategy.name(), "strategy hard-failed");
                }
            }
        }

        info!("both strategies exhausted without playlists");
        PassOutcome {
            title,
            playlist_urls: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubStrategy {
        name: &'static str,
        outcome: FetchOutcome,
        calls: AtomicUsize,
    }

    impl StubStrategy {
        fn new(name: &'static str, outcome: FetchOutcome) -> Self {
            Self {
                name,
                outcome,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PageStrategy for StubStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, _url: &Url) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    fn url() -> Url {
        Url::parse("https://x/ch/releases").unwrap()
    }

    fn found(title: &str, ids: &[&str]) -> FetchOutcome {
        FetchOutcome::Found {
            title: title.into(),
            playlist_urls: ids
                .iter()
                .map(|id| playscout_shared::playlist::canonical_url(id))
                .collect(),
        }
    }

    #[tokio::test]
    async fn lightweight_success_skips_browser() {
        let light = StubStrategy::new("http", found("My Channel", &["PLa"]));
        let heavy = StubStrategy::new("browser", FetchOutcome::Failure);

        let pass = Orchestrator::new(&light, &heavy).run_pass(&url()).await;

        assert_eq!(pass.title.as_deref(), Some("My Channel"));
        assert_eq!(pass.playlist_urls.len(), 1);
        assert_eq!(heavy.calls(), 0);
    }

    #[tokio::test]
    async fn transport_failure_still_attempts_browser() {
        let light = StubStrategy::new("http", FetchOutcome::Failure);
        let heavy = StubStrategy::new("browser", found("Rendered Title", &["PLb", "PLa"]));

        let pass = Orchestrator::new(&light, &heavy).run_pass(&url()).await;

        assert_eq!(light.calls(), 1);
        assert_eq!(heavy.calls(), 1);
        assert_eq!(pass.title.as_deref(), Some("Rendered Title"));
        assert_eq!(pass.playlist_urls.len(), 2);
    }

    #[tokio::test]
    async fn exhaustion_keeps_latest_title_and_is_not_an_error() {
        let light = StubStrategy::new(
            "http",
            FetchOutcome::Empty {
                title: "Static Title".into(),
            },
        );
        let heavy = StubStrategy::new(
            "browser",
            FetchOutcome::Empty {
                title: "Rendered Title".into(),
            },
        );

        let pass = Orchestrator::new(&light, &heavy).run_pass(&url()).await;

        // Most recent non-empty title wins.
        assert_eq!(pass.title.as_deref(), Some("Rendered Title"));
        assert!(pass.playlist_urls.is_empty());
    }

    #[tokio::test]
    async fn browser_hard_failure_keeps_lightweight_title() {
        let light = StubStrategy::new(
            "http",
            FetchOutcome::Empty {
                title: "Static Title".into(),
            },
        );
        let heavy = StubStrategy::new("browser", FetchOutcome::Failure);

        let pass = Orchestrator::new(&light, &heavy).run_pass(&url()).await;

        assert_eq!(pass.title.as_deref(), Some("Static Title"));
        assert!(pass.playlist_urls.is_empty());
    }

    #[tokio::test]
    async fn double_hard_failure_yields_no_title() {
        let light = StubStrategy::new("http", FetchOutcome::Failure);
        let heavy = StubStrategy::new("browser", FetchOutcome::Failure);

        let pass = Orchestrator::new(&light, &heavy).run_pass(&url()).await;

        assert!(pass.title.is_none());
        assert!(pass.playlist_urls.is_empty());
    }
}
