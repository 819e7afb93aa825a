//! Browser-driven fetch strategy.
//!
//! The heavyweight fallback: render the page in headless Chrome, get
//! past the consent dialog, wait for the listing grid, then harvest
//! anchors. Every wait is independently bounded; a timeout downgrades
//! the step rather than aborting the run.

use std::future::Future;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::page::Page;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use playscout_shared::playlist::canonicalize_hrefs;
use playscout_shared::{
    AppConfig, FetchOutcome, PLACEHOLDER_TITLE, PageStrategy, PlayscoutError, Result,
};

use crate::session::BrowserSession;

/// Selector for the rendered listing container. The grid renderer is
/// more stable than the individual item selectors.
const LISTING_SELECTOR: &str = "ytd-rich-grid-renderer";

/// Finds and clicks the consent-acceptance control; evaluates to true
/// once a click happened.
const CONSENT_CLICK_JS: &str = r#"
(() => {
    const button = Array.from(document.querySelectorAll('button'))
        .find(b => (b.textContent || '').trim().toLowerCase().startsWith('accept all'));
    if (button) { button.click(); return true; }
    return false;
})()
"#;

/// Collects hrefs of all anchors referencing a playlist-list parameter.
const PLAYLIST_HREFS_JS: &str = r#"
Array.from(document.querySelectorAll('a[href*="list="]'))
    .map(a => a.getAttribute('href') || '')
"#;

/// How often bounded waits re-check their condition.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

// ---------------------------------------------------------------------------
// BrowserProbe
// ---------------------------------------------------------------------------

/// The browser-rendered strategy.
pub struct BrowserProbe {
    config: AppConfig,
}

impl BrowserProbe {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Run the bounded navigate/consent/wait/extract sequence.
    ///
    /// Timeouts are converted to soft outcomes here; any error that
    /// escapes is a non-timeout failure handled at the strategy
    /// boundary. The session itself is owned by the caller so teardown
    /// happens on every path.
    async fn drive(&self, session: &BrowserSession, url: &Url) -> Result<FetchOutcome> {
        let timeouts = &self.config.timeouts;
        let page = session.new_page().await?;

        // Step 1: navigate and wait for the load to settle.
        let navigation = tokio::time::timeout(timeouts.navigation(), async {
            page.goto(url.as_str()).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        })
        .await;

        match navigation {
            Err(_elapsed) => {
                warn!(%url, "navigation timed out; nothing rendered to extract");
                return Ok(FetchOutcome::Empty {
                    title: PLACEHOLDER_TITLE.to_string(),
                });
            }
            Ok(Err(e)) => {
                return Err(PlayscoutError::Browser(format!("{url}: navigation: {e}")));
            }
            Ok(Ok(())) => {}
        }

        // Step 2: consent dialog, if any. Absence is the common case.
        let clicked = poll_until(
            || {
                let page = page.clone();
                async move { eval_bool(&page, CONSENT_CLICK_JS).await }
            },
            timeouts.consent(),
        )
        .await;

        if clicked {
            debug!("consent form submitted");
            // The click reloads the page; give it a bounded settle.
            let settled = poll_until(
                || {
                    let page = page.clone();
                    async move { eval_bool(&page, "document.readyState === 'complete'").await }
                },
                timeouts.consent_reload(),
            )
            .await;
            if !settled {
                debug!("post-consent reload did not settle in time");
            }
        } else {
            debug!("no consent dialog found");
        }

        // Step 3: wait for the listing container to render.
        let listing_script = format!("!!document.querySelector('{LISTING_SELECTOR}')");
        let rendered = poll_until(
            || {
                let page = page.clone();
                let script = listing_script.clone();
                async move { eval_bool(&page, &script).await }
            },
            timeouts.listing(),
        )
        .await;

        if !rendered {
            warn!(%url, selector = LISTING_SELECTOR, "listing container never appeared");
            return Ok(FetchOutcome::Empty {
                title: PLACEHOLDER_TITLE.to_string(),
            });
        }

        // Step 4: harvest anchors and the rendered title.
        let hrefs: Vec<String> = page
            .evaluate(PLAYLIST_HREFS_JS)
            .await
            .map_err(|e| PlayscoutError::Browser(format!("anchor collection: {e}")))?
            .into_value()
            .map_err(|e| PlayscoutError::Browser(format!("anchor decode: {e}")))?;

        let playlist_urls = canonicalize_hrefs(&hrefs);

        let title: String = page
            .evaluate("document.title")
            .await
            .map_err(|e| PlayscoutError::Browser(format!("title read: {e}")))?
            .into_value()
            .unwrap_or_default();
        let title = if title.trim().is_empty() {
            PLACEHOLDER_TITLE.to_string()
        } else {
            title.trim().to_string()
        };

        if playlist_urls.is_empty() {
            return Ok(FetchOutcome::Empty { title });
        }

        Ok(FetchOutcome::Found {
            title,
            playlist_urls,
        })
    }
}

#[async_trait]
impl PageStrategy for BrowserProbe {
    fn name(&self) -> &'static str {
        "browser"
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        let session = match BrowserSession::launch(&self.config).await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "browser session launch failed");
                return FetchOutcome::Failure;
            }
        };

        let outcome = self.drive(&session, url).await;

        // Teardown happens before the outcome is inspected, so failures
        // never leak a Chrome process.
        if let Err(e) = session.close().await {
            debug!(error = %e, "ignoring close failure");
        }

        match outcome {
            Ok(outcome) => {
                if let FetchOutcome::Found { playlist_urls, .. } = &outcome {
                    info!(count = playlist_urls.len(), "playlists found via browser");
                }
                outcome
            }
            Err(e) => {
                warn!(error = %e, "browser fetch failed");
                FetchOutcome::Failure
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bounded waiting
// ---------------------------------------------------------------------------

/// Evaluate a script expected to yield a boolean; evaluation errors
/// count as "not yet" so transient CDP hiccups don't abort a wait.
async fn eval_bool(page: &Page, script: &str) -> bool {
    match page.evaluate(script).await {
        Ok(result) => result
            .value()
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false),
        Err(e) => {
            debug!(error = %e, "condition evaluation failed");
            false
        }
    }
}

/// Poll `condition` until it holds or `timeout` expires. Returns
/// whether the condition was met.
async fn poll_until<F, Fut>(condition: F, timeout: Duration) -> bool
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    loop {
        if condition().await {
            return true;
        }
        if start.elapsed() >= timeout {
            return false;
        }
        sleep(POLL_INTERVAL).await;
    }
}
