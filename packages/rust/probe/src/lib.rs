//! Lightweight HTTP fetch strategy.
//!
//! A single GET with consent cookies and a browser-like user agent,
//! followed by a regex scan of the raw HTML. Fast and cheap, but blind
//! to script-rendered content — pages that populate their listing grid
//! client-side come back empty here and fall through to the browser
//! strategy.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, HeaderMap, HeaderValue};
use tracing::{debug, info, instrument, warn};
use url::Url;

use playscout_shared::playlist::{extract_title, scan_html_body};
use playscout_shared::{
    AppConfig, FetchOutcome, PLACEHOLDER_TITLE, PageStrategy, PlayscoutError, Result,
};

/// Pre-baked cookie pair that satisfies the HTML-level consent wall, so
/// the response is the listing page rather than a consent interstitial.
const CONSENT_COOKIES: &str =
    "CONSENT=YES+cb.20240520-07-p0.en+FX+000; SOCS=CAESEwgDEgk0ODE3Nzk3MjAaAmVuIAEaBgiA_LmvBg";

/// Accept-Language matching the pinned browser locale.
const ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

// ---------------------------------------------------------------------------
// HttpProbe
// ---------------------------------------------------------------------------

/// The lightweight strategy: one bounded GET plus a body scan.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    /// Build the probe with a client configured from `config`.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(CONSENT_COOKIES));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static(ACCEPT_LANGUAGE_VALUE),
        );

        let client = Client::builder()
            .user_agent(config.fetch.user_agent.clone())
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(config.timeouts.http_fetch())
            .build()
            .map_err(|e| PlayscoutError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// The fallible inner fetch; callers downgrade errors to
    /// [`FetchOutcome::Failure`] at the strategy boundary.
    async fn fetch_inner(&self, url: &Url) -> Result<FetchOutcome> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| PlayscoutError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlayscoutError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlayscoutError::Network(format!("{url}: failed to read body: {e}")))?;

        let title = extract_title(&body).unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());
        let playlist_urls = scan_html_body(&body);

        if playlist_urls.is_empty() {
            debug!(%url, "page loaded but no playlist references matched");
            return Ok(FetchOutcome::Empty { title });
        }

        Ok(FetchOutcome::Found {
            title,
            playlist_urls,
        })
    }
}

#[async_trait]
impl PageStrategy for HttpProbe {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> FetchOutcome {
        match self.fetch_inner(url).await {
            Ok(outcome) => {
                if let FetchOutcome::Found { playlist_urls, .. } = &outcome {
                    info!(count = playlist_urls.len(), "playlists found via HTTP");
                }
                outcome
            }
            Err(e) => {
                warn!(error = %e, "lightweight fetch failed");
                FetchOutcome::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playscout_shared::playlist::canonical_url;

    fn probe() -> HttpProbe {
        HttpProbe::new(&AppConfig::default()).unwrap()
    }

    async fn serve(status: u16, body: &str) -> (wiremock::MockServer, Url) {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/ch/releases"))
            .respond_with(wiremock::ResponseTemplate::new(status).set_body_string(body))
            .mount(&server)
            .await;
        let url = Url::parse(&format!("{}/ch/releases", server.uri())).unwrap();
        (server, url)
    }

    #[tokio::test]
    async fn distinct_tokens_with_duplicates_collapse_sorted() {
        let body = r#"<html><head><title>My Channel - Releases</title></head><body>
            <a href="/playlist?list=PLbbb">b</a>
            <a href="/playlist?list=PLaaa">a</a>
            <a href="/playlist?list=PLbbb">b again</a>
            <a href="/playlist?list=PLccc">c</a>
        </body></html>"#;
        let (_server, url) = serve(200, body).await;

        match probe().fetch(&url).await {
            FetchOutcome::Found {
                title,
                playlist_urls,
            } => {
                assert_eq!(title, "My Channel - Releases");
                assert_eq!(
                    playlist_urls,
                    vec![
                        canonical_url("PLaaa"),
                        canonical_url("PLbbb"),
                        canonical_url("PLccc"),
                    ]
                );
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn script_only_page_is_soft_failure() {
        let body = "<html><head><title>Dynamic Channel</title></head>\
                    <body><div id=\"app\"></div></body></html>";
        let (_server, url) = serve(200, body).await;

        assert_eq!(
            probe().fetch(&url).await,
            FetchOutcome::Empty {
                title: "Dynamic Channel".into()
            }
        );
    }

    #[tokio::test]
    async fn missing_title_uses_placeholder() {
        let (_server, url) = serve(200, "<body>untitled</body>").await;

        assert_eq!(
            probe().fetch(&url).await,
            FetchOutcome::Empty {
                title: PLACEHOLDER_TITLE.into()
            }
        );
    }

    #[tokio::test]
    async fn non_2xx_is_hard_failure() {
        let (_server, url) = serve(404, "not found").await;
        assert_eq!(probe().fetch(&url).await, FetchOutcome::Failure);
    }

    #[tokio::test]
    async fn connection_refused_is_hard_failure() {
        // Reserve a port, then drop the server so the connection fails.
        let server = wiremock::MockServer::start().await;
        let url = Url::parse(&format!("{}/ch/releases", server.uri())).unwrap();
        drop(server);

        assert_eq!(probe().fetch(&url).await, FetchOutcome::Failure);
    }

    #[tokio::test]
    async fn consent_cookies_are_sent() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::header("cookie", CONSENT_COOKIES))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_string(
                    r#"<title>t</title><a href="/playlist?list=PLx">x</a>"#,
                ),
            )
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        assert!(probe().fetch(&url).await.is_found());
    }
}
