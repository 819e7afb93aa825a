//! Headless browser session lifecycle.
//!
//! Each strategy invocation gets its own isolated session: a fresh
//! Chrome process with a unique user data directory, a pinned locale,
//! and a spawned task driving the CDP event handler. The session is
//! closed on every exit path of the caller.

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetTimezoneOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::page::Page;
use futures::StreamExt;
use tracing::{debug, warn};

use playscout_shared::{AppConfig, PlayscoutError, Result};

/// Browser UI locale, pinned for deterministic rendering.
const BROWSER_LOCALE: &str = "en-GB";

/// Timezone override applied to every page.
const BROWSER_TIMEZONE: &str = "Europe/London";

/// An isolated headless Chrome session.
pub struct BrowserSession {
    browser: Browser,
    user_agent: String,
}

impl BrowserSession {
    /// Launch Chrome and start driving its CDP handler.
    pub async fn launch(config: &AppConfig) -> Result<Self> {
        // Unique user data dir so concurrent runs never share profile
        // state or hit Chrome's ProcessSingleton lock.
        let user_data_dir =
            std::env::temp_dir().join(format!("playscout-{}", uuid::Uuid::new_v4()));

        let browser_config = BrowserConfig::builder()
            .arg("--headless")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg(format!("--lang={BROWSER_LOCALE}"))
            .arg(format!("--user-data-dir={}", user_data_dir.display()))
            .build()
            .map_err(|e| {
                PlayscoutError::Browser(format!("invalid browser configuration: {e}"))
            })?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            PlayscoutError::Browser(format!("failed to launch Chrome: {e}"))
        })?;

        // Drive CDP events until the browser goes away.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "browser handler event error");
                }
            }
        });

        Ok(Self {
            browser,
            user_agent: config.fetch.user_agent.clone(),
        })
    }

    /// Open a blank page with the pinned user agent and timezone.
    pub async fn new_page(&self) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| PlayscoutError::Browser(format!("failed to open page: {e}")))?;

        page.set_user_agent(SetUserAgentOverrideParams::new(self.user_agent.clone()))
            .await
            .map_err(|e| PlayscoutError::Browser(format!("failed to set user agent: {e}")))?;

        page.execute(SetTimezoneOverrideParams::new(BROWSER_TIMEZONE))
            .await
            .map_err(|e| PlayscoutError::Browser(format!("failed to set timezone: {e}")))?;

        Ok(page)
    }

    /// Close the browser and kill the Chrome process.
    ///
    /// Callers invoke this on every exit path; if it is skipped (e.g. a
    /// panic), chromiumoxide's `Browser` drop still terminates Chrome.
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.browser.close().await {
            warn!(error = %e, "browser did not close cleanly");
            return Err(PlayscoutError::Browser(format!(
                "failed to close browser: {e}"
            )));
        }
        // Reap the Chrome process so it doesn't linger as a zombie.
        if let Err(e) = self.browser.wait().await {
            debug!(error = %e, "browser wait after close failed");
        }
        Ok(())
    }
}
