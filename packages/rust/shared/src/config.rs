//! Application configuration for Playscout.
//!
//! User config lives at `~/.playscout/playscout.toml`. Every field has a
//! default matching the documented bounded waits, so a missing file is
//! not an error.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlayscoutError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "playscout.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".playscout";

/// Browser-like user agent sent by both strategies.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// ---------------------------------------------------------------------------
// Config structs (matching playscout.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bounded waits for every suspension point.
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// Fetch behavior shared by both strategies.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// `[timeouts]` section. All values in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutsConfig {
    /// Whole-request timeout for the lightweight HTTP fetch.
    #[serde(default = "default_http_fetch_secs")]
    pub http_fetch_secs: u64,

    /// Browser navigation until the page load settles.
    #[serde(default = "default_navigation_secs")]
    pub navigation_secs: u64,

    /// Locating and clicking the consent-acceptance control.
    #[serde(default = "default_consent_secs")]
    pub consent_secs: u64,

    /// Settling wait after a consent click triggers a reload.
    #[serde(default = "default_consent_reload_secs")]
    pub consent_reload_secs: u64,

    /// Waiting for the listing container to render.
    #[serde(default = "default_listing_secs")]
    pub listing_secs: u64,

    /// Interactive alternate-URL prompt.
    #[serde(default = "default_prompt_secs")]
    pub prompt_secs: u64,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            http_fetch_secs: default_http_fetch_secs(),
            navigation_secs: default_navigation_secs(),
            consent_secs: default_consent_secs(),
            consent_reload_secs: default_consent_reload_secs(),
            listing_secs: default_listing_secs(),
            prompt_secs: default_prompt_secs(),
        }
    }
}

impl TimeoutsConfig {
    pub fn http_fetch(&self) -> Duration {
        Duration::from_secs(self.http_fetch_secs)
    }
    pub fn navigation(&self) -> Duration {
        Duration::from_secs(self.navigation_secs)
    }
    pub fn consent(&self) -> Duration {
        Duration::from_secs(self.consent_secs)
    }
    pub fn consent_reload(&self) -> Duration {
        Duration::from_secs(self.consent_reload_secs)
    }
    pub fn listing(&self) -> Duration {
        Duration::from_secs(self.listing_secs)
    }
    pub fn prompt(&self) -> Duration {
        Duration::from_secs(self.prompt_secs)
    }
}

fn default_http_fetch_secs() -> u64 {
    20
}
fn default_navigation_secs() -> u64 {
    60
}
fn default_consent_secs() -> u64 {
    5
}
fn default_consent_reload_secs() -> u64 {
    15
}
fn default_listing_secs() -> u64 {
    30
}
fn default_prompt_secs() -> u64 {
    5
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent sent by both strategies.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Path of the user config file, if a home directory is known.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load the user config, falling back to defaults when the file does
/// not exist. A file that exists but fails to parse is an error.
pub fn load_config() -> Result<AppConfig> {
    let Some(path) = config_path() else {
        return Ok(AppConfig::default());
    };

    if !path.exists() {
        debug!(path = %path.display(), "config file not found; using defaults");
        return Ok(AppConfig::default());
    }

    let raw = std::fs::read_to_string(&path).map_err(|e| PlayscoutError::io(&path, e))?;
    toml::from_str(&raw).map_err(|e| {
        PlayscoutError::config(format!("failed to parse {}: {e}", path.display()))
    })
}
