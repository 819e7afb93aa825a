//! Shared types, errors, and configuration for Playscout.

pub mod config;
pub mod error;
pub mod playlist;
pub mod suggest;
pub mod types;

pub use config::{AppConfig, FetchConfig, TimeoutsConfig, load_config};
pub use error::{PlayscoutError, Result};
pub use types::{ConfirmGate, FetchOutcome, PLACEHOLDER_TITLE, PageStrategy};
