//! End-to-end resolution: orchestrate, optionally retry on the
//! suggested alternate URL, persist, and hand back the file path.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use url::Url;

use playscout_shared::suggest::suggest_alternate;
use playscout_shared::{AppConfig, ConfirmGate, PageStrategy, PlayscoutError, Result};

use crate::orchestrator::Orchestrator;
use crate::persist;

/// Resolve a listing page to a persisted playlist-URL file.
///
/// Runs one orchestrator pass against `url`; when that ends exhausted
/// and a sibling listing URL exists, the gate decides whether to run a
/// single second pass whose result replaces the first entirely, win or
/// lose. A title recovered in the first pass still survives a second
/// pass that hard-fails, so the run errors only when no strategy on
/// either URL ever produced a title. The final result is persisted even
/// when empty.
#[instrument(skip_all, fields(url = %url))]
pub async fn resolve(
    url: &Url,
    output_dir: &Path,
    config: &AppConfig,
    lightweight: &dyn PageStrategy,
    rendered: &dyn PageStrategy,
    gate: &dyn ConfirmGate,
) -> Result<PathBuf> {
    let orchestrator = Orchestrator::new(lightweight, rendered);

    let mut current_url = url.clone();
    let mut pass = orchestrator.run_pass(&current_url).await;

    if pass.playlist_urls.is_empty() {
        if let Some(alternate) = suggest_alternate(&current_url) {
            let prompt = format!(
                "\nNo playlists found. Try alternative URL '{alternate}'? [Y/n] ({}s timeout): ",
                config.timeouts.prompt_secs
            );
            if gate.confirm(&prompt, config.timeouts.prompt()).await {
                info!(%alternate, "retrying with suggested alternate URL");
                current_url = alternate;
                let second = orchestrator.run_pass(&current_url).await;
                // The second pass replaces the result, but a title
                // already in hand is not forfeited to a failed retry.
                pass.title = second.title.or(pass.title);
                pass.playlist_urls = second.playlist_urls;
            } else {
                info!("alternate URL declined; keeping original result");
            }
        }
    }

    let Some(title) = pass.title else {
        return Err(PlayscoutError::Catastrophic {
            url: url.to_string(),
        });
    };

    let mut rng = rand::rng();
    persist::persist(
        output_dir,
        &title,
        &pass.playlist_urls,
        &current_url,
        &mut rng,
    )
}
