//! CLI argument definitions, tracing setup, and the run entry point.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use url::Url;

use playscout_browser::BrowserProbe;
use playscout_core::TimedStdinGate;
use playscout_probe::HttpProbe;
use playscout_shared::load_config;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Playscout — resolve a listing page to its playlist URLs.
#[derive(Parser)]
#[command(
    name = "playscout",
    version,
    about = "Scan a channel listing page for playlist links, save them to a file, \
             and print that file's path to stdout.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Full URL of the listing page (e.g. a channel's releases tab).
    #[arg(long)]
    pub url: String,

    /// Absolute path of an existing directory for the result file.
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Diagnostics go to stderr;
/// stdout carries only the result path.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "playscout=info",
        1 => "playscout=debug",
        _ => "playscout=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Resolve the page and print the result-file path.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let url = Url::parse(&cli.url).map_err(|e| eyre!("invalid URL '{}': {e}", cli.url))?;

    if !cli.output_dir.is_absolute() {
        return Err(eyre!(
            "--output-dir must be an absolute path, got '{}'",
            cli.output_dir.display()
        ));
    }
    if !cli.output_dir.is_dir() {
        return Err(eyre!(
            "output directory does not exist: {}",
            cli.output_dir.display()
        ));
    }

    let config = load_config()?;

    info!(%url, output_dir = %cli.output_dir.display(), "resolving listing page");

    let lightweight = HttpProbe::new(&config)?;
    let rendered = BrowserProbe::new(&config);
    let gate = TimedStdinGate;

    let path = playscout_core::resolve(
        &url,
        &cli.output_dir,
        &config,
        &lightweight,
        &rendered,
        &gate,
    )
    .await?;

    // The one stdout line other tools are allowed to parse.
    println!("{}", path.display());
    Ok(())
}
