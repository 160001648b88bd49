//! # Blog Image Fetcher
//!
//! Downloads the lead image of every blog post listed in `blogs.json` into
//! a local `assets/` folder, naming each file after the entry's `thumbnail`.
//!
//! ## Usage
//!
//! ```sh
//! blog_image_fetcher -i blogs.json -o assets
//! ```
//!
//! ## Architecture
//!
//! A single sequential pass:
//! 1. **Loading**: Read the entry list; any failure here aborts the run
//! 2. **Resolving**: Fetch each post page and pick its lead image
//! 3. **Fetching**: Stream the image into the assets directory
//! 4. **Reporting**: Print per-entry progress and a final summary
//!
//! Entries that already have an image on disk are skipped, so re-running is
//! cheap and only fills in what is missing.

use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod api;
mod batch;
mod cli;
mod models;
mod outputs;
mod scrapers;
#[cfg(test)]
mod test_support;
mod utils;

use api::{HttpImageSource, build_client};
use cli::Cli;
use models::load_entries;
use outputs::report::{self, Progress};
use utils::ensure_writable_dir;

#[tokio::main(flavor = "current_thread")]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("blog_image_fetcher starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Load entries (fatal on failure) ----
    report::emit(Progress::Loading { path: &args.blogs_json });
    let entries = match load_entries(Path::new(&args.blogs_json)).await {
        Ok(entries) => entries,
        Err(e) => {
            error!(path = %args.blogs_json, error = %e, "Error loading blog entries");
            return Err(e);
        }
    };
    report::emit(Progress::Found { count: entries.len() });

    let assets_dir = Path::new(&args.assets_dir);
    if let Err(e) = ensure_writable_dir(assets_dir).await {
        error!(
            path = %args.assets_dir,
            error = %e,
            "Assets directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let client = build_client(&args.user_agent, args.timeout())?;
    let source = HttpImageSource::new(client);

    // ---- Sequential batch ----
    let summary = batch::run_batch(&source, &entries, assets_dir, args.delay()).await;
    report::print_summary(&summary);

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        downloaded = summary.downloaded,
        failed = summary.failed,
        "Execution complete"
    );

    Ok(())
}
