//! Command-line interface definitions for the blog image fetcher.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a default, so a bare invocation from the site root reads
//! `blogs.json` and writes into `assets/`. Options can also be supplied via
//! environment variables.

use clap::Parser;
use std::time::Duration;

/// Desktop browser User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Command-line arguments for the blog image fetcher.
///
/// # Examples
///
/// ```sh
/// # Defaults: ./blogs.json -> ./assets
/// blog_image_fetcher
///
/// # Custom paths and a slower pace
/// blog_image_fetcher -i data/blogs.json -o public/assets --delay-secs 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the JSON list of blog entries
    #[arg(short = 'i', long, env = "BLOGS_JSON", default_value = "blogs.json")]
    pub blogs_json: String,

    /// Directory the images are saved into
    #[arg(short = 'o', long, env = "ASSETS_DIR", default_value = "assets")]
    pub assets_dir: String,

    /// Seconds to wait between entries that hit the network
    #[arg(long, env = "REQUEST_DELAY_SECS", default_value_t = 1)]
    pub delay_secs: u64,

    /// Timeout in seconds for each HTTP request
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// User-Agent header sent with page and image requests
    #[arg(long, env = "FETCH_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Cli {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
