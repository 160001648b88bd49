//! Network seam between the batch driver and the web.
//!
//! # Architecture
//!
//! - [`ImageSource`]: the two operations the batch needs, resolve and fetch
//! - [`HttpImageSource`]: the real implementation over one shared
//!   `reqwest::Client`
//!
//! The trait converts every recoverable error into "nothing found" or
//! "download failed" after logging it, so the batch never sees an `Err` and a
//! single bad entry cannot stop the run.

use crate::outputs::image;
use crate::scrapers::medium;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{error, instrument};

/// Resolve and fetch lead images.
pub trait ImageSource {
    /// Best-guess direct image URL for a post page, or `None`.
    async fn resolve_image_url(&self, page_url: &str) -> Option<String>;

    /// Save `image_url` to `save_path`; `true` on success.
    async fn download_image(&self, image_url: &str, save_path: &Path) -> bool;
}

/// Build the HTTP client shared by page and image requests.
///
/// Every request carries `user_agent` and is bounded by `timeout`.
pub fn build_client(user_agent: &str, timeout: Duration) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
}

/// [`ImageSource`] backed by live HTTP requests.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ImageSource for HttpImageSource {
    #[instrument(level = "info", skip_all, fields(url = %page_url))]
    async fn resolve_image_url(&self, page_url: &str) -> Option<String> {
        match medium::fetch_image_url(&self.client, page_url).await {
            Ok(found) => found,
            Err(e) => {
                error!(url = %page_url, error = %e, "Error fetching post page");
                None
            }
        }
    }

    #[instrument(level = "info", skip_all, fields(url = %image_url))]
    async fn download_image(&self, image_url: &str, save_path: &Path) -> bool {
        match image::download_image(&self.client, image_url, save_path).await {
            Ok(_) => true,
            Err(e) => {
                error!(
                    url = %image_url,
                    path = %save_path.display(),
                    error = %e,
                    "Error downloading image"
                );
                false
            }
        }
    }
}
