//! Image download to the assets directory.
//!
//! The response body is streamed through a fixed-size buffer instead of
//! being collected in memory. No content-type or size checks are made: the
//! bytes are written exactly as served.

use futures::StreamExt;
use reqwest::{Client, Response};
use std::error::Error;
use std::path::Path;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

/// Size of the write buffer between the HTTP stream and the file.
pub const CHUNK_SIZE: usize = 8192;

/// Download `url` into `save_path`, creating missing parent directories.
///
/// # Returns
///
/// The number of bytes written, or an error if the request fails, the server
/// answers with a non-success status, or the file cannot be written. A
/// partially written file is removed before the error is returned.
#[instrument(level = "info", skip_all, fields(%url, path = %save_path.display()))]
pub async fn download_image(
    client: &Client,
    url: &str,
    save_path: &Path,
) -> Result<u64, Box<dyn Error>> {
    if let Some(parent) = save_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let response = client.get(url).send().await?.error_for_status()?;

    match write_body(response, save_path).await {
        Ok(bytes) => {
            info!(bytes, "Saved image");
            Ok(bytes)
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(save_path).await {
                debug!(error = %rm, "No partial file to remove");
            } else {
                warn!("Removed partial download");
            }
            Err(e)
        }
    }
}

async fn write_body(response: Response, save_path: &Path) -> Result<u64, Box<dyn Error>> {
    let file = File::create(save_path).await?;
    let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    writer.flush().await?;

    Ok(written)
}
