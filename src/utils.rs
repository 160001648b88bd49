//! Utility functions for string truncation, URL cleanup, and file system checks.
//!
//! - Char-safe truncation for progress lines
//! - Canonicalisation of CDN image URLs
//! - Output directory validation

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static QUERY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?.*$").unwrap());
static RESIZE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/resize:[^/]+").unwrap());

/// Keep at most `max` characters of `s`.
///
/// Counts `char`s rather than bytes so titles with non-ASCII text never split
/// inside a code point.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_chars("héllo", 2), "hé");
/// assert_eq!(truncate_chars("short", 100), "short");
/// ```
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Reduce a CDN image URL to its canonical original.
///
/// Medium serves transformed variants through query strings and
/// `/resize:<directive>` path segments, e.g.
/// `https://miro.medium.com/v2/resize:fit:1200/1*abc.png?q=20`.
/// Both are removed, query string first.
pub fn normalize_image_url(url: &str) -> String {
    let without_query = QUERY_RE.replace(url, "");
    RESIZE_RE.replace_all(&without_query, "").into_owned()
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Sync std fs for the probe; simpler error surface
    let probe_path = path.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
