//! Data models for blog entries and batch results.
//!
//! - [`Entry`]: one record from `blogs.json`
//! - [`Outcome`]: what happened to a single entry
//! - [`RunSummary`]: counters accumulated over the whole run

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// A blog post as listed in `blogs.json`.
///
/// Only the three fields below are read; anything else in the record (dates,
/// tags, descriptions) is ignored. Each field may be missing or `null`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Entry {
    /// The blog post page to scrape.
    #[serde(default)]
    pub url: Option<String>,
    /// Site-relative path where the post's image is expected, e.g. `assets/foo.png`.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
}

impl Entry {
    /// Page URL, if present and non-empty.
    pub fn page_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|s| !s.is_empty())
    }

    /// Base name of `thumbnail`, the name the image is saved under.
    ///
    /// Returns `None` when the thumbnail is missing or has no usable file name
    /// (empty, `.` or `..`).
    pub fn file_name(&self) -> Option<&str> {
        let thumbnail = self.thumbnail.as_deref()?;
        let name = thumbnail.rsplit(['/', '\\']).next()?;
        match name {
            "" | "." | ".." => None,
            name => Some(name),
        }
    }

    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Untitled")
    }
}

/// Load the ordered list of entries from a JSON array on disk.
///
/// Any read or parse error is returned to the caller, which treats it as fatal.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_entries(path: &Path) -> Result<Vec<Entry>, Box<dyn Error>> {
    let raw = fs::read_to_string(path).await?;
    let entries: Vec<Entry> = serde_json::from_str(&raw)?;
    info!(count = entries.len(), "Loaded blog entries");
    Ok(entries)
}

/// Terminal state of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Downloaded,
    Skipped,
    Failed,
}

/// Counters accumulated across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total: usize,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Downloaded => self.downloaded += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }

    pub fn processed(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}
