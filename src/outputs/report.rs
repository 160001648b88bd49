//! Console report for a batch run.
//!
//! This is the human-facing output on stdout: one [`Progress`] line per
//! event and a [`Summary`] block at the end. Diagnostics go through `tracing`
//! on stderr and are not part of this report.

use crate::models::RunSummary;
use crate::utils::truncate_chars;
use std::fmt;

/// Max characters of a title shown on a progress line.
pub const TITLE_WIDTH: usize = 60;
/// Max characters of a resolved image URL shown on a progress line.
pub const IMAGE_URL_WIDTH: usize = 80;

const RULE: &str = "============================================================";

/// One line (or small group of lines) of progress output.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Loading { path: &'a str },
    Found { count: usize },
    MissingData { index: usize, total: usize },
    AlreadyExists { index: usize, total: usize, file_name: &'a str },
    Processing { index: usize, total: usize, title: &'a str, url: &'a str, file_name: &'a str },
    ImageFound { image_url: &'a str },
    NoImage,
    Downloaded { file_name: &'a str },
    DownloadFailed,
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Progress::Loading { path } => write!(f, "Loading {path}..."),
            Progress::Found { count } => writeln!(f, "Found {count} blog entries"),
            Progress::MissingData { index, total } => {
                write!(f, "[{index}/{total}] Skipping entry (missing URL or thumbnail)")
            }
            Progress::AlreadyExists { index, total, file_name } => {
                write!(f, "[{index}/{total}] ✓ Already exists: {file_name}")
            }
            Progress::Processing { index, total, title, url, file_name } => {
                writeln!(f, "[{index}/{total}] Processing: {}...", truncate_chars(title, TITLE_WIDTH))?;
                writeln!(f, "  URL: {url}")?;
                write!(f, "  Expected filename: {file_name}")
            }
            Progress::ImageFound { image_url } => {
                write!(f, "  Found image: {}...", truncate_chars(image_url, IMAGE_URL_WIDTH))
            }
            Progress::NoImage => write!(f, "  ✗ Could not find image URL"),
            Progress::Downloaded { file_name } => write!(f, "  ✓ Downloaded: {file_name}"),
            Progress::DownloadFailed => write!(f, "  ✗ Failed to download"),
        }
    }
}

/// Final summary block.
pub struct Summary<'a>(pub &'a RunSummary);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Summary:")?;
        writeln!(f, "  Downloaded: {}", s.downloaded)?;
        writeln!(f, "  Skipped (missing data or already exists): {}", s.skipped)?;
        writeln!(f, "  Failed: {}", s.failed)?;
        writeln!(f, "  Total processed: {}", s.total)?;
        write!(f, "{RULE}")
    }
}

pub fn emit(progress: Progress<'_>) {
    println!("{progress}");
}

/// Blank separator after an entry that went to the network.
pub fn end_of_entry() {
    println!();
}

pub fn print_summary(summary: &RunSummary) {
    println!("{}", Summary(summary));
}
