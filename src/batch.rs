//! Sequential batch over the loaded entries.
//!
//! Each entry runs to completion before the next one starts:
//!
//! ```text
//! START -> missing url/thumbnail? ------------------> SKIPPED
//!       -> destination exists? ---------------------> SKIPPED
//!       -> RESOLVE -> no image? --------------------> FAILED
//!                  -> FETCH -> error? --------------> FAILED
//!                             -> ok ----------------> DOWNLOADED
//! ```
//!
//! Entries that reached RESOLVE are followed by a fixed pause unless they are
//! the last one. Skipped entries make no requests and never pause.

use crate::api::ImageSource;
use crate::models::{Entry, Outcome, RunSummary};
use crate::outputs::report::{self, Progress};
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Process every entry in order and return the accumulated counts.
#[instrument(level = "info", skip_all, fields(total = entries.len(), assets_dir = %assets_dir.display()))]
pub async fn run_batch<S: ImageSource>(
    source: &S,
    entries: &[Entry],
    assets_dir: &Path,
    delay: Duration,
) -> RunSummary {
    let total = entries.len();
    let mut summary = RunSummary::new(total);

    for (i, entry) in entries.iter().enumerate() {
        let index = i + 1;
        let outcome = process_entry(source, entry, index, total, assets_dir).await;
        summary.record(outcome);

        if outcome != Outcome::Skipped {
            report::end_of_entry();
            if index < total && !delay.is_zero() {
                debug!(?delay, "Pausing before next entry");
                sleep(delay).await;
            }
        }
    }

    info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        total = summary.total,
        "Batch complete"
    );
    summary
}

async fn process_entry<S: ImageSource>(
    source: &S,
    entry: &Entry,
    index: usize,
    total: usize,
    assets_dir: &Path,
) -> Outcome {
    let (Some(url), Some(file_name)) = (entry.page_url(), entry.file_name()) else {
        report::emit(Progress::MissingData { index, total });
        return Outcome::Skipped;
    };

    let save_path = assets_dir.join(file_name);
    if save_path.exists() {
        report::emit(Progress::AlreadyExists { index, total, file_name });
        return Outcome::Skipped;
    }

    report::emit(Progress::Processing {
        index,
        total,
        title: entry.display_title(),
        url,
        file_name,
    });

    let Some(image_url) = source.resolve_image_url(url).await else {
        report::emit(Progress::NoImage);
        return Outcome::Failed;
    };
    report::emit(Progress::ImageFound { image_url: &image_url });

    if source.download_image(&image_url, &save_path).await {
        report::emit(Progress::Downloaded { file_name });
        Outcome::Downloaded
    } else {
        report::emit(Progress::DownloadFailed);
        Outcome::Failed
    }
}
