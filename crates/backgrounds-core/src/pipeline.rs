//! Drives a discovery pass into the downloader.
//!
//! With one job, descriptors are pulled and downloaded strictly one at a
//! time. With more, a bounded pool of scoped worker threads pulls from the
//! shared discovery iterator; destination paths are claimed before download
//! so no two workers ever write the same file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use crate::descriptor::ImageDescriptor;
use crate::downloader::{DownloadOutcome, Downloader};
use crate::error::DownloadError;
use crate::page::Discovery;

/// Per-run counters reported by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub skipped_status: usize,
    pub failed: usize,
    /// Candidates dropped during discovery.
    pub candidates_skipped: usize,
}

impl RunSummary {
    fn record(
        &mut self,
        descriptor: &ImageDescriptor,
        result: &Result<DownloadOutcome, DownloadError>,
    ) {
        match result {
            Ok(DownloadOutcome::Downloaded { .. }) => self.downloaded += 1,
            Ok(DownloadOutcome::SkippedExists { .. }) => self.skipped_existing += 1,
            Ok(DownloadOutcome::SkippedStatus { .. }) => self.skipped_status += 1,
            Err(e) => {
                tracing::warn!(
                    href = %descriptor.source_url(),
                    "download of {} failed: {}",
                    descriptor.file_name(),
                    e
                );
                self.failed += 1;
            }
        }
    }

    /// Descriptors that reached the downloader.
    pub fn processed(&self) -> usize {
        self.downloaded + self.skipped_existing + self.skipped_status + self.failed
    }
}

/// Downloads everything `discovery` yields into `target_dir` using up to
/// `jobs` workers. Per-item failures are logged and counted, never returned.
pub fn run_pipeline(
    discovery: Discovery<'_>,
    downloader: &Downloader<'_>,
    target_dir: &Path,
    jobs: usize,
) -> RunSummary {
    if jobs <= 1 {
        run_sequential(discovery, downloader, target_dir)
    } else {
        run_parallel(discovery, downloader, target_dir, jobs)
    }
}

fn run_sequential(
    mut discovery: Discovery<'_>,
    downloader: &Downloader<'_>,
    target_dir: &Path,
) -> RunSummary {
    let mut summary = RunSummary::default();
    for descriptor in discovery.by_ref() {
        let result = downloader.download(&descriptor, target_dir);
        summary.record(&descriptor, &result);
    }
    summary.candidates_skipped = discovery.skipped();
    summary
}

fn run_parallel(
    discovery: Discovery<'_>,
    downloader: &Downloader<'_>,
    target_dir: &Path,
    jobs: usize,
) -> RunSummary {
    let work = Mutex::new(discovery);
    let claimed: Mutex<HashSet<PathBuf>> = Mutex::new(HashSet::new());
    let (tx, rx) = mpsc::channel();
    let mut summary = RunSummary::default();

    thread::scope(|s| {
        for _ in 0..jobs {
            let tx = tx.clone();
            let work = &work;
            let claimed = &claimed;
            s.spawn(move || loop {
                let next = work.lock().unwrap_or_else(PoisonError::into_inner).next();
                let Some(descriptor) = next else {
                    break;
                };
                let path = descriptor.destination(target_dir);
                let fresh = claimed
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(path.clone());
                let result = if fresh {
                    downloader.download(&descriptor, target_dir)
                } else {
                    tracing::debug!("{} already claimed by another worker, skipping", path.display());
                    Ok(DownloadOutcome::SkippedExists { path })
                };
                if tx.send((descriptor, result)).is_err() {
                    break;
                }
            });
        }
        // Only workers hold senders now; the loop ends once they all exit.
        drop(tx);
        for (descriptor, result) in rx {
            summary.record(&descriptor, &result);
        }
    });

    summary.candidates_skipped = work
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
        .skipped();
    summary
}
