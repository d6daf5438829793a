//! Single-image downloader.
//!
//! The destination file doubles as the "already downloaded" marker: if
//! `{author}-{title}` exists under the target directory no request is made.
//! The body is buffered in full, written to `{author}-{title}.part` and
//! renamed into place, so a failed request or write never leaves a partial
//! file at the destination.

use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::ImageDescriptor;
use crate::error::DownloadError;
use crate::http::Transport;

pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `body` to the temp path, then renames it to `path`. The temp file
/// is removed if either step fails.
fn write_atomically(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let tmp = temp_path(path);
    let result = fs::write(&tmp, body).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        if let Err(e) = fs::remove_file(&tmp) {
            tracing::debug!("could not remove {}: {}", tmp.display(), e);
        }
    }
    result
}

/// Terminal state of one download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    /// Destination already present; no network access happened.
    SkippedExists { path: PathBuf },
    /// Image request answered with something other than 200.
    SkippedStatus { status: u32 },
}

pub struct Downloader<'t> {
    transport: &'t dyn Transport,
}

impl<'t> Downloader<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self { transport }
    }

    /// Downloads `descriptor` into `target_dir`, creating the directory if
    /// needed.
    pub fn download(
        &self,
        descriptor: &ImageDescriptor,
        target_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        if !target_dir.exists() {
            tracing::debug!("target directory {} does not exist, creating", target_dir.display());
            fs::create_dir_all(target_dir)?;
        }

        let path = descriptor.destination(target_dir);
        if path.exists() {
            tracing::debug!("file {} already exists, skipping", path.display());
            return Ok(DownloadOutcome::SkippedExists { path });
        }

        let resp = self.transport.get(descriptor.source_url())?;
        if !resp.is_ok() {
            tracing::info!(
                "skipping download href {} due to status {}",
                descriptor.source_url(),
                resp.status
            );
            return Ok(DownloadOutcome::SkippedStatus {
                status: resp.status,
            });
        }

        tracing::debug!("downloading new background: {}", path.display());
        write_atomically(&path, &resp.body)?;
        Ok(DownloadOutcome::Downloaded {
            path,
            bytes: resp.body.len() as u64,
        })
    }
}
