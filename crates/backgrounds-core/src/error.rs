//! Error types for discovery, title resolution and download.
//!
//! Fatal errors (page unreachable, page format changed) abort a run; the
//! per-candidate and per-download errors are logged by the pipeline and the
//! run continues with the next item.

use thiserror::Error;

/// The embedded data literal could not be located or decoded.
///
/// The vendor page is not a public API; this error means the scraping
/// assumptions no longer hold and the extraction code needs updating.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no JSON.parse(...) marker found in the response body, the page format may have changed")]
    MissingMarker,
    #[error("embedded data is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("unexpected embedded data shape: {0}")]
    UnexpectedShape(&'static str),
}

/// Fatal failure while loading or decoding the vendor page.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("page request returned HTTP {status}")]
    Upstream { status: u32 },
    #[error("page request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Failure resolving the title of one candidate via HEAD.
#[derive(Debug, Error)]
pub enum TitleError {
    #[error("HEAD request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("HEAD returned HTTP {0}")]
    Status(u32),
    #[error("response has no content-disposition header")]
    MissingHeader,
    #[error("content-disposition has no quoted title: {0}")]
    NoQuotedTitle(String),
}

impl TitleError {
    /// True for failures of the request itself (flaky network, bad status),
    /// false when the server answered but the header format was unexpected.
    pub fn is_network(&self) -> bool {
        matches!(self, TitleError::Transport(_) | TitleError::Status(_))
    }
}

/// Failure downloading a single image.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("GET request failed: {0}")]
    Transport(#[from] curl::Error),
    #[error("storage: {0}")]
    Io(#[from] std::io::Error),
}
