//! Vendor page discovery.
//!
//! [`PageFetcher`] loads the page once and hands out a [`Discovery`]: a
//! finite, non-restartable iterator that resolves each candidate's title on
//! demand. Per-candidate failures are logged and skipped; only page-level
//! failures are returned as errors.

mod extract;
mod title;
mod unescape;

pub use extract::{
    clean_literal, extract_candidates, find_literal, HIGH_RES_FRAGMENT, LOW_RES_FRAGMENT,
};
pub use title::{determine_title, title_from_content_disposition};

use crate::descriptor::{ImageDescriptor, RawCandidate};
use crate::error::DiscoveryError;
use crate::http::Transport;

/// Loads the vendor page and turns it into image descriptors.
pub struct PageFetcher<'t> {
    transport: &'t dyn Transport,
    page_url: String,
}

impl<'t> PageFetcher<'t> {
    pub fn new(transport: &'t dyn Transport, page_url: impl Into<String>) -> Self {
        Self {
            transport,
            page_url: page_url.into(),
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    /// GETs the page; anything but 200 is an upstream failure.
    pub fn load_page(&self) -> Result<String, DiscoveryError> {
        let resp = self.transport.get(&self.page_url)?;
        if !resp.is_ok() {
            return Err(DiscoveryError::Upstream {
                status: resp.status,
            });
        }
        Ok(String::from_utf8_lossy(&resp.body).into_owned())
    }

    /// Fresh page load followed by [`PageFetcher::discover_in`].
    pub fn discover(&self) -> Result<Discovery<'t>, DiscoveryError> {
        let page = self.load_page()?;
        self.discover_in(&page)
    }

    /// Extracts candidates from an already loaded page body.
    pub fn discover_in(&self, page: &str) -> Result<Discovery<'t>, DiscoveryError> {
        let candidates = extract_candidates(page)?;
        tracing::debug!("found {} candidate records on {}", candidates.len(), self.page_url);
        Ok(Discovery {
            transport: self.transport,
            candidates: candidates.into_iter(),
            skipped: 0,
        })
    }
}

/// Lazy sequence of resolved descriptors from one page load.
pub struct Discovery<'t> {
    transport: &'t dyn Transport,
    candidates: std::vec::IntoIter<RawCandidate>,
    skipped: usize,
}

impl Discovery<'_> {
    /// Candidates dropped so far (missing fields or failed title lookup).
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn resolve(&self, raw: RawCandidate) -> Option<ImageDescriptor> {
        let Some((href, author)) = raw.attributable() else {
            // Either not a background or we cannot provide proper attribution.
            tracing::debug!("found image is not likely a background, it is missing either the href or author");
            return None;
        };
        if let Err(e) = url::Url::parse(&href) {
            tracing::debug!(href = %href, "skipping candidate with unusable href: {}", e);
            return None;
        }
        match determine_title(self.transport, &href) {
            Ok(title) => ImageDescriptor::new(href, author, title),
            Err(e) if e.is_network() => {
                tracing::debug!(href = %href, "title lookup failed, continuing: {}", e);
                None
            }
            Err(e) => {
                tracing::warn!(href = %href, "title header format unexpected, skipping: {}", e);
                None
            }
        }
    }
}

impl Iterator for Discovery<'_> {
    type Item = ImageDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.candidates.next()?;
            match self.resolve(raw) {
                Some(d) => return Some(d),
                None => self.skipped += 1,
            }
        }
    }
}
