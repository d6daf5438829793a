//! Blocking HTTP transport.
//!
//! Uses the curl crate (libcurl easy interface) for the three requests the
//! pipeline makes: the page GET, the per-image HEAD title lookup and the
//! per-image GET. The [`Transport`] trait is the seam the page fetcher and
//! downloader are written against.

#[cfg(test)]
pub(crate) mod mock;
mod parse;

use std::time::Duration;

use crate::config::BackgroundsConfig;

/// Status, final-hop headers and body of a completed request.
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    pub status: u32,
    /// Header name/value pairs of the last response in the redirect chain.
    pub headers: Vec<(String, String)>,
    /// Empty for HEAD requests.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// First value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Blocking request executor. Implementations must be shareable across
/// download workers.
pub trait Transport: Send + Sync {
    /// Metadata-only request; the body is not transferred.
    fn head(&self, url: &str) -> Result<HttpResponse, curl::Error>;
    /// Full request; the whole body is buffered in memory.
    fn get(&self, url: &str) -> Result<HttpResponse, curl::Error>;
}

/// libcurl-backed transport. Each request uses a fresh easy handle, so the
/// transport itself holds no connection state.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(120),
            user_agent: None,
        }
    }
}

impl CurlTransport {
    pub fn from_config(cfg: &BackgroundsConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }

    fn perform(&self, url: &str, nobody: bool) -> Result<HttpResponse, curl::Error> {
        let mut lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.nobody(nobody)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if let Some(ua) = &self.user_agent {
            easy.useragent(ua)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                let line = parse::decode_header_line(data);
                // A status line starts a new response (redirect hop).
                if line.starts_with("HTTP/") {
                    lines.clear();
                }
                lines.push(line);
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        Ok(HttpResponse {
            status,
            headers: parse::parse_header_lines(&lines),
            body,
        })
    }
}

impl Transport for CurlTransport {
    fn head(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        tracing::trace!(url, "HEAD");
        self.perform(url, true)
    }

    fn get(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        tracing::trace!(url, "GET");
        self.perform(url, false)
    }
}
