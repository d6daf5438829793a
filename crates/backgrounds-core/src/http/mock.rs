//! In-memory transport for unit tests. Unknown URLs fail like an
//! unresolvable host.

use std::collections::HashMap;
use std::sync::Mutex;

use super::{HttpResponse, Transport};

/// libcurl's CURLE_COULDNT_RESOLVE_HOST.
const COULDNT_RESOLVE_HOST: u32 = 6;

#[derive(Debug, Default)]
pub(crate) struct MockTransport {
    heads: HashMap<String, HttpResponse>,
    gets: HashMap<String, HttpResponse>,
    requests: Mutex<Vec<(&'static str, String)>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_head(mut self, url: &str, status: u32, headers: &[(&str, &str)]) -> Self {
        let headers = headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.heads.insert(
            url.to_string(),
            HttpResponse {
                status,
                headers,
                body: Vec::new(),
            },
        );
        self
    }

    pub(crate) fn with_get(mut self, url: &str, status: u32, body: &[u8]) -> Self {
        self.gets.insert(
            url.to_string(),
            HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_vec(),
            },
        );
        self
    }

    /// Image with a title header and a 200 body.
    pub(crate) fn with_image(self, url: &str, title: &str, body: &[u8]) -> Self {
        let disposition = format!("inline; filename=\"{}\"", title);
        self.with_head(url, 200, &[("Content-Disposition", disposition.as_str())])
            .with_get(url, 200, body)
    }

    fn count(&self, method: &str, url: &str) -> usize {
        self.requests
            .lock()
            .map(|r| r.iter().filter(|(m, u)| *m == method && u == url).count())
            .unwrap_or(0)
    }

    pub(crate) fn head_count(&self, url: &str) -> usize {
        self.count("HEAD", url)
    }

    pub(crate) fn get_count(&self, url: &str) -> usize {
        self.count("GET", url)
    }

    pub(crate) fn total_requests(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    fn respond(
        &self,
        method: &'static str,
        table: &HashMap<String, HttpResponse>,
        url: &str,
    ) -> Result<HttpResponse, curl::Error> {
        if let Ok(mut r) = self.requests.lock() {
            r.push((method, url.to_string()));
        }
        table
            .get(url)
            .cloned()
            .ok_or_else(|| curl::Error::new(COULDNT_RESOLVE_HOST))
    }
}

impl Transport for MockTransport {
    fn head(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        self.respond("HEAD", &self.heads, url)
    }

    fn get(&self, url: &str) -> Result<HttpResponse, curl::Error> {
        self.respond("GET", &self.gets, url)
    }
}
