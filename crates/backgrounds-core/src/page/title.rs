//! Title resolution via a HEAD request and the `content-disposition` header.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::TitleError;
use crate::http::Transport;

static QUOTED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("Invalid quoted title pattern"));

/// First double-quoted substring of a `content-disposition` value.
pub fn title_from_content_disposition(header_value: &str) -> Option<&str> {
    QUOTED_PATTERN
        .captures(header_value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Resolves a stable title for the image at `href` without fetching its body.
pub fn determine_title(transport: &dyn Transport, href: &str) -> Result<String, TitleError> {
    let resp = transport.head(href)?;
    if !(200..300).contains(&resp.status) {
        return Err(TitleError::Status(resp.status));
    }
    let header = resp
        .header("content-disposition")
        .ok_or(TitleError::MissingHeader)?;
    title_from_content_disposition(header)
        .map(str::to_string)
        .ok_or_else(|| TitleError::NoQuotedTitle(header.to_string()))
}
