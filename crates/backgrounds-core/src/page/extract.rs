//! Locate and decode the data literal the vendor page injects via
//! `JSON.parse(...)`.
//!
//! This is the only place that knows the page layout. It works on plain
//! text, so the brittle part can be exercised with fixture strings.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::unescape::decode_escapes;
use crate::descriptor::RawCandidate;
use crate::error::FormatError;

static MARKER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"JSON\.parse\(([^\)]+)").expect("Invalid marker pattern"));

/// Image size fragment served by default.
pub const LOW_RES_FRAGMENT: &str = "s1280-w1280-h720";
/// Fragment requesting the larger rendition of the same image.
pub const HIGH_RES_FRAGMENT: &str = "s1920-w1920-h1200";

/// Returns the raw argument of the first `JSON.parse(` call in `page`.
pub fn find_literal(page: &str) -> Result<&str, FormatError> {
    MARKER_PATTERN
        .captures(page)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(FormatError::MissingMarker)
}

/// Turns the double-escaped JS string literal into plain JSON text and
/// upgrades image URLs to the high resolution rendition.
pub fn clean_literal(raw: &str) -> String {
    decode_escapes(raw)
        .replace("\\u003d", "=")
        .replace('\\', "")
        .replace('\'', "")
        .replace(LOW_RES_FRAGMENT, HIGH_RES_FRAGMENT)
        .replace('\n', "")
}

/// Extracts the raw candidate records from a page body.
///
/// The decoded document is a nested array; its first element is the list of
/// image records.
pub fn extract_candidates(page: &str) -> Result<Vec<RawCandidate>, FormatError> {
    let cleaned = clean_literal(find_literal(page)?);
    let doc: Value = serde_json::from_str(&cleaned)?;
    let records = doc
        .as_array()
        .ok_or(FormatError::UnexpectedShape("top level is not an array"))?
        .first()
        .and_then(Value::as_array)
        .ok_or(FormatError::UnexpectedShape(
            "first top-level element is not a list of records",
        ))?;
    Ok(records.iter().map(RawCandidate::from_json).collect())
}
