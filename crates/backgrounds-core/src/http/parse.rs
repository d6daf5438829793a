//! Parse raw HTTP response header lines into name/value pairs.

/// Decodes one raw header line. Bytes that are not valid UTF-8 are taken
/// as ISO-8859-1, the historical header charset, so no line is lost.
pub(crate) fn decode_header_line(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(s) => s.trim_end().to_string(),
        Err(_) => data.iter().map(|&b| char::from(b)).collect::<String>().trim_end().to_string(),
    }
}

/// Parse collected header lines, skipping the status line and blanks.
pub(crate) fn parse_header_lines(lines: &[String]) -> Vec<(String, String)> {
    let mut headers = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with("HTTP/") {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }
    headers
}
