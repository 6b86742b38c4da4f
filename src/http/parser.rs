use crate::http::request::{HeaderName, Method, Request};
use std::collections::HashMap;

/// Default cap on the size of a request head.
pub const DEFAULT_MAX_HEAD_BYTES: usize = 8 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unsupported method {0:?}")]
    MalformedMethod(String),
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("malformed headers: {0}")]
    MalformedHeaders(&'static str),
    #[error("incomplete request head")]
    Incomplete,
}

/// Parses a request head from the start of `buf`.
///
/// On success returns the request and the number of bytes consumed,
/// including the blank line. Anything after that belongs to the body.
/// `Incomplete` means more bytes are needed, unless `buf` already holds
/// `max_head_bytes` without a blank line.
pub fn parse_request_head(buf: &[u8], max_head_bytes: usize) -> Result<(Request, usize), ParseError> {
    let (headers_end, separator_len) = match find_headers_end(buf) {
        Some(found) => found,
        None if buf.len() >= max_head_bytes => {
            return Err(ParseError::MalformedHeaders("request head too large"));
        }
        None => return Err(ParseError::Incomplete),
    };

    if headers_end > max_head_bytes {
        return Err(ParseError::MalformedHeaders("request head too large"));
    }

    let head = std::str::from_utf8(&buf[..headers_end])
        .map_err(|_| ParseError::MalformedHeaders("request head is not valid UTF-8"))?;

    let mut lines = head.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    // Request line
    let request_line = lines.next().ok_or(ParseError::MalformedRequestLine)?;
    let mut parts = request_line.split(' ').filter(|p| !p.is_empty());

    let method_token = parts.next().ok_or(ParseError::MalformedRequestLine)?;
    let method = Method::from_token(method_token)
        .ok_or_else(|| ParseError::MalformedMethod(method_token.to_string()))?;
    let path = parts.next().ok_or(ParseError::MalformedRequestLine)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        // Lines that aren't `name: value` are tolerated and skipped
        let Some((name, value)) = line.split_once(": ") else {
            tracing::debug!(line, "Skipping malformed header line");
            continue;
        };

        if let Some(name) = HeaderName::from_field(name) {
            headers.insert(name, value.trim().to_string());
        }
    }

    let content_length = match headers.get(&HeaderName::ContentLength) {
        Some(v) => parse_content_length(v),
        None => None,
    };

    if method.has_body() {
        if !headers.contains_key(&HeaderName::ContentLength) {
            return Err(ParseError::MalformedHeaders("missing Content-Length"));
        }
        if content_length.is_none() {
            return Err(ParseError::MalformedHeaders("invalid Content-Length"));
        }
    }

    let request = Request {
        method,
        path: path.to_string(),
        headers,
        content_length,
    };

    Ok((request, headers_end + separator_len))
}

/// Parses a Content-Length value: one or more ASCII digits, nothing else.
pub fn parse_content_length(value: &str) -> Option<usize> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Finds the blank line ending the head, returning its offset and the
/// length of the separator (`\r\n\r\n` or `\n\n`).
fn find_headers_end(buf: &[u8]) -> Option<(usize, usize)> {
    let crlf = buf.windows(4).position(|w| w == b"\r\n\r\n");
    let lf = buf.windows(2).position(|w| w == b"\n\n");

    match (crlf, lf) {
        (Some(c), Some(l)) if l < c => Some((l, 2)),
        (Some(c), _) => Some((c, 4)),
        (None, Some(l)) => Some((l, 2)),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_request_head(req, DEFAULT_MAX_HEAD_BYTES).unwrap();

        assert_eq!(parsed.method, Method::Get);
        assert_eq!(parsed.path, "/index.html");
        assert!(parsed.headers.is_empty());
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn consumed_stops_at_body() {
        let req = b"PUT /a.txt HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc";

        let (_, consumed) = parse_request_head(req, DEFAULT_MAX_HEAD_BYTES).unwrap();

        assert_eq!(&req[consumed..], b"abc");
    }

    #[test]
    fn bare_lf_line_endings() {
        let req = b"DELETE /a.txt HTTP/1.1\nContent-Type: text/plain\n\n";

        let (parsed, consumed) = parse_request_head(req, DEFAULT_MAX_HEAD_BYTES).unwrap();

        assert_eq!(parsed.method, Method::Delete);
        assert_eq!(parsed.content_type(), Some("text/plain"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn oversized_head_is_rejected() {
        let req = vec![b'a'; 64];

        let result = parse_request_head(&req, 32);

        assert!(matches!(result, Err(ParseError::MalformedHeaders(_))));
    }
}
