use crate::http::headers::Headers;
use crate::http::request::Request;

#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input buffer was empty.
    Empty,
    /// No header/body separator was found anywhere in the message.
    MissingSeparator,
    /// The request line did not yield both a method and a path.
    InvalidRequestLine,
}

/// Locates the header/body separator: `\r\n\r\n` preferred, bare `\n\n`
/// accepted as a lenient fallback for clients that only send LF. Returns
/// the separator's offset and length.
pub fn find_header_end(buf: &[u8]) -> Option<(usize, usize)> {
    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
        return Some((pos, 4));
    }
    buf.windows(2).position(|w| w == b"\n\n").map(|pos| (pos, 2))
}

/// Parses one complete raw message into a structured [`Request`].
///
/// The body is everything after the separator, verbatim. Header names are
/// lowercased at insertion so lookup is case-insensitive; a repeated header
/// overwrites the earlier value. Header lines without a colon are silently
/// dropped, and a missing version defaults to HTTP/1.1 — but a request line
/// missing its method or path makes the whole parse fail. There is no
/// partial success: the result is a valid request or an error.
pub fn parse_request(raw: &[u8]) -> Result<Request, ParseError> {
    if raw.is_empty() {
        return Err(ParseError::Empty);
    }

    let (sep, sep_len) = find_header_end(raw).ok_or(ParseError::MissingSeparator)?;
    let header_section = String::from_utf8_lossy(&raw[..sep]);
    let body = raw[sep + sep_len..].to_vec();

    let mut method = String::new();
    let mut path = String::new();
    let mut version = String::new();
    let mut headers = Headers::new();
    let mut saw_request_line = false;

    for line in header_section.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        if !saw_request_line {
            saw_request_line = true;

            let mut parts = line.split_whitespace();
            method = parts.next().unwrap_or_default().to_string();
            path = parts.next().unwrap_or_default().to_string();
            version = parts.next().unwrap_or("HTTP/1.1").to_string();
        } else {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            headers.insert(name.trim(), value.trim().to_string());
        }
    }

    let request = Request {
        method,
        path,
        version,
        headers,
        body,
    };

    if !request.is_valid() {
        return Err(ParseError::InvalidRequestLine);
    }

    Ok(request)
}
