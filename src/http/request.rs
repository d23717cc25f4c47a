use std::collections::HashMap;

use crate::http::cookie::parse_cookie_header;
use crate::http::form;
use crate::http::headers::Headers;

/// A parsed HTTP request.
///
/// The method is kept as the raw token so requests with methods this server
/// does not implement still parse and can be answered with 501 at dispatch.
/// The path is stored as received, possibly percent-encoded; use
/// [`Request::decoded_path`] when routing. The body is the raw byte
/// sequence after the header/body separator.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub version: String,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Request {
    /// A request is valid when it carries both a method and a path. The
    /// version is not required; the parser defaults it.
    pub fn is_valid(&self) -> bool {
        !self.method.is_empty() && !self.path.is_empty()
    }

    /// Retrieves a header value by name, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// The `Content-Length` header as a number, or 0 when missing or
    /// unparsable.
    pub fn content_length(&self) -> usize {
        self.header("content-length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// The request path with percent-encoding decoded.
    pub fn decoded_path(&self) -> String {
        form::url_decode(&self.path)
    }

    /// Parses the `Cookie` header into name/value pairs. Parsed on demand;
    /// an absent header yields an empty map.
    pub fn cookies(&self) -> HashMap<String, String> {
        self.header("cookie")
            .map(parse_cookie_header)
            .unwrap_or_default()
    }

    /// Looks up a single cookie by name.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookies().remove(name)
    }
}
