use crate::http::cookie::Cookie;
use crate::http::headers::Headers;

/// Protocol version emitted on every response.
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Maps a status code to its reason phrase. Any code outside the table maps
/// to "Unknown". Existing clients and tests expect these exact phrases.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        400 => "Bad Request",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        _ => "Unknown",
    }
}

/// A structured HTTP response, built up by handlers and serialized by the
/// writer.
///
/// Cookies are stored as pre-built `Set-Cookie` values; each becomes its own
/// header line on the wire, never combined into one.
#[derive(Debug)]
pub struct Response {
    pub version: &'static str,
    pub status: u16,
    pub headers: Headers,
    pub cookies: Vec<String>,
    pub body: Vec<u8>,
}

impl Default for Response {
    fn default() -> Self {
        Self::new()
    }
}

impl Response {
    /// A fresh 200 response with no headers and an empty body.
    pub fn new() -> Self {
        Self {
            version: HTTP_VERSION,
            status: 200,
            headers: Headers::new(),
            cookies: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn reason(&self) -> &'static str {
        reason_phrase(self.status)
    }

    pub fn set_status(&mut self, code: u16) {
        self.status = code;
    }

    /// Adds or replaces a header.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name, value);
    }

    /// Replaces the body and recomputes `Content-Length` from its exact byte
    /// length, overwriting any earlier value. Mutating the body any other
    /// way would leave the header stale, so all handlers go through here.
    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
        self.headers
            .insert("Content-Length", self.body.len().to_string());
    }

    /// Queues one `Set-Cookie` line.
    pub fn set_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie.header_value());
    }

    /// Shorthand for an HTML response with the given status.
    pub fn html(status: u16, body: impl Into<String>) -> Self {
        let mut response = Self::new();
        response.set_status(status);
        response.set_header("Content-Type", "text/html");
        response.set_body(body.into().into_bytes());
        response
    }
}
