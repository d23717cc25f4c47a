use std::collections::HashMap;

/// A cookie to be set on a response.
///
/// Serializes as `name=value`, then `; Path=<path>` if a path was supplied,
/// then `; Max-Age=<n>` if a non-negative max-age was supplied, in that
/// order. A max-age of 0 tells the client to drop the cookie; a negative or
/// absent max-age makes it a session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub max_age: Option<i64>,
    pub path: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            max_age: None,
            path: None,
        }
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Builds the value of one `Set-Cookie` header line.
    pub fn header_value(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);

        if let Some(path) = &self.path {
            if !path.is_empty() {
                out.push_str("; Path=");
                out.push_str(path);
            }
        }

        if let Some(age) = self.max_age {
            if age >= 0 {
                out.push_str(&format!("; Max-Age={age}"));
            }
        }

        out
    }
}

/// Parses a `Cookie` request header: semicolon-separated `name=value` pairs,
/// each side trimmed of surrounding whitespace. Pairs without `=` are
/// dropped.
pub fn parse_cookie_header(header: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for pair in header.split(';') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        cookies.insert(name.trim().to_string(), value.trim().to_string());
    }

    cookies
}
