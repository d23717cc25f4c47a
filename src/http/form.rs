//! Body decoding: URL-encoded forms, percent encoding, multipart/form-data.
//!
//! The decoder never self-selects a mode; the caller picks one based on the
//! request's `Content-Type`. None of these functions fail on malformed
//! input — they degrade to empty or literal results, so the caller can
//! always produce a well-formed response.

use std::collections::HashMap;

use crate::http::parser::find_header_end;

/// One file attachment extracted from a multipart body.
///
/// The filename and content type are whatever the client declared. The
/// filename in particular must never be used as a storage path without
/// stripping directory components first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub field_name: String,
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Decoded multipart body: plain form fields plus file attachments.
///
/// An empty `FormData` is also what a missing boundary or a wrong content
/// type produces, so callers must check for it explicitly rather than rely
/// on an error.
#[derive(Debug, Default)]
pub struct FormData {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

impl FormData {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.files.is_empty()
    }
}

/// Decodes an `application/x-www-form-urlencoded` body.
///
/// Pairs are split on `&`, each at the first `=`; a pair without `=` is
/// dropped. Keys and values are percent-decoded. Duplicate keys keep the
/// last occurrence.
pub fn parse_urlencoded(body: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(body);
    let mut fields = HashMap::new();

    for pair in text.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        fields.insert(url_decode(key), url_decode(value));
    }

    fields
}

/// Percent-decodes into raw bytes.
///
/// `%XX` becomes the byte it names, `+` becomes a space, and a `%` that is
/// not followed by two hex digits is kept literally.
pub fn url_decode_bytes(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            b'%' if i + 2 < input.len() => {
                let hex = std::str::from_utf8(&input[i + 1..i + 3]).ok();
                match hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }

    out
}

/// Percent-decodes into text, replacing invalid UTF-8 losslessly.
pub fn url_decode(input: &str) -> String {
    String::from_utf8_lossy(&url_decode_bytes(input.as_bytes())).into_owned()
}

/// Percent-encodes arbitrary bytes for use in a URL.
///
/// ASCII letters, digits, `-`, `_`, `.` and `~` pass through; everything
/// else becomes `%XX` with uppercase hex. `+` is escaped as `%2B`, never
/// emitted literally, so decoding is an exact inverse.
pub fn url_encode(input: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(input.len());

    for &byte in input {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }

    out
}

/// Decodes a `multipart/form-data` body.
///
/// `content_type` must contain the literal `multipart/form-data` and a
/// `boundary=` parameter (quoted or unquoted); otherwise the result is
/// empty. Parts are framed by scanning for the literal `--boundary`
/// delimiter, which assumes the delimiter never occurs inside part content —
/// an inherent limitation of delimiter-based framing for binary uploads.
/// No size or count limits are imposed here.
pub fn parse_multipart(content_type: &str, body: &[u8]) -> FormData {
    let mut data = FormData::default();

    let Some(boundary) = extract_boundary(content_type) else {
        return data;
    };
    let delimiter = format!("--{boundary}").into_bytes();

    let mut pos = 0;
    while pos < body.len() {
        let Some(start) = find(&body[pos..], &delimiter) else {
            break;
        };
        pos += start + delimiter.len();

        // "--" right after a delimiter marks the terminal boundary.
        if body[pos..].starts_with(b"--") {
            break;
        }

        // Skip the line terminator following the delimiter.
        if body[pos..].starts_with(b"\r\n") {
            pos += 2;
        } else if body[pos..].starts_with(b"\n") {
            pos += 1;
        }

        let Some(next) = find(&body[pos..], &delimiter) else {
            break;
        };
        read_part(&body[pos..pos + next], &mut data);
        pos += next;
    }

    data
}

/// Pulls the boundary parameter out of a `Content-Type` header value.
fn extract_boundary(content_type: &str) -> Option<String> {
    if !content_type.contains("multipart/form-data") {
        return None;
    }

    let (_, rest) = content_type.split_once("boundary=")?;
    let boundary = rest.trim();
    let boundary = boundary
        .strip_prefix('"')
        .and_then(|b| b.strip_suffix('"'))
        .unwrap_or(boundary);

    if boundary.is_empty() {
        None
    } else {
        Some(boundary.to_string())
    }
}

/// Parses one part (its headers and content) and records it as a field or
/// an uploaded file.
fn read_part(part: &[u8], data: &mut FormData) {
    let Some((sep, sep_len)) = find_header_end(part) else {
        return;
    };
    let headers = String::from_utf8_lossy(&part[..sep]);

    // The line terminator before the next delimiter belongs to the framing,
    // not the content.
    let mut content = &part[sep + sep_len..];
    while matches!(content.last(), Some(b'\r' | b'\n')) {
        content = &content[..content.len() - 1];
    }

    let mut field_name = String::new();
    let mut filename = String::new();
    let mut content_type = String::new();

    for line in headers.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(rest) = line.strip_prefix("Content-Disposition:") {
            if let Some(name) = quoted_param(rest, "name=\"") {
                field_name = name;
            }
            if let Some(name) = quoted_param(rest, "filename=\"") {
                filename = name;
            }
        } else if let Some(rest) = line.strip_prefix("Content-Type:") {
            content_type = rest.trim().to_string();
        }
    }

    if !filename.is_empty() {
        data.files.push(UploadedFile {
            field_name,
            filename,
            content_type,
            content: content.to_vec(),
        });
    } else {
        data.fields
            .insert(field_name, String::from_utf8_lossy(content).into_owned());
    }
}

/// Extracts a quoted parameter value: everything after `marker` up to the
/// next `"` (or the end of the line if the quote is never closed).
fn quoted_param(header: &str, marker: &str) -> Option<String> {
    let (_, rest) = header.split_once(marker)?;
    Some(rest.split('"').next().unwrap_or(rest).to_string())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
