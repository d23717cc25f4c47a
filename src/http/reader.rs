//! Reads a connection until a complete HTTP message is buffered.
//!
//! End-of-message detection works like this: find the header/body separator,
//! then read the body out to `Content-Length` if one was declared. Without a
//! declared length, GET and DELETE requests are assumed body-less, and any
//! other method falls back to "stop at the first read shorter than the
//! chunk size". That heuristic is not a correctness guarantee — a slow
//! client can split a body across packets and get it truncated — but it is
//! the observable behavior this server inherits, kept rather than silently
//! fixed.
//!
//! No read deadline is imposed here. A client that never sends the header
//! terminator parks the read indefinitely; callers needing robustness must
//! wrap the call in their own timeout.

use anyhow::Result;
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::parser::find_header_end;

/// Per-read chunk size.
pub const BUFFER_SIZE: usize = 4096;

/// Accumulates bytes from `stream` until a complete message is present and
/// returns the whole buffer.
///
/// A zero-length read terminates accumulation immediately; an empty result
/// means the connection closed before sending anything, and the caller must
/// treat it as terminal rather than retry. IO errors propagate.
pub async fn read_message<S>(stream: &mut S) -> Result<Bytes>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(BUFFER_SIZE);
    let mut chunk = [0u8; BUFFER_SIZE];

    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);

        let Some((sep, sep_len)) = find_header_end(&buffer) else {
            continue;
        };
        let body_received = buffer.len() - (sep + sep_len);

        if let Some(expected) = declared_content_length(&buffer[..sep]) {
            if body_received >= expected {
                break;
            }
        } else if assumes_no_body(&buffer) {
            break;
        } else if n < BUFFER_SIZE {
            // Short read: no more data immediately available.
            break;
        }
    }

    Ok(buffer.freeze())
}

/// Scans the raw header section for a `Content-Length` value,
/// case-insensitively. An unparsable value counts as absent.
fn declared_content_length(header_section: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(header_section);

    for line in text.split('\n') {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("content-length") {
            return value.trim().parse().ok();
        }
    }

    None
}

/// GET and DELETE requests are assumed to carry no body when no
/// `Content-Length` is declared.
fn assumes_no_body(buffer: &[u8]) -> bool {
    buffer.starts_with(b"GET") || buffer.starts_with(b"DELETE")
}
