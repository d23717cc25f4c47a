//! HTTP protocol implementation.
//!
//! The framing and parsing core of the server, organized as:
//!
//! - **`reader`**: accumulates connection bytes until a complete message is
//!   buffered (header terminator plus the expected body length)
//! - **`parser`**: decomposes a complete raw message into a [`request::Request`]
//! - **`request`** / **`headers`** / **`cookie`**: the parsed-request data
//!   model, with case-insensitive header names and lazy cookie parsing
//! - **`form`**: body decoding — URL-encoded forms, percent encoding, and
//!   multipart/form-data (fields plus uploaded files)
//! - **`response`** / **`writer`**: the structured response and its
//!   serialization back into protocol-correct bytes
//! - **`mime`**: content-type detection from file extensions
//! - **`connection`**: the per-connection driver tying the above together
//!
//! Everything in the core is a pure transformation over a buffer: no shared
//! state, safe to call from any number of connection tasks concurrently.
//!
//! Data flow:
//!
//! ```text
//! connection bytes -> reader -> raw message -> parser -> Request
//!     -> (dispatcher, using form as needed) -> Response -> writer -> bytes
//! ```

pub mod connection;
pub mod cookie;
pub mod form;
pub mod headers;
pub mod mime;
pub mod parser;
pub mod reader;
pub mod request;
pub mod response;
pub mod writer;
