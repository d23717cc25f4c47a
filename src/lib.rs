//! Porter - a small HTTP/1.1 file server
//!
//! Core library: HTTP message framing and parsing, plus the dispatcher that
//! routes parsed requests to handlers.

pub mod config;
pub mod http;
pub mod server;
pub mod session;
