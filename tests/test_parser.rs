use porter::http::parser::{ParseError, parse_request};

#[test]
fn test_parse_simple_get_request() {
    let raw = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.header("Host"), Some("example.com"));
    assert!(parsed.body.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let raw = b"POST /submit HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.method, "POST");
    assert_eq!(parsed.path, "/submit");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_body_is_verbatim_after_separator() {
    // Everything after the separator belongs to the body, even bytes beyond
    // the declared Content-Length.
    let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 2\r\n\r\nhello";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_lf_only_separator_fallback() {
    let raw = b"GET /page HTTP/1.1\nHost: example.com\n\nrest";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.path, "/page");
    assert_eq!(parsed.header("host"), Some("example.com"));
    assert_eq!(parsed.body, b"rest".to_vec());
}

#[test]
fn test_parse_empty_input_fails() {
    assert_eq!(parse_request(b"").unwrap_err(), ParseError::Empty);
}

#[test]
fn test_parse_missing_separator_fails() {
    let raw = b"GET / HTTP/1.1\r\nHost: example.com\r\n";
    assert_eq!(parse_request(raw).unwrap_err(), ParseError::MissingSeparator);
}

#[test]
fn test_parse_header_lookup_is_case_insensitive() {
    let raw = b"GET / HTTP/1.1\r\nContent-Type: application/json\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.header("content-type"), Some("application/json"));
    assert_eq!(parsed.header("Content-Type"), Some("application/json"));
    assert_eq!(parsed.header("CONTENT-TYPE"), Some("application/json"));
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let raw = b"GET / HTTP/1.1\r\nX-Tag: first\r\nX-Tag: second\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.header("x-tag"), Some("second"));
}

#[test]
fn test_parse_header_line_without_colon_is_skipped() {
    let raw = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.header("host"), Some("example.com"));
    assert_eq!(parsed.headers.len(), 1);
}

#[test]
fn test_parse_header_whitespace_is_trimmed() {
    let raw = b"GET / HTTP/1.1\r\nHost:   example.com  \r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.header("host"), Some("example.com"));
}

#[test]
fn test_parse_missing_version_defaults() {
    let raw = b"GET /index.html\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.method, "GET");
    assert_eq!(parsed.path, "/index.html");
    assert_eq!(parsed.version, "HTTP/1.1");
}

#[test]
fn test_parse_request_line_missing_path_fails() {
    let raw = b"GET\r\nHost: example.com\r\n\r\n";
    assert_eq!(
        parse_request(raw).unwrap_err(),
        ParseError::InvalidRequestLine
    );
}

#[test]
fn test_parse_blank_request_line_only_fails() {
    let raw = b"\r\n\r\n";
    assert_eq!(
        parse_request(raw).unwrap_err(),
        ParseError::InvalidRequestLine
    );
}

#[test]
fn test_parse_unknown_method_is_preserved() {
    // Unknown methods still parse; the dispatcher answers them with 501.
    let raw = b"BREW /coffee HTTP/1.1\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.method, "BREW");
}

#[test]
fn test_parse_request_with_query_string() {
    let raw = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_binary_body_preserved() {
    let raw = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_parse_stray_cr_line_in_header_section_is_skipped() {
    // Mixed line endings can leave a lone "\r" line before the separator;
    // it must not end up in the header map.
    let raw = b"GET / HTTP/1.1\n\r\nHost: example.com\n\nbody";
    let parsed = parse_request(raw).unwrap();

    assert_eq!(parsed.header("host"), Some("example.com"));
    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.body, b"body".to_vec());
}
