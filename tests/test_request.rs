use porter::http::headers::Headers;
use porter::http::request::Request;

fn request_with_headers(pairs: &[(&str, &str)]) -> Request {
    let mut headers = Headers::new();
    for (name, value) in pairs {
        headers.insert(name, value.to_string());
    }

    Request {
        method: "GET".to_string(),
        path: "/".to_string(),
        version: "HTTP/1.1".to_string(),
        headers,
        body: vec![],
    }
}

#[test]
fn test_request_header_retrieval() {
    let req = request_with_headers(&[
        ("Host", "example.com"),
        ("Content-Type", "application/json"),
    ]);

    assert_eq!(req.header("Host"), Some("example.com"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("Missing"), None);
}

#[test]
fn test_request_validity() {
    let valid = request_with_headers(&[]);
    assert!(valid.is_valid());

    let mut no_method = request_with_headers(&[]);
    no_method.method = String::new();
    assert!(!no_method.is_valid());

    let mut no_path = request_with_headers(&[]);
    no_path.path = String::new();
    assert!(!no_path.is_valid());
}

#[test]
fn test_request_content_length_parsing() {
    let req = request_with_headers(&[("Content-Length", "42")]);
    assert_eq!(req.content_length(), 42);
}

#[test]
fn test_request_content_length_missing_or_invalid() {
    let missing = request_with_headers(&[]);
    assert_eq!(missing.content_length(), 0);

    let invalid = request_with_headers(&[("Content-Length", "not-a-number")]);
    assert_eq!(invalid.content_length(), 0);
}

#[test]
fn test_request_decoded_path() {
    let mut req = request_with_headers(&[]);
    req.path = "/files/hello%20world.txt".to_string();

    assert_eq!(req.decoded_path(), "/files/hello world.txt");
}

#[test]
fn test_request_cookie_parsing() {
    let req = request_with_headers(&[(
        "Cookie",
        "session_id=sess_abc123; username=alice",
    )]);

    let cookies = req.cookies();
    assert_eq!(cookies.get("session_id").unwrap(), "sess_abc123");
    assert_eq!(cookies.get("username").unwrap(), "alice");
}

#[test]
fn test_request_cookie_pairs_are_trimmed() {
    let req = request_with_headers(&[("Cookie", "  a = 1 ;  b=2;c= 3 ")]);

    let cookies = req.cookies();
    assert_eq!(cookies.get("a").unwrap(), "1");
    assert_eq!(cookies.get("b").unwrap(), "2");
    assert_eq!(cookies.get("c").unwrap(), "3");
}

#[test]
fn test_request_cookie_pair_without_equals_is_dropped() {
    let req = request_with_headers(&[("Cookie", "garbage; a=1")]);

    let cookies = req.cookies();
    assert_eq!(cookies.len(), 1);
    assert_eq!(cookies.get("a").unwrap(), "1");
}

#[test]
fn test_request_single_cookie_lookup() {
    let req = request_with_headers(&[("Cookie", "session_id=sess_xyz")]);

    assert_eq!(req.cookie("session_id"), Some("sess_xyz".to_string()));
    assert_eq!(req.cookie("missing"), None);
}

#[test]
fn test_request_without_cookie_header_has_no_cookies() {
    let req = request_with_headers(&[]);
    assert!(req.cookies().is_empty());
}
