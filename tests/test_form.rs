use porter::http::form::{parse_urlencoded, url_decode, url_decode_bytes, url_encode};

#[test]
fn test_urlencoded_basic_fields() {
    let fields = parse_urlencoded(b"key1=value1&key2=hello%20world");

    assert_eq!(fields.get("key1").unwrap(), "value1");
    assert_eq!(fields.get("key2").unwrap(), "hello world");
}

#[test]
fn test_urlencoded_plus_is_space() {
    let fields = parse_urlencoded(b"greeting=hello+world");
    assert_eq!(fields.get("greeting").unwrap(), "hello world");
}

#[test]
fn test_urlencoded_pair_without_equals_is_dropped() {
    let fields = parse_urlencoded(b"orphan&key=value");

    assert_eq!(fields.len(), 1);
    assert_eq!(fields.get("key").unwrap(), "value");
}

#[test]
fn test_urlencoded_duplicate_key_last_wins() {
    let fields = parse_urlencoded(b"key=first&key=second");
    assert_eq!(fields.get("key").unwrap(), "second");
}

#[test]
fn test_urlencoded_encoded_key() {
    let fields = parse_urlencoded(b"my%20key=my%20value");
    assert_eq!(fields.get("my key").unwrap(), "my value");
}

#[test]
fn test_urlencoded_empty_body() {
    // "" splits into one pair with no '=', which is dropped.
    assert!(parse_urlencoded(b"").is_empty());
}

#[test]
fn test_url_decode_trailing_percent_preserved() {
    assert_eq!(url_decode("100%"), "100%");
}

#[test]
fn test_url_decode_incomplete_hex_preserved() {
    assert_eq!(url_decode("a%4"), "a%4");
}

#[test]
fn test_url_decode_invalid_hex_preserved() {
    assert_eq!(url_decode("a%zzb"), "a%zzb");
}

#[test]
fn test_url_decode_basic_escapes() {
    assert_eq!(url_decode("%2Fpath%2Fto%2Ffile"), "/path/to/file");
    assert_eq!(url_decode("caf%C3%A9"), "café");
}

#[test]
fn test_url_decode_hex_is_case_insensitive() {
    assert_eq!(url_decode("%2f"), "/");
    assert_eq!(url_decode("%2F"), "/");
}

#[test]
fn test_url_encode_unreserved_passthrough() {
    assert_eq!(
        url_encode(b"AZaz09-_.~"),
        "AZaz09-_.~"
    );
}

#[test]
fn test_url_encode_uses_uppercase_hex() {
    assert_eq!(url_encode(b" "), "%20");
    assert_eq!(url_encode(&[0xff]), "%FF");
    assert_eq!(url_encode(b"/"), "%2F");
}

#[test]
fn test_url_encode_escapes_plus() {
    // A literal '+' would decode back as a space, so the encoder must never
    // emit one.
    assert_eq!(url_encode(b"a+b"), "a%2Bb");
}

#[test]
fn test_url_round_trip_all_bytes() {
    let all_bytes: Vec<u8> = (0u8..=255).collect();
    let encoded = url_encode(&all_bytes);
    let decoded = url_decode_bytes(encoded.as_bytes());

    assert_eq!(decoded, all_bytes);
}

#[test]
fn test_url_round_trip_filename() {
    let name = "my report (final) + notes.pdf";
    let encoded = url_encode(name.as_bytes());

    assert!(!encoded.contains(' '));
    assert!(!encoded.contains('+'));
    assert_eq!(url_decode(&encoded), name);
}
