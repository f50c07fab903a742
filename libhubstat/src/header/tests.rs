use super::*;
use reqwest::header::HeaderValue;

fn headers_with(key: &'static str, value: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(key, HeaderValue::from_static(value));
    headers
}

#[test]
fn test_parse_limit_with_policy_suffix() {
    let headers = headers_with("RateLimit-Limit", "100;w=21600");
    assert_eq!(parse_numeric_header(&headers, "RateLimit-Limit"), Ok(100));
}

#[test]
fn test_parse_remaining_with_policy_suffix() {
    let headers = headers_with("RateLimit-Remaining", "42;w=21600");
    assert_eq!(parse_numeric_header(&headers, "RateLimit-Remaining"), Ok(42));
}

#[test]
fn test_parse_plain_number() {
    let headers = headers_with("RateLimit-Limit", "200");
    assert_eq!(parse_numeric_header(&headers, "RateLimit-Limit"), Ok(200));
}

#[test]
fn test_parse_zero_remaining() {
    let headers = headers_with("RateLimit-Remaining", "0;w=21600");
    assert_eq!(parse_numeric_header(&headers, "RateLimit-Remaining"), Ok(0));
}

#[test]
fn test_lookup_is_case_insensitive() {
    let headers = headers_with("ratelimit-limit", "100;w=21600");
    assert_eq!(parse_numeric_header(&headers, "RateLimit-Limit"), Ok(100));
}

#[test]
fn test_missing_header_names_key() {
    let headers = HeaderMap::new();
    let err = parse_numeric_header(&headers, "RateLimit-Remaining").unwrap_err();

    assert_eq!(err, HeaderError::Missing("RateLimit-Remaining".to_string()));
    assert_eq!(err.to_string(), "Missing RateLimit-Remaining header");
}

#[test]
fn test_empty_header_is_missing() {
    let headers = headers_with("RateLimit-Limit", "");
    let err = parse_numeric_header(&headers, "RateLimit-Limit").unwrap_err();

    assert_eq!(err, HeaderError::Missing("RateLimit-Limit".to_string()));
}

#[test]
fn test_non_numeric_value_is_parse_error() {
    let headers = headers_with("RateLimit-Limit", "abc");
    let err = parse_numeric_header(&headers, "RateLimit-Limit").unwrap_err();

    assert!(matches!(err, HeaderError::Parse(_)));
    // transparent: the message is the ParseIntError's own
    assert_eq!(err.to_string(), "abc".parse::<u64>().unwrap_err().to_string());
}

#[test]
fn test_negative_value_is_rejected() {
    let headers = headers_with("RateLimit-Remaining", "-1;w=21600");
    let err = parse_numeric_header(&headers, "RateLimit-Remaining").unwrap_err();

    assert!(matches!(err, HeaderError::Parse(_)));
}

#[test]
fn test_leading_semicolon_is_parse_error() {
    let headers = headers_with("RateLimit-Limit", ";w=21600");
    let err = parse_numeric_header(&headers, "RateLimit-Limit").unwrap_err();

    assert!(matches!(err, HeaderError::Parse(_)));
}

#[test]
fn test_non_ascii_value_is_not_text() {
    let mut headers = HeaderMap::new();
    headers.insert(
        "RateLimit-Limit",
        HeaderValue::from_bytes(b"10\xff").unwrap(),
    );
    let err = parse_numeric_header(&headers, "RateLimit-Limit").unwrap_err();

    assert_eq!(err, HeaderError::NotText("RateLimit-Limit".to_string()));
}
