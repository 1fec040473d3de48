//! Edge case tests for bri11iant-net
//!
//! Request building and loading resources from disk.

use std::io::Write;

use bri11iant_net::*;

// ============================================================================
// REQUEST BUILDER TESTS
// ============================================================================

#[test]
fn test_request_get() {
    let req = Request::get("https://example.com");
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, "https://example.com");
    assert!(req.headers.is_empty());
    assert!(req.body.is_none());
}

#[test]
fn test_request_with_headers() {
    let req = Request::get("https://example.com")
        .with_header("Accept", "text/css")
        .with_header("X-Custom-Header", "value")
        .with_header("Accept", "text/plain");

    assert_eq!(req.headers.len(), 2);
    assert_eq!(req.headers.get("Accept").unwrap(), "text/plain");
}

#[test]
fn test_request_json_body() {
    let req = Request::post("https://telemetry.example/diagnostics").with_json(r#"{"a":1}"#);
    assert_eq!(req.body.as_deref(), Some(br#"{"a":1}"#.as_slice()));
}

// ============================================================================
// FILE LOADING TESTS
// ============================================================================

#[test]
fn test_fetch_stylesheet_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site.css");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(b"body { color: #333; }")
        .unwrap();

    let url = Url::from_file_path(&path).unwrap();
    let response = smol::block_on(ResourceLoader::new().fetch(url.as_str())).unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type.as_deref(), Some("text/css"));
    assert_eq!(response.text().unwrap(), "body { color: #333; }");
}

#[test]
fn test_fetch_text_normalizes_dot_segments() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("pages")).unwrap();
    std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

    let base = Url::from_directory_path(dir.path().join("pages")).unwrap();
    let url = format!("{}../app.js", base);
    let text = smol::block_on(ResourceLoader::new().fetch_text(&url)).unwrap();

    assert_eq!(text, "console.log(1)");
}

#[test]
fn test_fetch_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let url = Url::from_file_path(dir.path().join("missing.css")).unwrap();
    let result = smol::block_on(ResourceLoader::new().fetch(url.as_str()));

    assert!(matches!(result, Err(NetError::Io { .. })));
}

#[test]
fn test_post_to_file_is_unsupported() {
    let result = smol::block_on(ResourceLoader::new().request(Request::post("file:///tmp/x")));
    assert!(matches!(result, Err(NetError::UnsupportedScheme(_))));
}

// ============================================================================
// RESPONSE TESTS
// ============================================================================

#[test]
fn test_response_invalid_utf8() {
    let response = Response {
        status: 200,
        content_type: None,
        body: vec![0xff, 0xfe],
    };
    assert!(matches!(response.text(), Err(NetError::InvalidEncoding(_))));
    assert!(response.is_success());
}

#[test]
fn test_response_json() {
    let response = Response {
        status: 201,
        content_type: Some("application/json".into()),
        body: br#"{"ok":true}"#.to_vec(),
    };
    let value: serde_json::Value = response.json().unwrap();
    assert_eq!(value["ok"], true);
}

#[test]
fn test_user_agent_override() {
    let loader = ResourceLoader::new().with_user_agent("custom/1.0");
    assert_eq!(loader.user_agent(), "custom/1.0");
    assert!(ResourceLoader::new().user_agent().starts_with("bri11iant/"));
}
