mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_with_generated_code() {
    let server = common::make_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["short_code"].as_str().unwrap();

    assert!((6..=8).contains(&code.len()));
    assert!(
        code.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    );
    assert_eq!(json["original_url"], "https://example.com/some/long/path");
    assert_eq!(json["clicks"], 0);
    assert!(json["last_clicked"].is_null());
    assert!(json["created_at"].is_string());
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, code));
}

#[tokio::test]
async fn test_create_with_custom_code() {
    let server = common::make_server();

    let json = common::create_link(&server, "https://example.com", Some("Promo24")).await;

    assert_eq!(json["short_code"], "Promo24");
    assert_eq!(json["short_url"], "https://sho.rt/Promo24");
}

#[tokio::test]
async fn test_create_empty_custom_code_generates() {
    let server = common::make_server();

    let json = common::create_link(&server, "https://example.com", Some("")).await;

    assert!(json["short_code"].as_str().unwrap().len() >= 6);
}

#[tokio::test]
async fn test_create_short_url_from_host_header() {
    let server = common::make_server_with_base(None);

    let response = server
        .post("/api/links")
        .add_header("host", "links.example.org")
        .add_header("x-forwarded-proto", "https")
        .json(&json!({ "original_url": "https://example.com", "custom_code": "abc123" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    assert_eq!(
        response.json::<Value>()["short_url"],
        "https://links.example.org/abc123"
    );
}

#[tokio::test]
async fn test_create_invalid_url() {
    let server = common::make_server();

    for url in ["not-a-url", "ftp://example.com/file", "javascript:alert(1)", ""] {
        let response = server
            .post("/api/links")
            .json(&json!({ "original_url": url }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
    }
}

#[tokio::test]
async fn test_create_missing_url() {
    let server = common::make_server();

    let response = server.post("/api/links").json(&json!({})).await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_create_url_too_long() {
    let server = common::make_server();
    let url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": url }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_invalid_custom_code() {
    let server = common::make_server();

    for code in ["abc", "abcdefghi", "abc-12", "héllo12", "healthz"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "original_url": "https://example.com", "custom_code": code }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_code");
    }
}

#[tokio::test]
async fn test_create_malformed_body() {
    let server = common::make_server();

    let response = server
        .post("/api/links")
        .content_type("application/json")
        .bytes("{ not json".into())
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_body");
}

#[tokio::test]
async fn test_create_duplicate_custom_code() {
    let server = common::make_server();
    common::create_link(&server, "https://a.com", Some("abc123")).await;

    let response = server
        .post("/api/links")
        .json(&json!({ "original_url": "https://b.com", "custom_code": "abc123" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "code_exists");
    assert!(json["error"]["message"].is_string());

    let stored = server.get("/api/links/abc123").await.json::<Value>();
    assert_eq!(stored["original_url"], "https://a.com");
}

#[tokio::test]
async fn test_create_codes_are_case_sensitive() {
    let server = common::make_server();
    common::create_link(&server, "https://a.com", Some("abc123")).await;

    let json = common::create_link(&server, "https://b.com", Some("ABC123")).await;

    assert_eq!(json["short_code"], "ABC123");
}

#[tokio::test]
async fn test_create_same_url_twice_gets_distinct_codes() {
    let server = common::make_server();

    let first = common::create_link(&server, "https://example.com", None).await;
    let second = common::create_link(&server, "https://example.com", None).await;

    assert_ne!(first["short_code"], second["short_code"]);
}

// ─── LIST ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_empty() {
    let server = common::make_server();

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_newest_first() {
    let server = common::make_server();
    common::create_link(&server, "https://a.com", Some("abc123")).await;
    common::create_link(&server, "https://b.com", Some("def456")).await;

    let response = server.get("/api/links").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["short_code"], "def456");
    assert_eq!(items[1]["short_code"], "abc123");
    assert!(items[0].get("short_url").is_none());
}

// ─── GET ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_link() {
    let server = common::make_server();
    common::create_link(&server, "https://example.com", Some("abc123")).await;

    let response = server.get("/api/links/abc123").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["short_code"], "abc123");
    assert_eq!(json["original_url"], "https://example.com");
    assert_eq!(json["clicks"], 0);
}

#[tokio::test]
async fn test_get_link_not_found() {
    let server = common::make_server();

    let response = server.get("/api/links/zzz999").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_link_malformed_code() {
    let server = common::make_server();

    let response = server.get("/api/links/ab").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_code");
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_link() {
    let server = common::make_server();
    common::create_link(&server, "https://example.com", Some("abc123")).await;

    let response = server.delete("/api/links/abc123").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({ "ok": true }));

    server.get("/api/links/abc123").await.assert_status_not_found();
    server.get("/abc123").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_twice() {
    let server = common::make_server();
    common::create_link(&server, "https://example.com", Some("abc123")).await;

    server.delete("/api/links/abc123").await.assert_status_ok();

    let response = server.delete("/api/links/abc123").await;

    response.assert_status_not_found();
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_delete_frees_code() {
    let server = common::make_server();
    common::create_link(&server, "https://a.com", Some("abc123")).await;
    server.delete("/api/links/abc123").await.assert_status_ok();

    let json = common::create_link(&server, "https://b.com", Some("abc123")).await;

    assert_eq!(json["original_url"], "https://b.com");
}

#[tokio::test]
async fn test_delete_malformed_code() {
    let server = common::make_server();

    let response = server.delete("/api/links/a_b").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_code");
}

#[tokio::test]
async fn test_undecodable_code_is_invalid() {
    let server = common::make_server();

    let response = server.get("/api/links/%FF%FE%FD").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_code");

    let response = server.delete("/api/links/%FF%FE%FD").await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_code");
}
