// crates/server/tests/http_tests.rs
//! End-to-end tests driving the router without a socket

use axum::body::{to_bytes, Body};
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bookcaster_config::Config;
use bookcaster_server::{router, AppState};
use chrono::NaiveDate;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

fn create_file(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Library with `Author1/Book1/{a,b,sub/c}.mp3` and a single-file book
fn setup() -> (TempDir, Router) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_file(root, "Author1/Book1/b.mp3", &[0u8; 200]);
    create_file(root, "Author1/Book1/a.mp3", b"ID3\x03\x00\x00\x00\x00\x00\x00");
    create_file(root, "Author1/Book1/sub/c.mp3", &[0u8; 2048]);
    create_file(root, "Author1/Novella.mp3", &[0u8; 64]);
    create_file(root, "Author2/Other/x.m4b", b"\x00\x00\x00\x20ftypM4B \x00\x00\x00\x00");
    create_file(root, ".hidden/Book/x.mp3", &[0u8; 4]);

    let mut config = Config::default();
    config.library.root = root.to_path_buf();
    config.feed.start_date = NaiveDate::from_ymd_opt(2020, 1, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    config.server.trusted_proxies = vec!["10.0.0.1".to_string()];

    let app = router(AppState::shared(&config));
    (temp_dir, app)
}

async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "books.local:8080")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn test_authors_json() {
    let (_dir, app) = setup();
    let response = get(&app, "/authors.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"["Author1","Author2"]"#);
}

#[tokio::test]
async fn test_authors_xml() {
    let (_dir, app) = setup();
    let response = get(&app, "/authors.xml").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/xml");
    let body = body_string(response).await;
    assert!(body.contains("<authors>"));
    assert!(body.contains("<author>Author1</author>"));
    assert!(body.contains("<author>Author2</author>"));
}

#[tokio::test]
async fn test_index_is_html_author_list() {
    let (_dir, app) = setup();
    let response = get(&app, "/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(content_type(&response).starts_with("text/html"));
    let body = body_string(response).await;
    assert!(body.contains(r#"<a href="books.html?author=Author1">Author1</a>"#));
    assert!(!body.contains(".hidden"));
}

#[tokio::test]
async fn test_books_json() {
    let (_dir, app) = setup();
    let response = get(&app, "/books.json?author=Author1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, r#"["Book1","Novella.mp3"]"#);
}

#[tokio::test]
async fn test_books_xml() {
    let (_dir, app) = setup();
    let body = body_string(get(&app, "/books.xml?author=Author2").await).await;

    assert!(body.contains("<books>"));
    assert!(body.contains("<book>Other</book>"));
}

#[tokio::test]
async fn test_files_json() {
    let (_dir, app) = setup();
    let response = get(&app, "/files.json?author=Author1&book=Book1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let files: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        files,
        serde_json::json!([
            {"filename": "a.mp3", "filesize": 10},
            {"filename": "b.mp3", "filesize": 200},
            {"filename": "sub/c.mp3", "filesize": 2048}
        ])
    );
}

#[tokio::test]
async fn test_files_html_shows_human_sizes() {
    let (_dir, app) = setup();
    let body = body_string(get(&app, "/files?author=Author1&book=Book1").await).await;

    assert!(body.contains("200 bytes"));
    assert!(body.contains("2.00KB"));
    assert!(body.contains(r#"href="audio?author=Author1&amp;book=Book1&amp;file=sub%2Fc.mp3""#));
}

#[tokio::test]
async fn test_feed() {
    let (_dir, app) = setup();
    let response = get(&app, "/feed.xml?author=Author1&book=Book1").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/xml");

    let body = body_string(response).await;
    assert!(body.contains("<title>Author1 - Book1</title>"));
    assert!(body.contains("<pubDate>Fri, 10 Jan 2020 00:00:00</pubDate>"));
    assert!(body.contains("<pubDate>Thu, 9 Jan 2020 00:00:00</pubDate>"));
    assert!(body.contains("<pubDate>Wed, 8 Jan 2020 00:00:00</pubDate>"));
    assert!(body.contains(
        r#"url="http://books.local:8080/audio?author=Author1&amp;book=Book1&amp;file=a.mp3" length="10" type="audio/mpeg""#
    ));
    assert!(body.contains(r#"length="200" type="audio/mp3""#));

    let a = body.find("<title>a.mp3</title>").unwrap();
    let b = body.find("<title>b.mp3</title>").unwrap();
    let c = body.find("<title>sub/c.mp3</title>").unwrap();
    assert!(a < b && b < c);
}

#[tokio::test]
async fn test_feed_is_xml_for_any_known_format() {
    let (_dir, app) = setup();
    let response = get(&app, "/feed?author=Author1&book=Novella.mp3").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "text/xml");
    assert!(body_string(response).await.contains("<title>Novella.mp3</title>"));
}

#[tokio::test]
async fn test_feed_behind_trusted_proxy() {
    let (_dir, app) = setup();

    let mut request = Request::builder()
        .uri("/feed.xml?author=Author1&book=Book1")
        .header(header::HOST, "internal:8080")
        .header("X-Forwarded-Proto", "https")
        .header("X-Forwarded-Host", "books.example.com")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 40000))));

    let body = body_string(app.clone().oneshot(request).await.unwrap()).await;
    assert!(body.contains("https://books.example.com/audio?author=Author1"));
}

#[tokio::test]
async fn test_forwarded_headers_ignored_from_unknown_peer() {
    let (_dir, app) = setup();

    let mut request = Request::builder()
        .uri("/feed.xml?author=Author1&book=Book1")
        .header(header::HOST, "internal:8080")
        .header("X-Forwarded-Proto", "https")
        .header("X-Forwarded-Host", "evil.example.com")
        .body(Body::empty())
        .unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 20], 40000))));

    let body = body_string(app.clone().oneshot(request).await.unwrap()).await;
    assert!(body.contains("http://internal:8080/audio?author=Author1"));
    assert!(!body.contains("evil.example.com"));
}

#[tokio::test]
async fn test_audio_stream() {
    let (dir, app) = setup();
    let response = get(&app, "/audio?author=Author1&book=Book1&file=sub%2Fc.mp3").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(content_type(&response), "audio/mp3");
    assert_eq!(
        response.headers().get(header::CONTENT_LENGTH).unwrap(),
        "2048"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let expected = fs::read(dir.path().join("Author1/Book1/sub/c.mp3")).unwrap();
    assert_eq!(bytes.to_vec(), expected);
}

#[tokio::test]
async fn test_audio_single_file_book() {
    let (_dir, app) = setup();
    let response = get(&app, "/audio?author=Author1&book=Novella.mp3&file=ignored").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "64");
}

#[tokio::test]
async fn test_error_statuses() {
    let (_dir, app) = setup();

    let cases = [
        ("/books.json?author=Nobody", StatusCode::NOT_FOUND),
        ("/books.json", StatusCode::BAD_REQUEST),
        ("/files.json?author=Author1", StatusCode::BAD_REQUEST),
        ("/feed.xml?author=Author1&book=Missing", StatusCode::NOT_FOUND),
        ("/audio?author=Author1&book=Book1", StatusCode::BAD_REQUEST),
        ("/audio?author=Author1&book=Book1&file=missing.mp3", StatusCode::NOT_FOUND),
        ("/audio?author=..&book=Book1&file=a.mp3", StatusCode::BAD_REQUEST),
        ("/audio?author=Author1&book=Book1&file=..%2F..%2Fsecret", StatusCode::BAD_REQUEST),
        ("/books.json?author=%2Fetc", StatusCode::BAD_REQUEST),
        ("/covers.json", StatusCode::NOT_FOUND),
        ("/authors.yaml", StatusCode::NOT_FOUND),
        ("/files.xml?author=Author1&book=Book1", StatusCode::NOT_FOUND),
    ];

    for (uri, expected) in cases {
        assert_eq!(get(&app, uri).await.status(), expected, "{}", uri);
    }
}
