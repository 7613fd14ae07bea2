use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use video_recorder_backend::config::AppConfig;
use video_recorder_backend::infrastructure::{database, storage};
use video_recorder_backend::{AppState, create_app};

const BOUNDARY: &str = "---------------------------123456789012345678901234567";

struct TestApp {
    app: Router,
    storage_dir: String,
    _dir: tempfile::TempDir,
}

async fn setup_app() -> TestApp {
    setup_app_with(|_| {}).await
}

async fn setup_app_with(adjust: impl FnOnce(&mut AppConfig)) -> TestApp {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new("video_recorder_backend=debug,tower_http=debug"))
        .with(fmt::layer().with_test_writer())
        .try_init();

    let dir = tempfile::tempdir().unwrap();
    let storage_dir = dir.path().join("videos").to_string_lossy().to_string();
    let mut config = AppConfig::for_testing(storage_dir.clone());
    adjust(&mut config);

    let db = database::setup_database(&config).await.unwrap();
    let storage_service = storage::setup_storage(&config).await.unwrap();
    let state = AppState::new(db, storage_service, config);

    TestApp {
        app: create_app(state),
        storage_dir,
        _dir: dir,
    }
}

fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
        Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
        Content-Type: video/webm\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(filename: &str, content: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/videos")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body("file", filename, content)))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn sample_video() -> Vec<u8> {
    // EBML magic followed by arbitrary binary payload
    let mut data = vec![0x1A, 0x45, 0xDF, 0xA3];
    data.extend((0u8..=255).cycle().take(8192));
    data
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn upload(app: &Router, filename: &str, content: &[u8]) -> Value {
    let (status, body) = send(app, upload_request(filename, content)).await;
    if status != StatusCode::OK {
        panic!(
            "Upload failed: {} - {:?}",
            status,
            String::from_utf8_lossy(&body)
        );
    }
    serde_json::from_slice(&body).unwrap()
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = send(app, empty_request("GET", "/videos")).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    json.as_array().unwrap().clone()
}

fn stored_files(dir: &str) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_upload_fetch_delete_flow() {
    let t = setup_app().await;
    let content = sample_video();

    // 1. Upload
    let video = upload(&t.app, "clip.webm", &content).await;
    let filename = video["filename"].as_str().unwrap().to_string();
    let token = filename.strip_suffix(".webm").expect("extension kept");
    assert!(Uuid::parse_str(token).is_ok(), "token was {}", token);
    assert_eq!(
        video["filepath"].as_str().unwrap(),
        format!("{}/{}", t.storage_dir, filename)
    );
    let id = video["id"].as_i64().unwrap();

    // 2. Fetch returns identical bytes tagged as webm
    let response = t
        .app
        .clone()
        .oneshot(empty_request("GET", &format!("/videos/{}", filename)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "video/webm"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), content.as_slice());

    // 3. Listed
    let videos = list(&t.app).await;
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["id"].as_i64().unwrap(), id);
    assert_eq!(videos[0]["filename"].as_str().unwrap(), filename);

    // 4. Delete
    let (status, body) = send(&t.app, empty_request("DELETE", &format!("/videos/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap(), "Video deleted successfully");
    assert_eq!(stored_files(&t.storage_dir), 0);

    // 5. Gone
    let (status, _) = send(&t.app, empty_request("GET", &format!("/videos/{}", filename))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(list(&t.app).await.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_id_leaves_store_unchanged() {
    let t = setup_app().await;
    upload(&t.app, "clip.webm", b"keep me").await;

    let (status, _) = send(&t.app, empty_request("DELETE", "/videos/9999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(list(&t.app).await.len(), 1);
    assert_eq!(stored_files(&t.storage_dir), 1);
}

#[tokio::test]
async fn test_delete_when_file_already_removed() {
    let t = setup_app().await;
    let video = upload(&t.app, "clip.webm", b"short-lived").await;
    std::fs::remove_file(video["filepath"].as_str().unwrap()).unwrap();

    let id = video["id"].as_i64().unwrap();
    let (status, _) = send(&t.app, empty_request("DELETE", &format!("/videos/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list(&t.app).await.is_empty());
}

#[tokio::test]
async fn test_fetch_missing_file_returns_not_found() {
    let t = setup_app().await;
    let video = upload(&t.app, "clip.webm", b"soon gone").await;
    let filename = video["filename"].as_str().unwrap();

    // Removed out-of-band; the record stays
    std::fs::remove_file(video["filepath"].as_str().unwrap()).unwrap();

    let (status, _) = send(&t.app, empty_request("GET", &format!("/videos/{}", filename))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(list(&t.app).await.len(), 1);
}

#[tokio::test]
async fn test_fetch_unknown_filename_returns_not_found() {
    let t = setup_app().await;
    let (status, body) = send(&t.app, empty_request("GET", "/videos/nothing.webm")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_upload_without_extension_is_rejected() {
    let t = setup_app().await;

    let (status, body) = send(&t.app, upload_request("clipwebm", b"data")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("MISSING_EXTENSION"));

    assert_eq!(stored_files(&t.storage_dir), 0);
    assert!(list(&t.app).await.is_empty());
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let t = setup_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/videos")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body("video", "clip.webm", b"data")))
        .unwrap();

    let (status, _) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(list(&t.app).await.is_empty());
}

#[tokio::test]
async fn test_concurrent_uploads_get_distinct_names() {
    let t = setup_app().await;

    let (a, b) = tokio::join!(
        upload(&t.app, "clip.webm", b"first"),
        upload(&t.app, "clip.webm", b"second"),
    );

    assert_ne!(a["filename"], b["filename"]);
    assert_ne!(a["id"], b["id"]);
    assert_eq!(list(&t.app).await.len(), 2);
    assert_eq!(stored_files(&t.storage_dir), 2);
}

#[tokio::test]
async fn test_update_overwrites_metadata_only() {
    let t = setup_app().await;
    let video = upload(&t.app, "clip.webm", b"payload").await;
    let id = video["id"].as_i64().unwrap();
    let original_path = video["filepath"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/videos/{}", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"filename": "renamed.webm", "filepath": "videos/nowhere.webm"}"#,
        ))
        .unwrap();
    let (status, body) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let videos = list(&t.app).await;
    assert_eq!(videos[0]["filename"], "renamed.webm");
    assert_eq!(videos[0]["filepath"], "videos/nowhere.webm");

    // The original file is untouched and the new path is not validated
    assert!(std::path::Path::new(&original_path).exists());
    let (status, _) = send(&t.app, empty_request("GET", "/videos/renamed.webm")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_unknown_id_succeeds() {
    let t = setup_app().await;

    let req = Request::builder()
        .method("PUT")
        .uri("/videos/4242")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"filename": "x.webm", "filepath": "videos/x.webm"}"#))
        .unwrap();
    let (status, _) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(list(&t.app).await.is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let t = setup_app().await;

    let (status, _) = send(&t.app, empty_request("DELETE", "/videos/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method("PUT")
        .uri("/videos/abc")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"filename": "x.webm"}"#))
        .unwrap();
    let (status, _) = send(&t.app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_cross_origin() {
    let t = setup_app().await;

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .header(header::ORIGIN, "http://example.com")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-123");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "connected");
    assert_eq!(json["storage"], "available");
}

#[tokio::test]
async fn test_request_id_generated_when_absent() {
    let t = setup_app().await;
    let response = t
        .app
        .clone()
        .oneshot(empty_request("GET", "/videos"))
        .await
        .unwrap();

    let request_id = response.headers().get("x-request-id").unwrap();
    assert!(Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_upload_over_size_limit_is_rejected() {
    let t = setup_app_with(|config| config.max_file_size = 1024).await;

    let (status, body) = send(&t.app, upload_request("clip.webm", &[7u8; 8192])).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("maximum allowed limit"));

    assert_eq!(stored_files(&t.storage_dir), 0);
    assert!(list(&t.app).await.is_empty());

    // Uploads under the limit still go through
    upload(&t.app, "small.webm", &[7u8; 128]).await;
    assert_eq!(list(&t.app).await.len(), 1);
}

#[tokio::test]
async fn test_health_reports_missing_storage() {
    let t = setup_app().await;
    std::fs::remove_dir_all(&t.storage_dir).unwrap();

    let (status, body) = send(&t.app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["storage"], "missing");
    assert_eq!(json["database"], "connected");
}
