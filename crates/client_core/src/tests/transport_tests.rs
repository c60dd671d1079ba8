use std::sync::Arc;

use super::*;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::error::{ErrorCategory, CONNECTION_FAILURE_MESSAGE, SERVICE_FAILURE_FALLBACK};
use tokio::{net::TcpListener, sync::Mutex};

const BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
struct ReceivedPart {
    name: Option<String>,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

#[derive(Clone)]
struct ServerState {
    reply_status: StatusCode,
    reply_body: Arc<String>,
    received: Arc<Mutex<Vec<Vec<ReceivedPart>>>>,
}

async fn handle_upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    state.received.lock().await.push(parts);
    (state.reply_status, state.reply_body.as_ref().clone())
}

async fn spawn_upload_server(
    reply_status: StatusCode,
    reply_body: impl Into<String>,
) -> (String, Arc<Mutex<Vec<Vec<ReceivedPart>>>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        reply_status,
        reply_body: Arc::new(reply_body.into()),
        received: received.clone(),
    };
    let app = Router::new()
        .route("/upload", post(handle_upload))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), received)
}

fn json_body(value: Value) -> String {
    value.to_string()
}

fn sample_document() -> SelectedDocument {
    SelectedDocument::new("essay.docx", b"PK\x03\x04essay-bytes".to_vec())
}

#[test]
fn resolves_relative_path_against_base() {
    assert_eq!(
        resolve_download_url(BASE, "/files/123.docx"),
        "http://localhost:8000/files/123.docx"
    );
    assert_eq!(
        resolve_download_url("http://localhost:8000/", "/files/123.docx"),
        "http://localhost:8000/files/123.docx"
    );
    assert_eq!(
        resolve_download_url(BASE, "files/123.docx"),
        "http://localhost:8000/files/123.docx"
    );
}

#[test]
fn keeps_base_path_prefix() {
    assert_eq!(
        resolve_download_url("https://svc.example/api", "/files/9.docx"),
        "https://svc.example/api/files/9.docx"
    );
}

#[test]
fn absolute_download_links_pass_through() {
    assert_eq!(
        resolve_download_url(BASE, "https://cdn.example/out/9.docx"),
        "https://cdn.example/out/9.docx"
    );
}

#[test]
fn ok_status_yields_resolved_link() {
    let body = json_body(json!({"status": "ok", "download_url": "/files/123.docx"}));
    let outcome = interpret_response(BASE, 200, body.as_bytes()).expect("success");
    assert_eq!(outcome.download_url, format!("{BASE}/files/123.docx"));
}

#[test]
fn any_non_error_status_counts_as_success() {
    for status in ["success", "done", ""] {
        let body = json_body(json!({"status": status, "download_url": "/f.docx"}));
        assert!(
            interpret_response(BASE, 200, body.as_bytes()).is_ok(),
            "{status:?}"
        );
    }
}

#[test]
fn error_status_uses_payload_message() {
    let body = json_body(json!({"status": "error", "message": "bad file"}));
    let err = interpret_response(BASE, 200, body.as_bytes()).expect_err("failure");
    assert_eq!(err.to_string(), "bad file");
    assert_eq!(err.category(), ErrorCategory::Service);
}

#[test]
fn error_status_without_message_uses_fallback() {
    let body = json_body(json!({"status": "error"}));
    let err = interpret_response(BASE, 200, body.as_bytes()).expect_err("failure");
    assert_eq!(err.to_string(), SERVICE_FAILURE_FALLBACK);
}

#[test]
fn http_failure_is_service_error_even_with_ok_status() {
    let body = json_body(json!({"status": "ok", "message": "quota exceeded"}));
    let err = interpret_response(BASE, 429, body.as_bytes()).expect_err("failure");
    assert_eq!(
        err,
        UploadError::Service {
            http_status: Some(429),
            message: "quota exceeded".into()
        }
    );
}

#[test]
fn http_failure_with_unparseable_body_uses_fallback() {
    let err = interpret_response(BASE, 502, b"<html>Bad Gateway</html>").expect_err("failure");
    assert_eq!(err.category(), ErrorCategory::Service);
    assert_eq!(err.to_string(), SERVICE_FAILURE_FALLBACK);
}

#[test]
fn http_failure_keeps_message_when_status_field_missing() {
    let body = json_body(json!({"message": "server overloaded"}));
    let err = interpret_response(BASE, 500, body.as_bytes()).expect_err("failure");
    assert_eq!(
        err,
        UploadError::Service {
            http_status: Some(500),
            message: "server overloaded".into(),
        }
    );
}

#[test]
fn http_failure_without_message_uses_fallback() {
    let body = json_body(json!({"detail": "Not Found"}));
    let err = interpret_response(BASE, 404, body.as_bytes()).expect_err("failure");
    assert_eq!(err.to_string(), SERVICE_FAILURE_FALLBACK);
}

#[test]
fn http_success_with_unparseable_body_is_transport_error() {
    let err = interpret_response(BASE, 200, b"not json").expect_err("failure");
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(err.to_string(), CONNECTION_FAILURE_MESSAGE);
}

#[test]
fn success_without_download_url_is_service_error() {
    let body = json_body(json!({"status": "ok"}));
    let err = interpret_response(BASE, 200, body.as_bytes()).expect_err("failure");
    assert_eq!(err.to_string(), MISSING_DOWNLOAD_LINK_MESSAGE);
}

#[test]
fn endpoint_is_base_plus_upload() {
    let client = HttpTransformClient::new("http://127.0.0.1:9/");
    assert_eq!(client.base_url(), "http://127.0.0.1:9");
    assert_eq!(client.upload_endpoint(), "http://127.0.0.1:9/upload");
}

#[tokio::test]
async fn posts_single_file_part_and_resolves_link() {
    let (base_url, received) = spawn_upload_server(
        StatusCode::OK,
        json_body(json!({"status": "success", "download_url": "/files/123.docx"})),
    )
    .await;
    let client = HttpTransformClient::new(base_url.clone());

    let outcome = client.upload(&sample_document()).await.expect("upload");
    assert_eq!(outcome.download_url, format!("{base_url}/files/123.docx"));

    let requests = received.lock().await;
    assert_eq!(requests.len(), 1);
    let parts = &requests[0];
    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].name.as_deref(), Some(UPLOAD_FIELD));
    assert_eq!(parts[0].file_name.as_deref(), Some("essay.docx"));
    assert_eq!(parts[0].content_type.as_deref(), Some(DOCX_MIME_TYPE));
    assert_eq!(parts[0].bytes, b"PK\x03\x04essay-bytes");
}

#[tokio::test]
async fn surfaces_service_message_from_non_success_status() {
    let (base_url, _received) = spawn_upload_server(
        StatusCode::UNPROCESSABLE_ENTITY,
        json_body(json!({"status": "error", "message": "Document is empty"})),
    )
    .await;
    let client = HttpTransformClient::new(base_url);

    let err = client
        .upload(&sample_document())
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        UploadError::Service {
            http_status: Some(422),
            message: "Document is empty".into()
        }
    );
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = HttpTransformClient::new(format!("http://{addr}"));
    let err = client
        .upload(&sample_document())
        .await
        .expect_err("must fail");
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert_eq!(err.to_string(), CONNECTION_FAILURE_MESSAGE);
}

#[tokio::test]
async fn unknown_route_reports_fallback_message() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/other", post(|| async { Json(json!({"status": "ok"})) }));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let client = HttpTransformClient::new(format!("http://{addr}"));
    let err = client
        .upload(&sample_document())
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        UploadError::Service {
            http_status: Some(404),
            message: SERVICE_FAILURE_FALLBACK.into()
        }
    );
}
