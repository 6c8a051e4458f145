mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{read_json, spawn_app};

const BOUNDARY: &str = "coursehub-test-boundary";

fn multipart_request(file_name: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"document\"; \
             filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("Failed to build request")
}

#[tokio::test]
async fn pdf_upload_is_stored_under_a_fresh_name() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(multipart_request("resume.pdf", b"%PDF-1.4 test"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = read_json(response).await;
    assert_eq!(body["success"], json!(true));
    let public_path = body["file"].as_str().expect("Expected file path");
    assert!(public_path.starts_with("/uploads/"));
    assert!(public_path.ends_with(".pdf"));

    let stored: Vec<_> = std::fs::read_dir(test.upload_dir.path())
        .expect("Failed to read upload dir")
        .collect();
    assert_eq!(stored.len(), 1);
    let stored_path = stored[0].as_ref().unwrap().path();
    assert_eq!(
        std::fs::read(&stored_path).expect("Failed to read stored file"),
        b"%PDF-1.4 test"
    );
}

#[tokio::test]
async fn uploaded_file_is_served_statically() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(multipart_request("notes.doc", b"doc contents"))
        .await
        .unwrap();
    let body = read_json(response).await;
    let public_path = body["file"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("GET")
        .uri(&public_path)
        .body(Body::empty())
        .unwrap();
    let response = test.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let served = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&served[..], b"doc contents");
}

#[tokio::test]
async fn disallowed_extension_is_rejected() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(multipart_request("malware.exe", b"MZ"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = read_json(response).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        std::fs::read_dir(test.upload_dir.path()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn extension_check_is_case_insensitive() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(multipart_request("Syllabus.DOCX", b"PK"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let test = spawn_app().await;

    let oversized = vec![b'a'; 10 * 1024 * 1024 + 1];
    let response = test
        .app
        .clone()
        .oneshot(multipart_request("big.pdf", &oversized))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        std::fs::read_dir(test.upload_dir.path()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn request_without_a_file_is_rejected() {
    let test = spawn_app().await;

    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\njust text\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = test.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
