//! Router-level API tests against a mock vendor server.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vidgen_api::{create_router, AppState, ServerConfig};
use vidgen_client::{ClientConfig, VideoClient};

fn test_state(server: &MockServer) -> AppState {
    let mut client_config = ClientConfig::new("test-key");
    client_config.base_url = server.uri();
    let client = VideoClient::new(client_config).unwrap();
    AppState::new(ServerConfig::default(), client)
}

async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_forwards_query_and_returns_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "object": "list",
            "data": [{"id": "video_1", "status": "completed"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server), None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/videos?limit=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["data"][0]["id"], "video_1");
}

#[tokio::test]
async fn create_json_applies_default_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/videos"))
        .and(body_partial_json(json!({
            "model": "sora-2",
            "size": "1280x720"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_1",
            "status": "queued"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server), None);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/videos")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"prompt": "a quiet harbor"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["id"], "video_1");
}

#[tokio::test]
async fn malformed_json_is_a_400_with_error_body() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server), None);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/videos")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Malformed JSON"));
}

#[tokio::test]
async fn multipart_gif_reference_is_a_415() {
    let server = MockServer::start().await;
    let app = create_router(test_state(&server), None);

    let boundary = "XVIDGENBOUNDARY";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"prompt\"\r\n\r\n\
         a prompt\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"input_reference\"; filename=\"anim.gif\"\r\n\
         Content-Type: image/gif\r\n\r\n\
         GIF89a\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/videos")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = body_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("anim.gif"));
}

#[tokio::test]
async fn upstream_error_status_and_detail_are_mirrored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Video not found", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let app = create_router(test_state(&server), None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/videos/video_missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response.into_body()).await;
    assert_eq!(body["error"], "Video not found");
    assert_eq!(body["details"]["error"]["type"], "invalid_request_error");
}

#[tokio::test]
async fn delete_returns_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/videos/video_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
        .expect(1)
        .mount(&server)
        .await;

    let app = create_router(test_state(&server), None);
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/videos/video_1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn download_sets_content_headers_and_streams_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/video_1/content"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "video/mp4")
                .set_body_bytes(b"MP4DATA".to_vec()),
        )
        .mount(&server)
        .await;

    let app = create_router(test_state(&server), None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/videos/video_1/download")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "video/mp4"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"video-video_1.mp4\""
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.as_ref(), b"MP4DATA");
}
