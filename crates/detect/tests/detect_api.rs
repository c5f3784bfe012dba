//! HTTP-level tests for the detection sidecar.
//!
//! A stub detector stands in for the ONNX model so no model file is needed;
//! the stub returns whatever detections a test configures.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use gatehouse_detect::client::AccessLogClient;
use gatehouse_detect::config::DetectConfig;
use gatehouse_detect::detector::{Detection, DetectorError, FaceDetector, RelativeBox};
use gatehouse_detect::routes;
use gatehouse_detect::state::AppState;

const BOUNDARY: &str = "test-frame-boundary";

struct StubDetector {
    detections: Vec<Detection>,
}

impl FaceDetector for StubDetector {
    fn detect(&self, _image: &image::RgbImage) -> Result<Vec<Detection>, DetectorError> {
        Ok(self.detections.clone())
    }
}

fn detection(confidence: f32, x: f32, y: f32, width: f32, height: f32) -> Detection {
    Detection {
        confidence,
        bbox: RelativeBox {
            x,
            y,
            width,
            height,
        },
    }
}

fn test_config(backend_api_url: &str) -> DetectConfig {
    DetectConfig {
        host: "127.0.0.1".into(),
        port: 0,
        model_path: "unused".into(),
        backend_api_url: backend_api_url.into(),
        grant_threshold: 0.7,
        cors_origins: vec!["*".into()],
    }
}

/// App with a stub detector and a backend URL nothing listens on. The log
/// client is fire and forget, so an unreachable backend must never surface
/// in responses.
fn build_test_app(detections: Vec<Detection>) -> Router {
    build_test_app_with_backend(detections, "http://127.0.0.1:9")
}

fn build_test_app_with_backend(detections: Vec<Detection>, backend_api_url: &str) -> Router {
    let config = test_config(backend_api_url);
    let state = AppState::new(
        Arc::new(StubDetector { detections }),
        AccessLogClient::new(backend_api_url),
        config,
    );
    Router::new().merge(routes::routes()).with_state(state)
}

/// A 64x48 PNG generated in memory.
fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(64, 48, image::Rgb([40, 80, 120]));
    let mut cursor = std::io::Cursor::new(Vec::new());
    img.write_to(&mut cursor, image::ImageFormat::Png)
        .expect("encode test image");
    cursor.into_inner()
}

fn multipart_body(file_bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"frame.png\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

async fn post_frame(app: Router, uri: &str, file_bytes: &[u8]) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(file_bytes)))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_health_reports_service_name() {
    let app = build_test_app(vec![]);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "gatehouse-detect");
}

// ---------------------------------------------------------------------------
// Detect faces
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_detect_faces_empty_frame() {
    let app = build_test_app(vec![]);
    let response = post_frame(app, "/api/detect-faces", &png_bytes()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["detected"], false);
    assert_eq!(json["total_faces"], 0);
    assert!(json["faces"].as_array().unwrap().is_empty());
    assert_eq!(json["image_size"]["width"], 64);
    assert_eq!(json["image_size"]["height"], 48);
}

#[tokio::test]
async fn test_detect_faces_reports_pixel_boxes_within_frame() {
    let app = build_test_app(vec![
        detection(0.9, 0.25, 0.25, 0.5, 0.5),
        detection(0.6, 0.8, 0.8, 0.4, 0.4),
    ]);
    let response = post_frame(app, "/api/detect-faces", &png_bytes()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["detected"], true);
    assert_eq!(json["total_faces"], 2);

    let faces = json["faces"].as_array().unwrap();
    assert_eq!(faces[0]["face_id"], 0);
    assert_eq!(faces[1]["face_id"], 1);

    for face in faces {
        let x = face["bbox"]["x"].as_u64().unwrap();
        let y = face["bbox"]["y"].as_u64().unwrap();
        let width = face["bbox"]["width"].as_u64().unwrap();
        let height = face["bbox"]["height"].as_u64().unwrap();
        assert!(x + width <= 64, "box exceeds frame width");
        assert!(y + height <= 48, "box exceeds frame height");
    }

    // 0.25 * 64 = 16, 0.25 * 48 = 12, truncated.
    assert_eq!(faces[0]["bbox"]["x"], 16);
    assert_eq!(faces[0]["bbox"]["y"], 12);
    assert_eq!(faces[0]["bbox"]["width"], 32);
    assert_eq!(faces[0]["bbox"]["height"], 24);
}

#[tokio::test]
async fn test_detect_faces_rejects_undecodable_upload() {
    let app = build_test_app(vec![]);
    let response = post_frame(app, "/api/detect-faces", b"definitely not an image").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["detail"].as_str().unwrap().starts_with("Invalid image"));
}

#[tokio::test]
async fn test_detect_faces_rejects_missing_file() {
    let app = build_test_app(vec![]);
    let response = post_frame(app, "/api/detect-faces", b"").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Recognize
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_recognize_without_face_does_not_claim_recognition() {
    let app = build_test_app(vec![]);
    let response = post_frame(app, "/api/recognize?door_id=1", &png_bytes()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["recognized"], false);
    assert_eq!(json["message"], "No face detected");
    assert!(json.get("confidence").is_none());
    assert!(json.get("status").is_none());
}

#[tokio::test]
async fn test_recognize_above_threshold_is_granted() {
    let app = build_test_app(vec![detection(0.9, 0.1, 0.1, 0.3, 0.3)]);
    let response = post_frame(app, "/api/recognize?door_id=7", &png_bytes()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["recognized"], true);
    assert_eq!(json["status"], "granted");
    assert_eq!(json["door_id"], 7);
    assert_eq!(json["message"], "Face detected with 90.0% confidence");
}

#[tokio::test]
async fn test_recognize_at_or_below_threshold_is_low_confidence() {
    let app = build_test_app(vec![detection(0.65, 0.1, 0.1, 0.3, 0.3)]);
    let response = post_frame(app, "/api/recognize?door_id=7", &png_bytes()).await;

    let json = body_json(response).await;
    assert_eq!(json["recognized"], true);
    assert_eq!(json["status"], "low_confidence");
}

#[tokio::test]
async fn test_recognize_picks_highest_confidence_face() {
    let app = build_test_app(vec![
        detection(0.55, 0.0, 0.0, 0.2, 0.2),
        detection(0.92, 0.4, 0.4, 0.3, 0.3),
        detection(0.71, 0.7, 0.7, 0.2, 0.2),
    ]);
    let response = post_frame(app, "/api/recognize?door_id=3", &png_bytes()).await;

    let json = body_json(response).await;
    let confidence = json["confidence"].as_f64().unwrap();
    assert!((confidence - 0.92).abs() < 1e-6);
    assert_eq!(json["status"], "granted");
}

#[tokio::test]
async fn test_recognize_requires_door_id() {
    let app = build_test_app(vec![detection(0.9, 0.1, 0.1, 0.3, 0.3)]);
    let response = post_frame(app, "/api/recognize", &png_bytes()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recognize_succeeds_when_backend_unreachable() {
    // Backend URL points at a closed port; the response must not care.
    let app = build_test_app_with_backend(
        vec![detection(0.8, 0.1, 0.1, 0.3, 0.3)],
        "http://127.0.0.1:9",
    );
    let response = post_frame(app, "/api/recognize?door_id=1", &png_bytes()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "granted");
}

#[tokio::test]
async fn test_recognize_posts_access_log_to_backend() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let received = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            buffer.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buffer);
            if n == 0 || text.contains("notes") {
                break;
            }
        }
        socket
            .write_all(b"HTTP/1.1 201 Created\r\ncontent-length: 0\r\n\r\n")
            .await
            .unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    });

    let app = build_test_app_with_backend(
        vec![detection(0.84, 0.1, 0.1, 0.3, 0.3)],
        &format!("http://{addr}"),
    );
    let response = post_frame(app, "/api/recognize?door_id=12", &png_bytes()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let request_text = tokio::time::timeout(std::time::Duration::from_secs(5), received)
        .await
        .expect("backend never received the access log")
        .unwrap();

    assert!(request_text.starts_with("POST /api/access-logs"));
    assert!(request_text.contains("\"door_id\":12"));
    assert!(request_text.contains("\"status\":\"granted\""));
    assert!(request_text.contains("Face detected with 84.0% confidence"));
    assert!(request_text.contains("\"user_id\":null"));
}
