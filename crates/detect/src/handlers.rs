use crate::detector::PixelBox;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use axum::extract::{Multipart, Query, State};
use axum::Json;
use gatehouse_core::access::{detection_note, AccessDecision};
use gatehouse_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct FacePayload {
    pub face_id: usize,
    pub confidence: f32,
    pub bbox: PixelBox,
}

#[derive(Debug, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct DetectFacesResponse {
    pub success: bool,
    pub detected: bool,
    pub faces: Vec<FacePayload>,
    pub total_faces: usize,
    pub image_size: ImageSize,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct RecognizeParams {
    pub door_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub success: bool,
    pub recognized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub door_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub message: String,
    pub timestamp: String,
}

/// Pull the first non-empty file field out of a multipart upload.
async fn read_upload(multipart: &mut Multipart) -> AppResult<axum::body::Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if !data.is_empty() {
            return Ok(data);
        }
    }
    Err(AppError::BadRequest(
        "No image file in multipart upload".into(),
    ))
}

/// Decode the upload and run the detector on a blocking thread.
async fn detect_in_upload(
    state: &AppState,
    multipart: &mut Multipart,
) -> AppResult<(Vec<crate::detector::Detection>, u32, u32)> {
    let bytes = read_upload(multipart).await?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| AppError::InvalidImage(e.to_string()))?
        .to_rgb8();
    let (width, height) = image.dimensions();

    let detector = state.detector.clone();
    let detections = tokio::task::spawn_blocking(move || detector.detect(&image))
        .await
        .map_err(|e| AppError::Internal(format!("detection task: {e}")))??;

    Ok((detections, width, height))
}

/// POST /api/detect-faces
///
/// Stateless detection: reports every face above the confidence floor with
/// pixel bounding boxes. Never touches the CRUD service.
pub async fn detect_faces(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DetectFacesResponse>> {
    let (detections, width, height) = detect_in_upload(&state, &mut multipart).await?;

    let faces: Vec<FacePayload> = detections
        .iter()
        .enumerate()
        .map(|(index, detection)| FacePayload {
            // Zero-based detection index, in detector output order.
            face_id: index,
            confidence: detection.confidence,
            bbox: detection.bbox.to_pixels(width, height),
        })
        .collect();

    tracing::debug!(total_faces = faces.len(), width, height, "detection pass complete");

    Ok(Json(DetectFacesResponse {
        success: true,
        detected: !faces.is_empty(),
        total_faces: faces.len(),
        faces,
        image_size: ImageSize { width, height },
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/recognize?door_id=N
///
/// Picks the highest-confidence detection, classifies it against the grant
/// threshold and fires a best-effort access log at the CRUD service. The
/// response never depends on whether that log lands.
pub async fn recognize(
    State(state): State<AppState>,
    Query(params): Query<RecognizeParams>,
    mut multipart: Multipart,
) -> AppResult<Json<RecognizeResponse>> {
    let (detections, _, _) = detect_in_upload(&state, &mut multipart).await?;

    let Some(best) = detections
        .iter()
        .copied()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    else {
        return Ok(Json(RecognizeResponse {
            success: true,
            recognized: false,
            confidence: None,
            door_id: None,
            status: None,
            message: "No face detected".into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }));
    };

    let decision = AccessDecision::classify(best.confidence, state.config.grant_threshold);
    let note = detection_note(best.confidence);

    state.log_client.submit(crate::client::AccessLogEntry {
        user_id: None,
        door_id: params.door_id,
        confidence_score: best.confidence as f64,
        status: decision.log_status().to_string(),
        notes: note.clone(),
    });

    Ok(Json(RecognizeResponse {
        success: true,
        recognized: true,
        confidence: Some(best.confidence),
        door_id: Some(params.door_id),
        status: Some(decision.log_status()),
        message: note,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "gatehouse-detect",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
