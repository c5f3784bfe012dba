//! UltraFace detector via ONNX Runtime.
//!
//! Runs the version-RFB-320 UltraFace model, which emits per-anchor class
//! scores and boxes in coordinates relative to the input frame, and reduces
//! them with confidence filtering and NMS.

use gatehouse_core::access::MIN_DETECTION_CONFIDENCE;
use ndarray::Array4;
use ort::session::Session;
use ort::value::TensorRef;
use serde::Serialize;
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

// --- Named constants (no magic numbers) ---
const ULTRAFACE_INPUT_WIDTH: usize = 320;
const ULTRAFACE_INPUT_HEIGHT: usize = 240;
const ULTRAFACE_MEAN: f32 = 127.0;
const ULTRAFACE_STD: f32 = 128.0;
const ULTRAFACE_NMS_THRESHOLD: f32 = 0.5;
/// Per-anchor score layout: [background, face].
const ULTRAFACE_CLASSES: usize = 2;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("model file not found: {0} — download version-RFB-320.onnx and place in models/")]
    ModelNotFound(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("ort: {0}")]
    Ort(#[from] ort::Error),
}

/// A face bounding box in coordinates relative to the frame, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A face bounding box in whole pixels of the original image.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RelativeBox {
    /// Scale to pixel coordinates of an `image_width` x `image_height` frame.
    ///
    /// Coordinates are truncated to whole pixels and the box is clipped so it
    /// never extends past the frame.
    pub fn to_pixels(&self, image_width: u32, image_height: u32) -> PixelBox {
        let x = (self.x * image_width as f32) as u32;
        let y = (self.y * image_height as f32) as u32;
        let width = ((self.width * image_width as f32) as u32).min(image_width - x);
        let height = ((self.height * image_height as f32) as u32).min(image_height - y);
        PixelBox {
            x,
            y,
            width,
            height,
        }
    }
}

/// A single detected face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub confidence: f32,
    pub bbox: RelativeBox,
}

/// Face detection over an RGB frame.
///
/// Implementations must be safe to share across request handlers; inference
/// itself may block and should run on a blocking thread.
pub trait FaceDetector: Send + Sync {
    /// Detect faces, returning detections sorted by confidence descending.
    fn detect(&self, image: &image::RgbImage) -> Result<Vec<Detection>, DetectorError>;
}

/// UltraFace (version-RFB-320) detector.
pub struct UltraFaceDetector {
    session: Mutex<Session>,
}

impl UltraFaceDetector {
    /// Load the UltraFace ONNX model from the given path.
    pub fn load(model_path: &str) -> Result<Self, DetectorError> {
        if !Path::new(model_path).exists() {
            return Err(DetectorError::ModelNotFound(model_path.to_string()));
        }

        let session = Session::builder()?
            .with_intra_threads(2)
            .map_err(|e| ort::Error::new_with_code(e.code(), e.message()))?
            .commit_from_file(model_path)?;

        tracing::info!(
            path = model_path,
            inputs = ?session.inputs().iter().map(|i| (i.name(), i.dtype())).collect::<Vec<_>>(),
            outputs = ?session.outputs().iter().map(|o| o.name().to_string()).collect::<Vec<_>>(),
            "loaded UltraFace model"
        );

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn preprocess(image: &image::RgbImage) -> Array4<f32> {
        let resized = image::imageops::resize(
            image,
            ULTRAFACE_INPUT_WIDTH as u32,
            ULTRAFACE_INPUT_HEIGHT as u32,
            image::imageops::FilterType::Triangle,
        );

        let mut tensor =
            Array4::<f32>::zeros((1, 3, ULTRAFACE_INPUT_HEIGHT, ULTRAFACE_INPUT_WIDTH));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for channel in 0..3 {
                tensor[[0, channel, y as usize, x as usize]] =
                    (pixel[channel] as f32 - ULTRAFACE_MEAN) / ULTRAFACE_STD;
            }
        }
        tensor
    }
}

impl FaceDetector for UltraFaceDetector {
    fn detect(&self, image: &image::RgbImage) -> Result<Vec<Detection>, DetectorError> {
        let input = Self::preprocess(image);

        let mut session = self
            .session
            .lock()
            .map_err(|e| DetectorError::InferenceFailed(format!("session lock: {e}")))?;

        let outputs = session.run(ort::inputs![TensorRef::from_array_view(input.view())?])?;

        // UltraFace exports two tensors: scores [1, N, 2], boxes [1, N, 4].
        let (_, scores) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectorError::InferenceFailed(format!("scores: {e}")))?;
        let (_, boxes) = outputs[1]
            .try_extract_tensor::<f32>()
            .map_err(|e| DetectorError::InferenceFailed(format!("boxes: {e}")))?;

        let candidates = decode_outputs(scores, boxes, MIN_DETECTION_CONFIDENCE);
        Ok(nms(candidates, ULTRAFACE_NMS_THRESHOLD))
    }
}

/// Decode raw score/box tensors into confidence-filtered detections.
///
/// Boxes arrive as [x1, y1, x2, y2] relative to the frame; values are clamped
/// to [0, 1] and degenerate boxes are dropped.
fn decode_outputs(scores: &[f32], boxes: &[f32], threshold: f32) -> Vec<Detection> {
    let num_anchors = (scores.len() / ULTRAFACE_CLASSES).min(boxes.len() / 4);
    let mut detections = Vec::new();

    for idx in 0..num_anchors {
        let confidence = scores[idx * ULTRAFACE_CLASSES + 1];
        if confidence < threshold {
            continue;
        }

        let box_off = idx * 4;
        let x1 = boxes[box_off].clamp(0.0, 1.0);
        let y1 = boxes[box_off + 1].clamp(0.0, 1.0);
        let x2 = boxes[box_off + 2].clamp(0.0, 1.0);
        let y2 = boxes[box_off + 3].clamp(0.0, 1.0);
        if x2 <= x1 || y2 <= y1 {
            continue;
        }

        detections.push(Detection {
            confidence,
            bbox: RelativeBox {
                x: x1,
                y: y1,
                width: x2 - x1,
                height: y2 - y1,
            },
        });
    }

    detections
}

/// Greedy non-maximum suppression, keeping highest-confidence boxes first.
fn nms(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    detections.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let mut kept: Vec<Detection> = Vec::new();
    'candidates: for detection in detections {
        for existing in &kept {
            if iou(&detection.bbox, &existing.bbox) > iou_threshold {
                continue 'candidates;
            }
        }
        kept.push(detection);
    }
    kept
}

fn iou(a: &RelativeBox, b: &RelativeBox) -> f32 {
    let inter_x1 = a.x.max(b.x);
    let inter_y1 = a.y.max(b.y);
    let inter_x2 = (a.x + a.width).min(b.x + b.width);
    let inter_y2 = (a.y + a.height).min(b.y + b.height);

    let inter_w = (inter_x2 - inter_x1).max(0.0);
    let inter_h = (inter_y2 - inter_y1).max(0.0);
    let intersection = inter_w * inter_h;

    let union = a.width * a.height + b.width * b.height - intersection;
    if union <= 0.0 {
        return 0.0;
    }
    intersection / union
}
