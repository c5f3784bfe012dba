//! Access-decision domain logic shared by the CRUD service and the
//! detection sidecar.
//!
//! The sidecar never identifies a person; a "decision" here is purely a
//! confidence classification of a detected face against the grant
//! threshold.

use serde::{Deserialize, Serialize};

/// Minimum detector confidence for a region to count as a face at all.
///
/// Matches the short-range detection model's recommended operating point.
pub const MIN_DETECTION_CONFIDENCE: f32 = 0.5;

/// Default grant threshold: detections above this confidence produce a
/// `granted` access log, at or below it `low_confidence`.
///
/// Overridable via `GRANT_THRESHOLD` on the sidecar.
pub const DEFAULT_GRANT_THRESHOLD: f32 = 0.7;

/// Default status string for access logs created without an explicit one.
pub const LOG_STATUS_SUCCESS: &str = "success";

/// Access-log status written when a detection clears the grant threshold.
pub const LOG_STATUS_GRANTED: &str = "granted";

/// Access-log status written when a face was found below the grant threshold.
pub const LOG_STATUS_LOW_CONFIDENCE: &str = "low_confidence";

/// Lifecycle state for users and doors.
///
/// Stored as the Postgres enum type `lifecycle_status`. A tagged state
/// rather than a boolean so future states (e.g. suspended) are a variant,
/// not a schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lifecycle_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    Active,
    Inactive,
}

impl LifecycleStatus {
    pub fn is_active(self) -> bool {
        matches!(self, LifecycleStatus::Active)
    }
}

impl Default for LifecycleStatus {
    fn default() -> Self {
        LifecycleStatus::Active
    }
}

/// Outcome of classifying a detection confidence against the grant threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    LowConfidence,
}

impl AccessDecision {
    /// Classify a detection confidence. Strictly greater than the threshold
    /// grants; equal or below is low confidence.
    pub fn classify(confidence: f32, grant_threshold: f32) -> Self {
        if confidence > grant_threshold {
            AccessDecision::Granted
        } else {
            AccessDecision::LowConfidence
        }
    }

    /// The status string written to the access log for this decision.
    pub fn log_status(self) -> &'static str {
        match self {
            AccessDecision::Granted => LOG_STATUS_GRANTED,
            AccessDecision::LowConfidence => LOG_STATUS_LOW_CONFIDENCE,
        }
    }
}

/// Human-readable note attached to sidecar-created access logs.
pub fn detection_note(confidence: f32) -> String {
    format!("Face detected with {:.1}% confidence", confidence * 100.0)
}
