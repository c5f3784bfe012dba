//! Best-effort access-log delivery to the CRUD service.

use serde::Serialize;
use std::time::Duration;

const LOG_POST_TIMEOUT: Duration = Duration::from_secs(5);

/// Payload for `POST /api/access-logs` on the CRUD service.
#[derive(Debug, Serialize)]
pub struct AccessLogEntry {
    pub user_id: Option<i64>,
    pub door_id: i64,
    pub confidence_score: f64,
    pub status: String,
    pub notes: String,
}

/// Fire-and-forget client for the CRUD service's access-log endpoint.
///
/// Delivery is best effort: failures are logged and swallowed so a dead or
/// slow backend never affects the recognition response. No retries.
#[derive(Debug, Clone)]
pub struct AccessLogClient {
    client: reqwest::Client,
    base_url: String,
}

impl AccessLogClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(LOG_POST_TIMEOUT)
            .build()
            .expect("Failed to build access-log HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Post a log entry in a background task and return immediately.
    pub fn submit(&self, entry: AccessLogEntry) {
        let client = self.client.clone();
        let url = format!("{}/api/access-logs", self.base_url);

        tokio::spawn(async move {
            match client.post(&url).json(&entry).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!(door_id = entry.door_id, status = %entry.status, "access log recorded");
                }
                Ok(response) => {
                    tracing::warn!(
                        door_id = entry.door_id,
                        http_status = %response.status(),
                        "access log rejected by backend"
                    );
                }
                Err(e) => {
                    tracing::warn!(door_id = entry.door_id, error = %e, "access log delivery failed");
                }
            }
        });
    }
}
