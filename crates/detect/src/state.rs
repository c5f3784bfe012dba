use crate::client::AccessLogClient;
use crate::config::DetectConfig;
use crate::detector::FaceDetector;
use std::sync::Arc;

/// Shared state handed to every sidecar handler.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn FaceDetector>,
    pub log_client: Arc<AccessLogClient>,
    pub config: Arc<DetectConfig>,
}

impl AppState {
    pub fn new(
        detector: Arc<dyn FaceDetector>,
        log_client: AccessLogClient,
        config: DetectConfig,
    ) -> Self {
        Self {
            detector,
            log_client: Arc::new(log_client),
            config: Arc::new(config),
        }
    }
}
