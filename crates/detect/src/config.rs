use gatehouse_core::access::DEFAULT_GRANT_THRESHOLD;

/// Sidecar configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8001`).
    pub port: u16,
    /// Path to the UltraFace ONNX model file.
    pub model_path: String,
    /// Base URL of the CRUD service for access-log creation.
    pub backend_api_url: String,
    /// Confidence above which a detection logs as `granted`.
    pub grant_threshold: f32,
    /// Allowed CORS origins; `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl DetectConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                          |
    /// |-------------------|----------------------------------|
    /// | `HOST`            | `0.0.0.0`                        |
    /// | `PORT`            | `8001`                           |
    /// | `MODEL_PATH`      | `models/version-RFB-320.onnx`    |
    /// | `BACKEND_API_URL` | `http://localhost:8000`          |
    /// | `GRANT_THRESHOLD` | `0.7`                            |
    /// | `CORS_ORIGINS`    | `*`                              |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let model_path = std::env::var("MODEL_PATH")
            .unwrap_or_else(|_| "models/version-RFB-320.onnx".into());

        let backend_api_url = std::env::var("BACKEND_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".into());

        let grant_threshold: f32 = std::env::var("GRANT_THRESHOLD")
            .unwrap_or_else(|_| DEFAULT_GRANT_THRESHOLD.to_string())
            .parse()
            .expect("GRANT_THRESHOLD must be a float in [0, 1]");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port,
            model_path,
            backend_api_url,
            grant_threshold,
            cors_origins,
        }
    }
}
