use serde::{Deserialize, Serialize};

/// `modules.api_ingress` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiIngressConfig {
    pub bind_addr: String,
    /// Serve `/openapi.json`.
    pub enable_docs: bool,
    pub cors_enabled: bool,
    /// Per-request handler timeout.
    pub timeout_sec: u64,
    pub body_limit_bytes: usize,
}

impl Default for ApiIngressConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_string(),
            enable_docs: true,
            cors_enabled: false,
            timeout_sec: 30,
            body_limit_bytes: 16 * 1024 * 1024,
        }
    }
}
