use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration for the search pipeline.
///
/// Endpoints and credentials for both upstream services are resolved at
/// startup; a blank index endpoint or key is a configuration error, never a
/// silent empty result set.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub index_url: String,
    pub index_api_key: String,
    pub index_name: String,
    pub catalog_url: String,
    pub catalog_publishable_key: Option<String>,
    pub request_timeout_secs: u64,
    pub hydration_max_concurrency: usize,
    pub log_level: String,
}

impl AppConfig {
    /// Request timeout shared by both HTTP clients.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("index_url", &self.index_url)
            .field("index_api_key", &"[redacted]")
            .field("index_name", &self.index_name)
            .field("catalog_url", &self.catalog_url)
            .field(
                "catalog_publishable_key",
                &self.catalog_publishable_key.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field(
                "hydration_max_concurrency",
                &self.hydration_max_concurrency,
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}
