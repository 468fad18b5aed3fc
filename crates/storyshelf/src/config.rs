use std::env;
use std::time::Duration;

/// Environment variable holding the REST base URL.
pub const ENV_URL: &str = "STORYSHELF_URL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "STORYSHELF_API_KEY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "STORYSHELF_TIMEOUT_SECS";

/// Default path segment between the base URL and the table name.
pub const DEFAULT_REST_PATH: &str = "rest/v1";

/// Configuration for [`RestClient`](crate::RestClient).
///
/// Values are taken as given: a missing base URL or key is not rejected here
/// and surfaces as an error from the first request instead.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the hosted data store, e.g. `https://xyz.example.co`.
    pub base_url: String,
    /// API key sent both as `apikey` and as a bearer token.
    pub api_key: String,
    /// Path between the base URL and the table.
    pub rest_path: String,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration from a base URL and an API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            rest_path: DEFAULT_REST_PATH.to_string(),
            timeout: None,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// Unset variables become empty strings.
    pub fn from_env() -> Self {
        let base_url = env::var(ENV_URL).unwrap_or_default();
        let api_key = env::var(ENV_API_KEY).unwrap_or_default();
        let mut config = Self::new(base_url, api_key);

        match env::var(ENV_TIMEOUT_SECS).map(|v| v.parse::<u64>()) {
            Ok(Ok(secs)) => config.timeout = Some(Duration::from_secs(secs)),
            Ok(Err(e)) => tracing::warn!("Invalid {ENV_TIMEOUT_SECS} value: {e}"),
            Err(_) => {}
        }

        config
    }

    /// Override the REST path segment.
    pub fn rest_path(mut self, path: impl Into<String>) -> Self {
        self.rest_path = path.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// `{base_url}/{rest_path}/{table}` with redundant slashes removed.
    pub fn table_endpoint(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.rest_path.trim_matches('/'),
            table
        )
    }
}
