//! Video API client configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ClientError, ClientResult};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "sora-2";

/// Configuration for the video API client.
///
/// Constructed explicitly and passed into [`crate::VideoClient::new`];
/// there is no ambient global state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key, sent as a bearer token
    pub api_key: String,
    /// Base URL of the video API
    pub base_url: String,
    /// Optional beta-feature header value
    pub beta_header: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Model used when a request names none
    pub default_model: String,
    /// Size used when a request names none
    pub default_size: Option<String>,
    /// Reference file attached when a create names none
    pub default_reference: Option<PathBuf>,
    /// Directory downloads are written to
    pub download_dir: PathBuf,
}

impl ClientConfig {
    /// Create a config with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            beta_header: None,
            timeout: Duration::from_secs(120),
            default_model: DEFAULT_MODEL.to_string(),
            default_size: None,
            default_reference: None,
            download_dir: PathBuf::from("."),
        }
    }

    /// Create config from environment variables.
    ///
    /// Fails fast when `OPENAI_API_KEY` is absent or blank.
    pub fn from_env() -> ClientResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ClientError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base_url;
        }
        config.beta_header = std::env::var("OPENAI_BETA").ok().filter(|v| !v.is_empty());
        if let Some(secs) = std::env::var("VIDEO_API_TIMEOUT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }
        if let Ok(model) = std::env::var("VIDEO_DEFAULT_MODEL") {
            config.default_model = model;
        }
        config.default_size = std::env::var("VIDEO_DEFAULT_SIZE").ok().filter(|v| !v.is_empty());
        config.default_reference = std::env::var("VIDEO_DEFAULT_REFERENCE")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        if let Ok(dir) = std::env::var("VIDEO_DOWNLOAD_DIR") {
            config.download_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fills_defaults() {
        let config = ClientConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.default_model, "sora-2");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.beta_header.is_none());
        assert!(config.default_reference.is_none());
    }
}
