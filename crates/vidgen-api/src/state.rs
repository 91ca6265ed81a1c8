//! Application state.

use std::sync::Arc;

use vidgen_client::VideoClient;

use crate::config::ServerConfig;
use crate::error::ApiResult;

/// Shared application state: immutable configuration plus the video
/// client. Nothing here is mutated after start-up.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub client: Arc<VideoClient>,
}

impl AppState {
    /// Create new application state around an existing client.
    pub fn new(config: ServerConfig, client: VideoClient) -> Self {
        Self {
            config,
            client: Arc::new(client),
        }
    }

    /// Create state entirely from environment variables. Fails fast
    /// when the API key is missing.
    pub fn from_env() -> ApiResult<Self> {
        let config = ServerConfig::from_env();
        let client = VideoClient::from_env()?;
        Ok(Self::new(config, client))
    }
}
