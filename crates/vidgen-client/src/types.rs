//! Request parameter types.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cancel::CancelSignal;

/// Source of an input reference for create.
#[derive(Debug, Clone)]
pub enum ReferenceSource {
    /// Read from the filesystem
    Path(PathBuf),
    /// Raw bytes supplied directly
    Bytes {
        data: Vec<u8>,
        filename: String,
        mime_type: Option<String>,
    },
}

/// Parameters for creating a video generation job.
#[derive(Debug, Clone, Default)]
pub struct CreateVideoParams {
    pub prompt: String,
    pub model: Option<String>,
    pub size: Option<String>,
    pub seconds: Option<String>,
    pub reference: Option<ReferenceSource>,
    /// Extra fields merged verbatim into the request body; resolved
    /// fields (model, size) win on conflict.
    pub extra: Map<String, Value>,
}

impl CreateVideoParams {
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }
}

/// Query parameters for listing video jobs, forwarded as-is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListVideosParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

/// Per-operation transport controls, passed through uninterpreted.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers merged into the request
    pub headers: HeaderMap,
    /// Overrides the client-wide timeout for this call
    pub timeout: Option<Duration>,
    /// Cancels the call when signalled
    pub cancel: Option<CancelSignal>,
}
