//! Download payload normalization.
//!
//! The vendor API has returned downloaded content in several shapes
//! over time: a raw body, a base64 string, or a `{"data": ...}` wrapper
//! around one. [`DownloadPayload`] is the closed set of those shapes and
//! [`VideoContent`] normalizes each variant explicitly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use bytes::Bytes;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// The shapes a download response can arrive in.
pub enum DownloadPayload {
    /// Entire payload already in memory
    Buffer(Bytes),
    /// Base64-encoded payload
    Base64(String),
    /// Streaming payload drained by the caller
    Stream(BoxStream<'static, Result<Bytes, reqwest::Error>>),
}

impl std::fmt::Debug for DownloadPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadPayload::Buffer(bytes) => f.debug_tuple("Buffer").field(&bytes.len()).finish(),
            DownloadPayload::Base64(s) => f.debug_tuple("Base64").field(&s.len()).finish(),
            DownloadPayload::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

/// Downloaded video content plus its transport metadata.
#[derive(Debug)]
pub struct VideoContent {
    pub content_type: String,
    /// Suggested filename for saving the payload
    pub filename: String,
    payload: DownloadPayload,
}

impl VideoContent {
    pub(crate) fn new(content_type: String, filename: String, payload: DownloadPayload) -> Self {
        Self {
            content_type,
            filename,
            payload,
        }
    }

    /// Collects the payload into a single buffer.
    pub async fn into_bytes(self) -> ClientResult<Bytes> {
        match self.payload {
            DownloadPayload::Buffer(bytes) => {
                if bytes.is_empty() {
                    Err(ClientError::EmptyResponse)
                } else {
                    Ok(bytes)
                }
            }
            DownloadPayload::Base64(encoded) => decode_base64(&encoded),
            DownloadPayload::Stream(mut stream) => {
                let mut buf = Vec::new();
                while let Some(chunk) = stream.next().await {
                    buf.extend_from_slice(&chunk?);
                }
                if buf.is_empty() {
                    Err(ClientError::EmptyResponse)
                } else {
                    Ok(buf.into())
                }
            }
        }
    }

    /// Returns the payload as a byte stream. Buffered variants become a
    /// one-chunk stream; the streaming variant is passed through.
    pub fn into_stream(self) -> ClientResult<BoxStream<'static, ClientResult<Bytes>>> {
        match self.payload {
            DownloadPayload::Buffer(bytes) => {
                if bytes.is_empty() {
                    return Err(ClientError::EmptyResponse);
                }
                Ok(stream::once(async move { Ok(bytes) }).boxed())
            }
            DownloadPayload::Base64(encoded) => {
                let bytes = decode_base64(&encoded)?;
                Ok(stream::once(async move { Ok(bytes) }).boxed())
            }
            DownloadPayload::Stream(inner) => {
                Ok(inner.map(|chunk| chunk.map_err(ClientError::Network)).boxed())
            }
        }
    }
}

fn decode_base64(encoded: &str) -> ClientResult<Bytes> {
    let decoded = BASE64
        .decode(encoded.trim())
        .map_err(|e| ClientError::UnsupportedResponse(format!("invalid base64 payload: {e}")))?;
    if decoded.is_empty() {
        Err(ClientError::EmptyResponse)
    } else {
        Ok(decoded.into())
    }
}

/// Classifies a JSON download body into a payload variant.
pub(crate) fn classify_json_payload(value: Value) -> ClientResult<DownloadPayload> {
    match value {
        Value::String(s) => {
            if s.trim().is_empty() {
                Err(ClientError::EmptyResponse)
            } else {
                Ok(DownloadPayload::Base64(s))
            }
        }
        Value::Object(map) => {
            if map.is_empty() {
                return Err(ClientError::EmptyResponse);
            }
            match map.get("data") {
                Some(Value::String(s)) if !s.trim().is_empty() => {
                    Ok(DownloadPayload::Base64(s.clone()))
                }
                Some(Value::String(_)) | Some(Value::Null) => Err(ClientError::EmptyResponse),
                _ => Err(ClientError::UnsupportedResponse(format!(
                    "JSON object with keys [{}]",
                    map.keys().cloned().collect::<Vec<_>>().join(", ")
                ))),
            }
        }
        Value::Null => Err(ClientError::EmptyResponse),
        other => Err(ClientError::UnsupportedResponse(format!(
            "JSON {} body",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Suggested filename for a downloaded payload.
pub(crate) fn filename_for(id: &str, content_type: &str) -> String {
    let ext = match content_type.split(';').next().unwrap_or_default().trim() {
        "video/mp4" | "" => "mp4",
        "video/webm" => "webm",
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        _ => "mp4",
    };
    format!("video-{id}.{ext}")
}
