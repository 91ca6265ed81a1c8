//! Vendor video API resource types.
//!
//! Kept deliberately tolerant: unknown statuses map to
//! [`VideoStatus::Unknown`] and optional fields default to `None`, so a
//! vendor-side schema addition never breaks deserialization.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a video generation job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Queued => "queued",
            VideoStatus::InProgress => "in_progress",
            VideoStatus::Completed => "completed",
            VideoStatus::Failed => "failed",
            VideoStatus::Unknown => "unknown",
        }
    }

    /// Whether the job has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured failure reported inside a video resource.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A video generation job resource.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Video {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    pub status: VideoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VideoError>,
}

/// Paginated collection of video resources.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VideoList {
    pub data: Vec<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trip() {
        let json = serde_json::to_string(&VideoStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        assert_eq!(serde_json::from_str::<VideoStatus>(&json).unwrap(), VideoStatus::InProgress);
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let status: VideoStatus = serde_json::from_str("\"archiving\"").unwrap();
        assert_eq!(status, VideoStatus::Unknown);
        assert!(!status.is_terminal());
    }

    #[test]
    fn video_deserializes_with_minimal_fields() {
        let video: Video =
            serde_json::from_str(r#"{"id":"video_123","status":"queued"}"#).unwrap();
        assert_eq!(video.id, "video_123");
        assert_eq!(video.status, VideoStatus::Queued);
        assert!(video.size.is_none());
    }

    #[test]
    fn video_serialization_skips_absent_fields() {
        let video: Video =
            serde_json::from_str(r#"{"id":"video_123","status":"completed"}"#).unwrap();
        let json = serde_json::to_string(&video).unwrap();
        assert!(!json.contains("progress"));
        assert!(!json.contains("error"));
    }
}
