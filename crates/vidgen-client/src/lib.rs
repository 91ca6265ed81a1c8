//! HTTP client for the vendor video-generation API.
//!
//! This crate provides:
//! - Pass-through create/list/retrieve/delete/download operations
//! - Size and reference resolution on create
//! - Download payload normalization
//! - Per-operation transport options and cancellation

pub mod cancel;
pub mod client;
pub mod config;
pub mod download;
pub mod error;
pub mod types;

pub use cancel::{cancel_pair, CancelHandle, CancelSignal};
pub use client::VideoClient;
pub use config::ClientConfig;
pub use download::{DownloadPayload, VideoContent};
pub use error::{ClientError, ClientResult};
pub use types::{CreateVideoParams, ListVideosParams, ReferenceSource, RequestOptions};
