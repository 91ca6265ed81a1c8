//! Axum HTTP control surface.
//!
//! This crate provides:
//! - REST endpoints over the video client (list/create/get/delete/download)
//! - JSON and multipart create bodies with an optional reference file
//! - Prometheus metrics and request logging
//! - The static browser control panel

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
