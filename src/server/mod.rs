//! HTTP server mode.
//!
//! This module provides:
//! - Configuration types (`config`)
//! - The axum router and handlers (`routes`)
//!
//! The server is a thin inbound wrapper: multipart parsing and status
//! mapping only. All estimation logic lives in the pipeline.

pub mod config;
pub mod routes;

pub use routes::router;
