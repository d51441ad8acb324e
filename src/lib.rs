//! Word Reader - sequential word-fetch latency demo
//!
//! Fetches words one at a time from a remote API, assembles them into a
//! transcript of paragraphs, and reports round-trip latency analytics.

/// Word API client and trait seam
pub mod api;
/// Configuration management
pub mod config;
/// Sequential fetch pipeline and run state
pub mod pipeline;
/// Progressive terminal rendering
pub mod render;
/// Telemetry and logging setup
pub mod telemetry;
/// Transcript data model and analytics
pub mod transcript;
