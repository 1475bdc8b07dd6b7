//! # cf-insight
//!
//! Codeforces profile analytics backend serving chart-ready aggregates.
//!
//! ## Architecture
//!
//! - **models**: raw judge records and the aggregate output structures
//! - **transform**: the pure aggregation pipelines (rating history,
//!   submission statistics)
//! - **fetch**: judge API client and response-envelope handling
//! - **api**: REST API endpoints
//! - **config**: configuration loading and validation

pub mod api;
pub mod config;
pub mod fetch;
pub mod models;
pub mod transform;

pub use models::*;
