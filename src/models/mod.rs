//! Core data models: raw judge records and chart-ready aggregates.

mod aggregates;
mod contest;
mod submission;

pub use aggregates::*;
pub use contest::*;
pub use submission::*;
