//! Aggregation pipelines over already-fetched judge records.
//!
//! Two independent pure pipelines share this module:
//! - **rating_history**: per-contest display labels annotated with the
//!   signed rating delta, plus the parallel post-contest rating series.
//! - **submission_stats**: solved-problem histogram, tag-frequency ranking
//!   with legend, and the unsolved-problem locator.
//!
//! Both are synchronous functions of their input with no shared state; they
//! either return a complete aggregate or fail atomically with a
//! [`TransformError`]. A partial histogram or ranking would be rendered by
//! consumers as if it were complete, so no best-effort output exists here.

mod rating_history;
mod submission_stats;

pub use rating_history::transform_rating_history;
pub use submission_stats::aggregate_submissions;

use thiserror::Error;

/// Validation failure for a malformed input record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("{record} record {position}: missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
        position: usize,
    },
}

impl TransformError {
    pub(crate) fn missing(record: &'static str, field: &'static str, position: usize) -> Self {
        TransformError::MissingField {
            record,
            field,
            position,
        }
    }
}
