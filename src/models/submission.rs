//! Submission records from the judge's status endpoint.

use serde::{Deserialize, Serialize};

/// Verdict string the judge uses for an accepted submission.
pub const VERDICT_OK: &str = "OK";

/// A problem as embedded in a submission record.
///
/// `rating` is genuinely optional: unrated problems carry no difficulty
/// signal and are excluded from the rating histogram and the unsolved
/// locator. `contest_id` and `index` are required by the schema; their
/// absence is a validation failure detected by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Contest the problem belongs to
    pub contest_id: Option<i64>,

    /// Position within the contest ("A", "B1", ...)
    pub index: Option<String>,

    /// Difficulty rating, absent for unrated problems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<i64>,

    /// Topical labels ("dp", "graphs", ...)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry of the submission log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Judge's evaluation outcome; empty while testing is in progress
    #[serde(default)]
    pub verdict: String,

    /// The submitted problem
    pub problem: Option<Problem>,
}

impl Submission {
    /// Whether this submission was accepted.
    pub fn is_solved(&self) -> bool {
        self.verdict == VERDICT_OK
    }
}

/// Identity of a problem within the judge's catalog.
///
/// Two submissions referencing the same `(contest_id, index)` pair denote
/// the same problem regardless of verdict or tag duplication. Both
/// aggregation pipelines share this key convention; its display form
/// (`"{contest_id}-{index}"`) is what consumers use to build problem links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemKey {
    pub contest_id: i64,
    pub index: String,
}

impl ProblemKey {
    pub fn new(contest_id: i64, index: impl Into<String>) -> Self {
        Self {
            contest_id,
            index: index.into(),
        }
    }
}

impl std::fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.contest_id, self.index)
    }
}
