//! Contest participation records from the judge's rating endpoint.

use serde::{Deserialize, Serialize};

/// One rated contest appearance, as returned by `user.rating`.
///
/// Every field is optional at the wire level: the judge schema promises all
/// four, but the transform layer owns the required-field check so a broken
/// payload surfaces as a typed validation failure rather than a parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestParticipation {
    /// Display name of the contest
    pub contest_name: Option<String>,

    /// Final rank of the user in the standings
    pub rank: Option<i64>,

    /// Rating before the contest
    pub old_rating: Option<i64>,

    /// Rating after the contest
    pub new_rating: Option<i64>,
}

impl ContestParticipation {
    /// Create a fully-populated record.
    pub fn new(contest_name: impl Into<String>, rank: i64, old_rating: i64, new_rating: i64) -> Self {
        Self {
            contest_name: Some(contest_name.into()),
            rank: Some(rank),
            old_rating: Some(old_rating),
            new_rating: Some(new_rating),
        }
    }
}
