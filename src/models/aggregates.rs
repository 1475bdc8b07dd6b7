//! Chart-ready aggregate structures produced by the transform layer.
//!
//! Every aggregate is built fresh per invocation and immutable once handed
//! to the rendering consumer. Ordered mappings are represented as parallel
//! vectors so that first-seen insertion order survives serialization.

use serde::{Deserialize, Serialize};

use super::ProblemKey;

/// Per-contest label and rating series for a time-series display.
///
/// `labels[i]` is the contest name annotated with the signed rating delta;
/// `ratings[i]` is the post-contest rating. Both sequences have the same
/// length as the input contest list, position for position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingHistory {
    pub labels: Vec<String>,
    pub ratings: Vec<i64>,
}

impl RatingHistory {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Solved-count histogram keyed by rating level.
///
/// Key order is the first-encountered order of rating levels among the
/// deduplicated solved problems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RatingHistogram {
    /// Rating levels as string keys, in first-seen order
    pub levels: Vec<String>,

    /// Solved count per level, positionally aligned with `levels`
    pub counts: Vec<u32>,
}

impl RatingHistogram {
    /// Look up the solved count for a rating level.
    pub fn count_for(&self, level: &str) -> Option<u32> {
        self.levels
            .iter()
            .position(|l| l == level)
            .map(|i| self.counts[i])
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// One entry of the tag-frequency ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

/// Locator for every deduplicated unsolved rated problem.
///
/// Three parallel sequences grouped by contest: all indices for a contest
/// id appear contiguously, contests in first-encounter order. Consumers
/// zip `contest_ids` and `indices` into problem-reference links and use
/// `keys` as stable display identifiers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnsolvedLocator {
    pub contest_ids: Vec<i64>,
    pub indices: Vec<String>,
    pub keys: Vec<String>,
}

impl UnsolvedLocator {
    /// Append one problem, keeping the three sequences aligned.
    pub fn push(&mut self, key: ProblemKey) {
        self.keys.push(key.to_string());
        self.contest_ids.push(key.contest_id);
        self.indices.push(key.index);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Full output of the submission aggregation pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionStats {
    /// Rating-level histogram of solved problems
    pub histogram: RatingHistogram,

    /// Tag frequencies, count descending with first-encounter tie-break
    pub tag_ranking: Vec<TagCount>,

    /// `"tag: count"` strings positionally aligned with `tag_ranking`
    pub tag_legend: Vec<String>,

    /// Deduplicated unsolved rated problems, grouped by contest
    pub unsolved: UnsolvedLocator,
}
