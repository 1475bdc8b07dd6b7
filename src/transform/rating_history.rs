//! Rating history pipeline.

use crate::models::{ContestParticipation, RatingHistory};

use super::TransformError;

/// Turn the ordered contest-participation list into a label/rating series.
///
/// Labels render the rating delta with its sign in front of the contest
/// name: `"+(50) Div2 A"` for a gain, `"(-50) Div2 A"` for a loss,
/// `"(0) Div2 A"` for no change. Every input contest produces exactly one
/// output pair; order and length are preserved.
pub fn transform_rating_history(
    contests: &[ContestParticipation],
) -> Result<RatingHistory, TransformError> {
    let mut labels = Vec::with_capacity(contests.len());
    let mut ratings = Vec::with_capacity(contests.len());

    for (position, contest) in contests.iter().enumerate() {
        let name = contest
            .contest_name
            .as_deref()
            .ok_or_else(|| TransformError::missing("contest", "contestName", position))?;
        // Rank is required by the schema even though the series does not use it.
        contest
            .rank
            .ok_or_else(|| TransformError::missing("contest", "rank", position))?;
        let old_rating = contest
            .old_rating
            .ok_or_else(|| TransformError::missing("contest", "oldRating", position))?;
        let new_rating = contest
            .new_rating
            .ok_or_else(|| TransformError::missing("contest", "newRating", position))?;

        let delta = new_rating - old_rating;
        let label = if delta > 0 {
            format!("+({delta}) {name}")
        } else {
            format!("({delta}) {name}")
        };

        labels.push(label);
        ratings.push(new_rating);
    }

    Ok(RatingHistory { labels, ratings })
}
