use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::RatingHistory;
use crate::transform::transform_rating_history;

/// `GET /user/rating/{handle}` — labels and post-contest rating series for
/// a time-series display.
pub async fn user_rating(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<RatingHistory>, ApiError> {
    let contests = state.judge.user_rating(&handle).await?;
    debug!("Fetched {} contests for {}", contests.len(), handle);

    let history = transform_rating_history(&contests)?;
    Ok(Json(history))
}
