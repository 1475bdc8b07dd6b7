use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::SubmissionStats;
use crate::transform::aggregate_submissions;

/// `GET /user/status/{handle}` — solved histogram, tag ranking and legend,
/// and the unsolved-problem locator.
pub async fn user_status(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Json<SubmissionStats>, ApiError> {
    let submissions = state.judge.user_status(&handle).await?;
    debug!("Fetched {} submissions for {}", submissions.len(), handle);

    let stats = aggregate_submissions(&submissions)?;
    Ok(Json(stats))
}
