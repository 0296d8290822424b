//! Track generation endpoint

use axum::{extract::State, Json};
use serde::Deserialize;
use tunelead_common::db::models::TrackRequest;
use tunelead_common::db::tracks;

use crate::error::{ApiError, ApiResult};
use crate::{tasks, worker, AppState};

/// Body for POST /api/generate
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default = "default_style")]
    pub style: String,
    /// Advisory only; the simulated backend ignores it
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub lead_id: Option<i64>,
}

fn default_style() -> String {
    "pop".to_string()
}

/// POST /api/generate
///
/// Persists the request in `processing` state and schedules the
/// generation worker; the response returns immediately.
pub async fn generate_track(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> ApiResult<Json<TrackRequest>> {
    if request.prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("Prompt must not be empty".to_string()));
    }

    let track =
        tracks::create(&state.db, &request.prompt, &request.style, request.lead_id).await?;

    let pool = state.db.clone();
    let delay = state.generation_delay;
    let track_id = track.id;
    tasks::spawn_background("track-generation", async move {
        worker::run_generation(pool, track_id, delay).await
    });

    Ok(Json(track))
}
