//! Track generation worker
//!
//! Runs out-of-band after the create-track response is dispatched. The
//! delay stands in for a real synthesis backend; on success the request
//! moves to `completed` with a synthetic artifact path, on any error it
//! moves to `failed`. Either way the transition happens exactly once.

use std::time::Duration;

use sqlx::SqlitePool;
use tracing::{error, info};
use tunelead_common::db::tracks;
use tunelead_common::Result;

/// Synthetic artifact path for a completed track.
pub fn audio_location(track_id: i64) -> String {
    format!("/tracks/{}/audio.mp3", track_id)
}

/// Simulate generation for `track_id`, then finalize its status.
pub async fn run_generation(pool: SqlitePool, track_id: i64, delay: Duration) -> Result<()> {
    tokio::time::sleep(delay).await;

    match tracks::complete(&pool, track_id, &audio_location(track_id)).await {
        Ok(()) => {
            info!("Track {} generation completed", track_id);
            Ok(())
        }
        Err(e) => {
            error!("Error generating track {}: {}", track_id, e);
            tracks::fail(&pool, track_id).await?;
            Ok(())
        }
    }
}
