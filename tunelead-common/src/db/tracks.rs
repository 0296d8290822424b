//! Track request store operations
//!
//! A request is created in `processing` state and mutated exactly once by
//! the generation worker, to `completed` (with artifact location) or
//! `failed`. Updates against a missing id are logged no-ops: the worker
//! runs out-of-band and has nobody left to report the error to.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::warn;

use super::models::TrackRequest;
use crate::{Error, Result};

/// Persist a new track request in `processing` state.
pub async fn create(
    pool: &SqlitePool,
    prompt: &str,
    style: &str,
    lead_id: Option<i64>,
) -> Result<TrackRequest> {
    let created_at = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO track_requests (lead_id, prompt, style, status, created_at)
        VALUES (?1, ?2, ?3, 'processing', ?4)
        "#,
    )
    .bind(lead_id)
    .bind(prompt)
    .bind(style)
    .bind(created_at)
    .execute(pool)
    .await?;

    get(pool, result.last_insert_rowid()).await
}

/// Fetch a single track request by id.
pub async fn get(pool: &SqlitePool, id: i64) -> Result<TrackRequest> {
    sqlx::query_as::<_, TrackRequest>("SELECT * FROM track_requests WHERE id = ?1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Track request {} not found", id)))
}

/// Mark a request completed and record the artifact location.
pub async fn complete(pool: &SqlitePool, id: i64, audio_url: &str) -> Result<()> {
    let result =
        sqlx::query("UPDATE track_requests SET status = 'completed', audio_url = ?1 WHERE id = ?2")
            .bind(audio_url)
            .bind(id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        warn!("complete: track request {} does not exist, ignoring", id);
    }
    Ok(())
}

/// Mark a request failed.
pub async fn fail(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("UPDATE track_requests SET status = 'failed' WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        warn!("fail: track request {} does not exist, ignoring", id);
    }
    Ok(())
}

pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM track_requests")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
