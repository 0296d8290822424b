//! Landing statistics endpoint

use axum::{extract::State, Json};
use chrono::{DateTime, Local, LocalResult, TimeZone, Utc};
use tunelead_common::db::models::{LeadStatus, Stats};
use tunelead_common::db::{leads, tracks};

use crate::error::ApiResult;
use crate::AppState;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let total_leads = leads::count_total(&state.db).await?;
    let new_leads = leads::count_with_status(&state.db, LeadStatus::New).await?;
    let today_leads = leads::count_created_since(&state.db, local_midnight_utc()).await?;
    let total_tracks = tracks::count(&state.db).await?;

    Ok(Json(Stats {
        total_leads,
        new_leads,
        today_leads,
        total_tracks,
    }))
}

/// Start of the current server-local calendar day, as a UTC instant.
///
/// "Today" deliberately follows server-local time, matching what the
/// operator sees on the admin panel.
fn local_midnight_utc() -> DateTime<Utc> {
    let today = Local::now().date_naive();
    match Local.from_local_datetime(&today.and_hms_opt(0, 0, 0).unwrap_or_default()) {
        LocalResult::Single(midnight) | LocalResult::Ambiguous(midnight, _) => {
            midnight.with_timezone(&Utc)
        }
        // Midnight skipped by a DST jump: fall back to the UTC day start
        LocalResult::None => Utc
            .from_utc_datetime(&today.and_hms_opt(0, 0, 0).unwrap_or_default()),
    }
}
