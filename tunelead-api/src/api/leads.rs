//! Lead endpoints
//!
//! Creation schedules the operator notification in the background; the
//! response never waits on (or reflects) the delivery outcome.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use tunelead_common::db::leads;
use tunelead_common::db::models::{Lead, LeadStatus, NewLead};

use crate::error::{ApiError, ApiResult};
use crate::tasks;
use crate::AppState;

/// POST /api/leads
///
/// Validates and persists the submission, then fires the Telegram
/// notification as a background task.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(new): Json<NewLead>,
) -> ApiResult<Json<Lead>> {
    let lead = leads::create(&state.db, new).await?;
    info!("Lead created: {} - {}", lead.id, lead.email);

    let notifier = state.notifier.clone();
    let pool = state.db.clone();
    let for_notify = lead.clone();
    tasks::spawn_background("lead-notify", async move {
        // Delivery result is already logged by the notifier; the flag
        // records that the attempt was made.
        notifier.notify(&for_notify).await;
        leads::mark_notified(&pool, for_notify.id).await
    });

    Ok(Json(lead))
}

/// Pagination parameters for lead listing
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// GET /api/leads
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Lead>>> {
    let leads = leads::list(&state.db, query.skip, query.limit).await?;
    Ok(Json(leads))
}

/// GET /api/leads/:id
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Lead>> {
    let lead = leads::get(&state.db, id).await?;
    Ok(Json(lead))
}

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    pub status: String,
}

/// Acknowledgment for a status update
#[derive(Debug, Serialize)]
pub struct UpdateAck {
    pub success: bool,
    pub message: String,
}

/// PUT /api/leads/:id/status?status=contacted
pub async fn update_lead_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> ApiResult<Json<UpdateAck>> {
    let status: LeadStatus = query
        .status
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Unknown lead status: {}", query.status)))?;

    leads::update_status(&state.db, id, status).await?;

    Ok(Json(UpdateAck {
        success: true,
        message: format!("Lead {} status updated to {}", id, status),
    }))
}
