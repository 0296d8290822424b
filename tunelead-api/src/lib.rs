//! tunelead-api library - backend HTTP service
//!
//! Accepts lead submissions from the landing page, persists them, fires a
//! best-effort operator notification, and serves the admin read endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod notify;
pub mod sessions;
pub mod tasks;
pub mod worker;

pub use crate::error::{ApiError, ApiResult};
use crate::notify::Notifier;
use crate::sessions::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Telegram notifier (degraded no-op when unconfigured)
    pub notifier: Arc<Notifier>,
    /// Admin session tokens
    pub sessions: Arc<SessionStore>,
    /// Password for the admin panel login
    pub admin_password: String,
    /// Simulated generation backend delay
    pub generation_delay: Duration,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        notifier: Notifier,
        admin_password: String,
        generation_delay: Duration,
    ) -> Self {
        Self {
            db,
            notifier: Arc::new(notifier),
            sessions: Arc::new(SessionStore::new()),
            admin_password,
            generation_delay,
        }
    }
}

/// Build application router
///
/// API routes under /api, health at /health, everything else falls back
/// to the static landing assets.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    let static_assets =
        ServeDir::new("static").fallback(ServeFile::new("static/index.html"));

    Router::new()
        .route("/api", get(api::service_banner))
        .route("/api/leads", post(api::create_lead).get(api::list_leads))
        .route("/api/leads/:id", get(api::get_lead))
        .route("/api/leads/:id/status", put(api::update_lead_status))
        .route("/api/generate", post(api::generate_track))
        .route("/api/stats", get(api::get_stats))
        .route("/api/admin/login", post(api::admin_login))
        .route("/api/admin/verify", get(api::verify_admin_token))
        .merge(api::health_routes())
        .fallback_service(static_assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
