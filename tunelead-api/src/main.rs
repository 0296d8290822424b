//! tunelead-api - Lead capture backend
//!
//! Accepts lead submissions from the marketing landing page, persists
//! them to SQLite, notifies the operator over Telegram (best-effort), and
//! serves the admin read/status endpoints plus the static landing assets.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tunelead_api::notify::Notifier;
use tunelead_api::{build_router, AppState};
use tunelead_common::config::{admin_password_from_env, TelegramConfig};
use tunelead_common::db::init_database;

#[derive(Debug, Parser)]
#[command(name = "tunelead-api", version, about = "TuneLead lead capture backend")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind: String,

    /// SQLite database file
    #[arg(long, env = "DATABASE_PATH", default_value = "leads.db")]
    database_path: PathBuf,

    /// Simulated generation backend delay in seconds
    #[arg(long, env = "GENERATION_DELAY_SECS", default_value_t = 10)]
    generation_delay_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tunelead-api v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let pool = init_database(&args.database_path).await?;
    info!("Database connection established");

    let telegram = TelegramConfig::from_env();
    if telegram.is_none() {
        warn!("Telegram credentials not set; operator notifications disabled");
    }
    let notifier = Notifier::new(telegram);

    let admin_password = admin_password_from_env();
    let generation_delay = Duration::from_secs(args.generation_delay_secs);

    let state = AppState::new(pool, notifier, admin_password, generation_delay);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    info!("tunelead-api listening on http://{}", args.bind);
    info!("Health check: http://{}/health", args.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
