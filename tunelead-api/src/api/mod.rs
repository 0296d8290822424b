//! HTTP handlers for the backend API

pub mod admin;
pub mod health;
pub mod leads;
pub mod stats;
pub mod tracks;

pub use admin::{admin_login, verify_admin_token};
pub use health::{health_routes, service_banner};
pub use leads::{create_lead, get_lead, list_leads, update_lead_status};
pub use stats::get_stats;
pub use tracks::generate_track;
