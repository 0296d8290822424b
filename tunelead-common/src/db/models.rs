//! Database models and wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lead pipeline status. Moves forward by explicit admin action only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Converted,
}

impl LeadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Converted => "converted",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "contacted" => Ok(Self::Contacted),
            "converted" => Ok(Self::Converted),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown lead status: {}",
                other
            ))),
        }
    }
}

/// Track request status. Created as `processing`, mutated exactly once to
/// `completed` or `failed` by the generation worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TrackStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl TrackStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TrackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A landing-page form submission.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub style: String,
    pub has_text: bool,
    pub text_description: Option<String>,
    pub message: Option<String>,
    pub source: String,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub notified: bool,
}

/// Fields accepted when creating a lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub style: String,
    #[serde(default)]
    pub has_text: bool,
    #[serde(default)]
    pub text_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Defaults to "landing" when omitted
    #[serde(default)]
    pub source: Option<String>,
}

/// A request to synthesize a music track, optionally linked to a lead.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrackRequest {
    pub id: i64,
    pub lead_id: Option<i64>,
    pub prompt: String,
    pub style: String,
    pub status: TrackStatus,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Landing statistics returned by `GET /api/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub total_leads: i64,
    pub new_leads: i64,
    pub today_leads: i64,
    pub total_tracks: i64,
}
