//! Digest formatting for operator messages

use chrono::{DateTime, Local, Utc};
use tunelead_common::db::models::{Lead, LeadStatus, Stats};
use tunelead_common::style::{display_style, StyleTag};

/// Maximum leads rendered per digest; the rest is an overflow count.
const DIGEST_LIMIT: usize = 10;

/// Generic connectivity failure notice shown instead of raw errors.
pub const CONNECTIVITY_ERROR: &str = "\u{274C} Backend connection error";

pub fn welcome() -> String {
    "\u{1F514} <b>Lead management bot</b>\n\n\
     You will receive notifications about new landing leads.\n\n\
     <b>Commands:</b>\n\
     /start - Main menu\n\
     /leads - All leads\n\
     /today - Today's leads\n\
     /stats - Statistics\n\
     /status - Bot status\n\
     /help - Help"
        .to_string()
}

pub fn help_text() -> String {
    "\u{2753} <b>Command reference</b>\n\n\
     /start - Main menu\n\
     /leads - Show recent leads (up to 20)\n\
     /today - Today's leads\n\
     /stats - Overall statistics\n\
     /status - Bot status check\n\
     /help - This reference\n\n\
     <b>Automatic notifications:</b>\n\
     \u{2022} New leads arrive instantly\n\
     \u{2022} Each message carries the full client data"
        .to_string()
}

pub fn access_denied() -> String {
    "\u{26A0} <b>Access denied</b>\n\nThis bot serves the administrator only.".to_string()
}

pub fn status_text(admin_chat_id: &str, backend_url: &str) -> String {
    format!(
        "\u{1F4CA} <b>Bot status</b>\n\n\
         \u{1F7E2} Bot active\n\
         \u{1F464} Admin ID: {}\n\
         \u{1F517} Backend: {}\n\n\
         Ready to relay lead notifications.",
        admin_chat_id, backend_url,
    )
}

fn status_symbol(status: LeadStatus) -> &'static str {
    match status {
        LeadStatus::New => "\u{1F7E1}",       // 🟡
        LeadStatus::Contacted => "\u{1F7E0}", // 🟠
        LeadStatus::Converted => "\u{1F7E2}", // 🟢
    }
}

fn short_time(created_at: DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format("%d.%m %H:%M")
        .to_string()
}

/// Render a lead listing: top 10 entries plus an overflow count.
pub fn format_leads_digest(leads: &[Lead], title: &str) -> String {
    if leads.is_empty() {
        return format!("\u{1F4ED} <b>{}</b>\n\nNo leads", title);
    }

    let mut message = format!("\u{1F4CB} <b>{}</b> ({} total)\n\n", title, leads.len());

    for (i, lead) in leads.iter().take(DIGEST_LIMIT).enumerate() {
        message.push_str(&format!(
            "{}. <b>#{}</b> {}\n   \u{1F464} {}\n   \u{1F4F1} {}\n   {} {}\n   \u{1F4DD} {}\n\n",
            i + 1,
            lead.id,
            status_symbol(lead.status),
            lead.name,
            lead.phone,
            StyleTag::parse(&lead.style).symbol(),
            display_style(&lead.style),
            short_time(lead.created_at),
        ));
    }

    if leads.len() > DIGEST_LIMIT {
        message.push_str(&format!("... and {} more leads\n", leads.len() - DIGEST_LIMIT));
    }

    message
}

/// Render the statistics digest.
pub fn format_stats(stats: &Stats) -> String {
    format!(
        "\u{1F4CA} <b>Landing statistics</b>\n\n\
         \u{1F4CB} Total leads: <b>{}</b>\n\
         \u{1F7E1} New: <b>{}</b>\n\
         \u{1F4C5} Today: <b>{}</b>\n\
         \u{1F3B5} Tracks created: <b>{}</b>",
        stats.total_leads, stats.new_leads, stats.today_leads, stats.total_tracks,
    )
}
