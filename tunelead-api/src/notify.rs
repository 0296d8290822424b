//! Operator notification via Telegram
//!
//! One best-effort send per lead: no retry, no acknowledgment tracking.
//! Every failure path (missing credentials, transport error, non-2xx
//! reply) logs and returns `false` so lead creation is never affected.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{error, info, warn};
use tunelead_common::config::TelegramConfig;
use tunelead_common::db::models::Lead;
use tunelead_common::style::{display_style, StyleTag};

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram notifier for new lead submissions.
pub struct Notifier {
    client: Client,
    config: Option<TelegramConfig>,
}

impl Notifier {
    /// Build a notifier. `None` config degrades every send to a logged
    /// no-op returning `false`.
    pub fn new(config: Option<TelegramConfig>) -> Self {
        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Whether credentials are present.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Send the new-lead message to the operator chat.
    ///
    /// Returns whether the message was delivered. Never errors.
    pub async fn notify(&self, lead: &Lead) -> bool {
        let Some(config) = &self.config else {
            warn!("Telegram bot not configured, skipping notification for lead {}", lead.id);
            return false;
        };

        let text = format_lead_notification(lead);
        let url = format!("{}/sendMessage", config.api_base());
        let body = json!({
            "chat_id": config.admin_chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        match self.client.post(&url).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Telegram notification sent for lead {}", lead.id);
                true
            }
            Ok(response) => {
                error!(
                    "Telegram rejected notification for lead {}: HTTP {}",
                    lead.id,
                    response.status()
                );
                false
            }
            Err(e) => {
                error!("Error sending Telegram notification for lead {}: {}", lead.id, e);
                false
            }
        }
    }
}

/// Build the operator-facing message for a new lead.
pub fn format_lead_notification(lead: &Lead) -> String {
    let style_symbol = StyleTag::parse(&lead.style).symbol();
    let style_name = display_style(&lead.style);
    let has_text = if lead.has_text { "yes" } else { "no" };

    let mut message = format!(
        "\u{1F514} <b>NEW LEAD FROM LANDING!</b>\n\n\
         \u{1F464} <b>Name:</b> {}\n\
         \u{1F4E7} <b>Email:</b> {}\n\
         \u{1F4F1} <b>Phone:</b> {}\n\n\
         \u{1F3B5} <b>Style:</b> {} {}\n\
         \u{1F4DD} <b>Wants lyrics:</b> {}\n",
        lead.name, lead.email, lead.phone, style_symbol, style_name, has_text,
    );

    if lead.has_text {
        if let Some(description) = &lead.text_description {
            message.push_str(&format!("\u{1F4C4} <b>Lyrics brief:</b> {}\n", description));
        }
    }
    if let Some(comment) = &lead.message {
        message.push_str(&format!("\n\u{1F4AC} <b>Comment:</b> {}\n", comment));
    }

    message.push_str(&format!(
        "\n\u{1F550} <b>Time:</b> {}\n\u{1F4CA} <b>Lead ID:</b> #{}\n",
        lead.created_at.format("%d.%m.%Y %H:%M"),
        lead.id,
    ));

    message
}
