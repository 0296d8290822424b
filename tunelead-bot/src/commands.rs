//! Operator command parsing and responses

use chrono::Local;
use tracing::error;
use tunelead_common::db::models::Lead;

use crate::backend::BackendClient;
use crate::format;

/// Recognized operator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Status,
    Leads,
    Today,
    Stats,
}

impl Command {
    /// Parse a message text like "/leads" or "/leads@SomeBot arg".
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        if !first.starts_with('/') {
            return None;
        }
        let name = first[1..].split('@').next().unwrap_or("");
        match name {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "status" => Some(Self::Status),
            "leads" => Some(Self::Leads),
            "today" => Some(Self::Today),
            "stats" => Some(Self::Stats),
            _ => None,
        }
    }
}

/// Build the reply for an operator command. Backend failures collapse to
/// a generic connectivity notice.
pub async fn respond(
    command: Command,
    backend: &BackendClient,
    admin_chat_id: &str,
    backend_url: &str,
) -> String {
    match command {
        Command::Start => format::welcome(),
        Command::Help => format::help_text(),
        Command::Status => format::status_text(admin_chat_id, backend_url),
        Command::Leads => match backend.list_leads(20).await {
            Ok(leads) => format::format_leads_digest(&leads, "All leads"),
            Err(e) => {
                error!("Error fetching leads: {}", e);
                format::CONNECTIVITY_ERROR.to_string()
            }
        },
        Command::Today => match backend.list_leads(100).await {
            Ok(leads) => {
                let today = Local::now().date_naive();
                let todays: Vec<Lead> = leads
                    .into_iter()
                    .filter(|lead| lead.created_at.with_timezone(&Local).date_naive() == today)
                    .collect();
                let title = format!("Leads for {}", today.format("%d.%m.%Y"));
                format::format_leads_digest(&todays, &title)
            }
            Err(e) => {
                error!("Error fetching today's leads: {}", e);
                format::CONNECTIVITY_ERROR.to_string()
            }
        },
        Command::Stats => match backend.stats().await {
            Ok(stats) => format::format_stats(&stats),
            Err(e) => {
                error!("Error fetching stats: {}", e);
                format::CONNECTIVITY_ERROR.to_string()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/leads"), Some(Command::Leads));
        assert_eq!(Command::parse("/stats extra words"), Some(Command::Stats));
        assert_eq!(Command::parse("/today@TuneLeadBot"), Some(Command::Today));
    }

    #[test]
    fn rejects_non_commands() {
        assert_eq!(Command::parse("hello"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse("leads"), None);
    }
}
