//! tunelead-bot - Admin query bot
//!
//! Telegram front-end for the operator: polls for commands and answers
//! with lead listings and statistics fetched from the backend API. Only
//! the configured operator chat is served.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tunelead_common::config::TelegramConfig;
use tunelead_common::Error;

mod backend;
mod commands;
mod format;
mod telegram;

use backend::BackendClient;
use commands::Command;
use telegram::{TelegramClient, Update};

#[derive(Debug, Parser)]
#[command(name = "tunelead-bot", version, about = "TuneLead admin query bot")]
struct Args {
    /// Base URL of the tunelead-api backend
    #[arg(long, env = "BACKEND_URL", default_value = "http://localhost:8000")]
    backend_url: String,
}

struct Bot {
    telegram: TelegramClient,
    backend: BackendClient,
    admin_chat_id: String,
    admin_user_id: i64,
    backend_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting tunelead-bot v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = TelegramConfig::from_env().ok_or_else(|| {
        Error::Config("TELEGRAM_BOT_TOKEN and TELEGRAM_ADMIN_ID must be set".to_string())
    })?;
    let admin_user_id = parse_admin_id(&config.admin_chat_id)?;

    info!("Backend URL: {}", args.backend_url);

    let bot = Bot {
        telegram: TelegramClient::new(&config)?,
        backend: BackendClient::new(args.backend_url.clone())?,
        admin_chat_id: config.admin_chat_id.clone(),
        admin_user_id,
        backend_url: args.backend_url,
    };

    run(bot).await
}

async fn run(bot: Bot) -> Result<()> {
    let mut offset = 0i64;

    loop {
        match bot.telegram.get_updates(offset).await {
            Ok(updates) => {
                for update in updates {
                    offset = offset.max(update.update_id + 1);
                    handle_update(&bot, update).await;
                }
            }
            Err(e) => {
                error!("Error polling updates: {}", e);
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    }
}

async fn handle_update(bot: &Bot, update: Update) {
    let Some(message) = update.message else {
        return;
    };
    let Some(text) = message.text.as_deref() else {
        return;
    };
    let Some(command) = Command::parse(text) else {
        return;
    };

    let chat_id = message.chat.id;
    let is_operator = message
        .from
        .as_ref()
        .map(|from| from.id == bot.admin_user_id)
        .unwrap_or(false);

    // Non-operators get a denial on /start and silence otherwise
    if !is_operator {
        if command == Command::Start {
            warn!("Access denied for chat {}", chat_id);
            send(bot, chat_id, &format::access_denied()).await;
        }
        return;
    }

    let reply = commands::respond(command, &bot.backend, &bot.admin_chat_id, &bot.backend_url).await;
    send(bot, chat_id, &reply).await;
}

async fn send(bot: &Bot, chat_id: i64, text: &str) {
    if let Err(e) = bot.telegram.send_message(chat_id, text).await {
        error!("Error sending reply to chat {}: {}", chat_id, e);
    }
}

/// The operator id doubles as the sender filter, so it must be numeric.
fn parse_admin_id(admin_chat_id: &str) -> Result<i64, Error> {
    admin_chat_id.parse().map_err(|_| {
        Error::Config(format!(
            "TELEGRAM_ADMIN_ID must be a numeric chat id, got '{}'",
            admin_chat_id
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_admin_id_parses() {
        assert_eq!(parse_admin_id("123456789").unwrap(), 123456789);
        assert_eq!(parse_admin_id("-100200300").unwrap(), -100200300);
    }

    #[test]
    fn non_numeric_admin_id_is_a_config_error() {
        assert!(matches!(
            parse_admin_id("@operator"),
            Err(Error::Config(_))
        ));
        assert!(matches!(parse_admin_id(""), Err(Error::Config(_))));
    }
}
