//! Environment configuration shared across services
//!
//! All runtime configuration comes from the environment. Telegram
//! credentials are optional for the API service (the notifier degrades to
//! a logged no-op without them) and required for the bot binary.

use tracing::warn;

/// Telegram bot credentials and operator destination.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot API token (`TELEGRAM_BOT_TOKEN`)
    pub bot_token: String,
    /// Operator chat id receiving notifications (`TELEGRAM_ADMIN_ID`)
    pub admin_chat_id: String,
}

impl TelegramConfig {
    /// Load Telegram credentials from the environment.
    ///
    /// Returns `None` when either variable is absent or empty; callers
    /// decide whether that is fatal (bot) or a degraded mode (notifier).
    pub fn from_env() -> Option<Self> {
        let bot_token = non_empty_env("TELEGRAM_BOT_TOKEN")?;
        let admin_chat_id = non_empty_env("TELEGRAM_ADMIN_ID")?;
        Some(Self {
            bot_token,
            admin_chat_id,
        })
    }

    /// Base URL for Bot API calls with this token.
    pub fn api_base(&self) -> String {
        format!("https://api.telegram.org/bot{}", self.bot_token)
    }
}

/// Fallback admin password used when `ADMIN_PASSWORD` is not set.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Resolve the admin password, warning when the insecure default is used.
pub fn admin_password_from_env() -> String {
    match non_empty_env("ADMIN_PASSWORD") {
        Some(password) => password,
        None => {
            warn!("ADMIN_PASSWORD not set, using insecure default");
            DEFAULT_ADMIN_PASSWORD.to_string()
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
