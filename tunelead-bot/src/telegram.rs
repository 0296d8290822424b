//! Minimal Telegram Bot API client
//!
//! Long-polling `getUpdates` plus `sendMessage`, nothing more. The send
//! timeout is bounded; the polling client allows for the 30 second
//! long-poll window.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tunelead_common::config::TelegramConfig;

const POLL_TIMEOUT_SECS: u64 = 30;
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// A single update from `getUpdates`.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub text: Option<String>,
    pub chat: Chat,
    pub from: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// Bot API client bound to one bot token.
pub struct TelegramClient {
    poll_client: reqwest::Client,
    send_client: reqwest::Client,
    api_base: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Result<Self, TelegramError> {
        let poll_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()
            .map_err(|e| TelegramError::Network(e.to_string()))?;
        let send_client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        Ok(Self {
            poll_client,
            send_client,
            api_base: config.api_base(),
        })
    }

    /// Long-poll for updates past `offset`.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let url = format!("{}/getUpdates", self.api_base);
        let response = self
            .poll_client
            .get(&url)
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", POLL_TIMEOUT_SECS.to_string()),
            ])
            .send()
            .await
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        self.parse_envelope(response).await
    }

    /// Send an HTML-formatted message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let url = format!("{}/sendMessage", self.api_base);
        let body = json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "HTML",
            "disable_web_page_preview": true,
        });

        let response = self
            .send_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TelegramError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api(status, detail));
        }
        Ok(())
    }

    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api(status.as_u16(), detail));
        }

        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .map_err(|e| TelegramError::Parse(e.to_string()))?;

        if !envelope.ok {
            return Err(TelegramError::Api(
                status.as_u16(),
                envelope.description.unwrap_or_default(),
            ));
        }
        envelope
            .result
            .ok_or_else(|| TelegramError::Parse("Missing result field".to_string()))
    }
}
