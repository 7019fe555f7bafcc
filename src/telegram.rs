//! Minimal Telegram Bot API client
//!
//! Typed wrapper over the HTTP Bot API: long polling via `getUpdates` and
//! message sending via `sendMessage`. Only the update fields this bot
//! consumes are modeled.

use crate::config::TelegramConfig;
use crate::{MeteoBotError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// An inbound update from `getUpdates`
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// A chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

/// The sender of a message
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
}

/// The chat a message belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

/// Bot API response envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesParams {
    offset: i64,
    timeout: u32,
    allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct SendMessageParams<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

/// HTTP client for the Telegram Bot API
pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    /// Create a new Bot API client
    pub fn new(config: TelegramConfig) -> Result<Self> {
        // The HTTP timeout must outlive the long-poll window
        let timeout = Duration::from_secs(u64::from(config.poll_timeout_seconds) + 10);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MeteoBotError::telegram(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Long-poll for new updates starting at `offset`
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: self.config.poll_timeout_seconds,
            allowed_updates: &["message"],
        };
        self.call("getUpdates", &params).await
    }

    /// Send a plain-text reply
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        debug!("Sending message to chat {chat_id}");
        let params = SendMessageParams {
            chat_id,
            text,
            parse_mode: None,
        };
        self.call("sendMessage", &params).await
    }

    /// Send an HTML-formatted reply
    pub async fn send_html(&self, chat_id: i64, text: &str) -> Result<Message> {
        debug!("Sending HTML message to chat {chat_id}");
        let params = SendMessageParams {
            chat_id,
            text,
            parse_mode: Some("HTML"),
        };
        self.call("sendMessage", &params).await
    }

    async fn call<T, P>(&self, method: &str, params: &P) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        P: Serialize,
    {
        // The token is part of the URL, keep it out of logs
        let url = format!("{}/bot{}/{}", self.config.api_base, self.config.token, method);

        let response = self
            .client
            .post(url)
            .json(params)
            .send()
            .await
            .map_err(|e| MeteoBotError::telegram(format!("{method} request failed: {e}")))?;

        let envelope: ApiResponse<T> = response.json().await.map_err(|e| {
            MeteoBotError::telegram(format!("Failed to parse {method} response: {e}"))
        })?;

        unwrap_envelope(method, envelope)
    }
}

fn unwrap_envelope<T>(method: &str, envelope: ApiResponse<T>) -> Result<T> {
    if !envelope.ok {
        let description = envelope
            .description
            .unwrap_or_else(|| "no description".to_string());
        return Err(MeteoBotError::telegram(format!(
            "{method} rejected by Telegram: {description}"
        )));
    }

    envelope
        .result
        .ok_or_else(|| MeteoBotError::telegram(format!("{method} returned an empty result")))
}
