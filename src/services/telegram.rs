use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::services::notifier::NotifierError;

/// Delivery channel for notification text
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), NotifierError>;
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Telegram Bot API client bound to one chat
pub struct TelegramBot {
    client: Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramBot {
    pub fn new(api_url: String, token: String, chat_id: String) -> Self {
        Self {
            client: Client::builder().build().unwrap_or_default(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
            chat_id,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
        )
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }
}

#[async_trait]
impl MessageSender for TelegramBot {
    async fn send_message(&self, text: &str) -> Result<(), NotifierError> {
        tracing::info!("Sending message to chat {}: {}", self.chat_id, text);

        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            .map_err(|e| NotifierError::Delivery(e.without_url().to_string()))?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiResponse { description: Some(description), .. }) => {
                Err(NotifierError::Delivery(description))
            }
            _ => Err(NotifierError::Delivery(format!("Bot API returned status: {}", status))),
        }
    }
}
