use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::info;
use jumanji_core::{BoxError, ChatNotifier};
use crate::error::StoreError;

/// Sends staff alerts through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, self.token, method)
    }
}

/// Telegram answers errors with a JSON body explaining why; prefer that over
/// the bare status line.
fn check_response(status: StatusCode, body: &str) -> Result<(), StoreError> {
    match serde_json::from_str::<ApiResponse>(body) {
        Ok(resp) if resp.ok && status.is_success() => Ok(()),
        Ok(resp) => Err(StoreError::TelegramRejected(
            resp.description.unwrap_or_else(|| status.to_string()),
        )),
        Err(_) => Err(StoreError::TelegramRejected(format!("{} with unreadable body", status))),
    }
}

#[async_trait]
impl ChatNotifier for TelegramNotifier {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), BoxError> {
        // The URL carries the bot token, keep it out of error messages.
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            .map_err(|e| StoreError::from(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::from(e.without_url()))?;

        check_response(status, &body)?;
        info!("Telegram message delivered to chat {}", chat_id);
        Ok(())
    }
}
