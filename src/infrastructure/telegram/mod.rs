use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::services::BroadcastTransport;

/// Thin Telegram Bot API client. Serves both roles the bot needs: the
/// broadcast transport for the dispatcher and the long-poll source of
/// operator input.
pub struct TelegramApi {
    http: Client,
    base_url: String,
    token: String,
}

impl TelegramApi {
    pub fn new(token: String) -> Arc<Self> {
        Arc::new(Self {
            http: Client::builder()
                .user_agent("broadcaster/telegram")
                .build()
                .expect("failed to build telegram client"),
            base_url: "https://api.telegram.org".to_string(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        self.call("sendMessage", json!({ "chat_id": chat_id, "text": text }))
            .await
    }

    pub async fn send_with_keyboard(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: &ReplyKeyboardMarkup,
    ) -> anyhow::Result<()> {
        self.call(
            "sendMessage",
            json!({ "chat_id": chat_id, "text": text, "reply_markup": keyboard }),
        )
        .await
    }

    /// Long-polls for updates. `offset` must be one past the last update
    /// already handled, so Telegram stops re-serving it.
    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_seconds: u64,
    ) -> anyhow::Result<Vec<Update>> {
        let response = self
            .http
            .get(self.method_url("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_seconds.to_string()),
                ("allowed_updates", r#"["message"]"#.to_string()),
            ])
            .timeout(Duration::from_secs(timeout_seconds + 10))
            .send()
            .await?;
        let envelope: ApiEnvelope<Vec<Update>> = response.json().await?;
        envelope.into_result()
    }

    async fn call(&self, method: &str, payload: serde_json::Value) -> anyhow::Result<()> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(&payload)
            .send()
            .await?;
        let envelope: ApiEnvelope<serde_json::Value> = response.json().await?;
        envelope.into_result().map(|_| ())
    }
}

#[async_trait]
impl BroadcastTransport for TelegramApi {
    async fn send(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
        self.send_message(chat_id, text).await
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    description: Option<String>,
    result: Option<T>,
}

impl<T> ApiEnvelope<T> {
    fn into_result(self) -> anyhow::Result<T> {
        if !self.ok {
            anyhow::bail!(
                "telegram api returned error: {}",
                self.description
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }
        self.result
            .ok_or_else(|| anyhow::anyhow!("telegram api response missing result"))
    }
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub chat: ChatInfo,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatInfo {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub title: Option<String>,
    pub username: Option<String>,
    #[serde(rename = "first_name")]
    pub first_name: Option<String>,
    #[serde(rename = "last_name")]
    pub last_name: Option<String>,
}

impl ChatInfo {
    /// Group/channel title if there is one, otherwise the account's
    /// username or full name.
    pub fn display_name(&self) -> String {
        let mut candidates = vec![];
        if let Some(title) = &self.title {
            candidates.push(title.clone());
        }
        if let Some(username) = &self.username {
            candidates.push(format!("@{}", username));
        }
        let full_name = match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            _ => None,
        };
        if let Some(name) = full_name {
            candidates.push(name);
        }
        candidates
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Unnamed chat".to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct ReplyKeyboardMarkup {
    keyboard: Vec<Vec<KeyboardButton>>,
    resize_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardButton {
    text: String,
}

impl ReplyKeyboardMarkup {
    /// One button per row.
    pub fn single_column(labels: &[&str]) -> Self {
        Self {
            keyboard: labels
                .iter()
                .map(|label| {
                    vec![KeyboardButton {
                        text: label.to_string(),
                    }]
                })
                .collect(),
            resize_keyboard: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_title() {
        let chat = ChatInfo {
            id: -100,
            chat_type: "supergroup".to_string(),
            title: Some("Announcements".to_string()),
            username: Some("announce".to_string()),
            first_name: None,
            last_name: None,
        };
        assert_eq!(chat.display_name(), "Announcements");
    }

    #[test]
    fn test_display_name_falls_back_to_full_name() {
        let chat = ChatInfo {
            id: 7,
            chat_type: "private".to_string(),
            title: None,
            username: None,
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        };
        assert_eq!(chat.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_error_envelope_surfaces_description() {
        let envelope: ApiEnvelope<Vec<Update>> = serde_json::from_str(
            r#"{"ok": false, "description": "Unauthorized"}"#,
        )
        .unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[test]
    fn test_update_parsing_tolerates_non_text_messages() {
        let updates: ApiEnvelope<Vec<Update>> = serde_json::from_str(
            r#"{"ok": true, "result": [
                {"update_id": 1, "message": {"chat": {"id": 5, "type": "private"}}},
                {"update_id": 2}
            ]}"#,
        )
        .unwrap();
        let updates = updates.into_result().unwrap();
        assert_eq!(updates.len(), 2);
        assert!(updates[0].message.as_ref().unwrap().text.is_none());
        assert!(updates[1].message.is_none());
    }
}
