use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::{
    application::{
        conversation::{self, Action, AdminState},
        usecases::{
            clear_messages::ClearMessagesUseCase,
            list_messages::ListMessagesUseCase,
            register_chat::{RegisterChatRequest, RegisterChatUseCase},
            schedule_message::ScheduleMessageUseCase,
        },
    },
    domain::models::ScheduledMessage,
    infrastructure::telegram::{ChatInfo, IncomingMessage, ReplyKeyboardMarkup, TelegramApi},
};

const POLL_TIMEOUT_SECONDS: u64 = 30;
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

const MENU_LABELS: [&str; 4] = [
    conversation::ADD_CHAT_LABEL,
    conversation::ADD_MESSAGE_LABEL,
    conversation::LIST_MESSAGES_LABEL,
    conversation::DELETE_ALL_LABEL,
];

/// Operator-facing front-end: polls updates, feeds each text through the
/// conversation state machine, and executes whatever action falls out.
/// Dialogue state is kept per conversing chat, so operators never see
/// each other's drafts.
pub struct AdminBot {
    api: Arc<TelegramApi>,
    sessions: Mutex<HashMap<i64, AdminState>>,
    schedule_message: ScheduleMessageUseCase,
    register_chat: RegisterChatUseCase,
    list_messages: ListMessagesUseCase,
    clear_messages: ClearMessagesUseCase,
}

impl AdminBot {
    pub fn new(
        api: Arc<TelegramApi>,
        schedule_message: ScheduleMessageUseCase,
        register_chat: RegisterChatUseCase,
        list_messages: ListMessagesUseCase,
        clear_messages: ClearMessagesUseCase,
    ) -> Self {
        Self {
            api,
            sessions: Mutex::new(HashMap::new()),
            schedule_message,
            register_chat,
            list_messages,
            clear_messages,
        }
    }

    /// Long-polls updates forever. A failed poll or a failed handler is
    /// logged and the loop keeps accepting input.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut offset = 0i64;
        loop {
            let updates = match self.api.get_updates(offset, POLL_TIMEOUT_SECONDS).await {
                Ok(updates) => updates,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to poll updates");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else { continue };
                let Some(text) = message.text.clone() else { continue };
                if let Err(err) = self.handle_text(&message, &text).await {
                    tracing::error!(
                        chat_id = message.chat.id,
                        error = ?err,
                        "failed to handle operator message"
                    );
                }
            }
        }
    }

    async fn handle_text(&self, message: &IncomingMessage, text: &str) -> anyhow::Result<()> {
        let action = {
            let mut sessions = self.sessions.lock().await;
            let state = sessions.remove(&message.chat.id).unwrap_or_default();
            let (next, action) = conversation::step(state, text);
            if next != AdminState::Idle {
                sessions.insert(message.chat.id, next);
            }
            action
        };
        self.perform(action, message).await
    }

    async fn perform(&self, action: Action, message: &IncomingMessage) -> anyhow::Result<()> {
        let chat_id = message.chat.id;
        match action {
            Action::Prompt(prompt) => self.api.send_message(chat_id, prompt).await,
            Action::ShowAdminMenu => {
                let keyboard = ReplyKeyboardMarkup::single_column(&MENU_LABELS);
                self.api
                    .send_with_keyboard(chat_id, "Admin panel:", &keyboard)
                    .await
            }
            Action::ShowChatInfo => {
                self.api
                    .send_message(chat_id, &chat_info_text(&message.chat))
                    .await
            }
            Action::ListMessages => {
                let messages = self.list_messages.execute().await?;
                self.api
                    .send_message(chat_id, &listing_text(&messages))
                    .await
            }
            Action::ClearMessages => {
                self.clear_messages.execute().await?;
                self.api
                    .send_message(chat_id, "All messages deleted.")
                    .await
            }
            Action::CommitMessage(draft) => {
                self.schedule_message.execute(draft).await?;
                self.api.send_message(chat_id, "Message saved.").await
            }
            Action::RegisterChat { raw } => {
                let request = RegisterChatRequest {
                    input: raw,
                    current_chat_id: chat_id,
                };
                match self.register_chat.execute(request).await {
                    Ok(chat) => {
                        self.api
                            .send_message(chat_id, &format!("Chat {} registered.", chat.chat_id))
                            .await
                    }
                    Err(err) => {
                        self.api
                            .send_message(chat_id, &format!("Error: {err}"))
                            .await
                    }
                }
            }
            Action::Ignore => Ok(()),
        }
    }
}

fn chat_info_text(chat: &ChatInfo) -> String {
    format!(
        "Chat ID: {}\nTitle: {}\nType: {}",
        chat.id,
        chat.display_name(),
        chat.chat_type
    )
}

fn listing_text(messages: &[ScheduledMessage]) -> String {
    if messages.is_empty() {
        return "No saved messages.".to_string();
    }
    messages
        .iter()
        .map(|m| format!("📌 {}\n🗓 {} ⏰ {}\n📝 {}", m.title, m.date, m.time, m.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_shows_messages_as_stored() {
        let messages = vec![
            ScheduledMessage {
                id: 1,
                title: "Sale".to_string(),
                text: "50% off today".to_string(),
                time: "09:00".to_string(),
                date: "2025-03-01".to_string(),
            },
            ScheduledMessage {
                id: 2,
                title: "typo".to_string(),
                text: "never goes out".to_string(),
                time: "soonish".to_string(),
                date: "whenever".to_string(),
            },
        ];
        let text = listing_text(&messages);
        assert!(text.contains("📌 Sale"));
        assert!(text.contains("🗓 2025-03-01 ⏰ 09:00"));
        // Unparsable schedules stay visible, unfiltered.
        assert!(text.contains("🗓 whenever ⏰ soonish"));
    }

    #[test]
    fn test_empty_listing_has_a_placeholder() {
        assert_eq!(listing_text(&[]), "No saved messages.");
    }
}
