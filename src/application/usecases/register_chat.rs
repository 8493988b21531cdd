use std::sync::Arc;

use crate::domain::{errors::DomainError, models::Chat, repositories::ChatRepository};

pub struct RegisterChatRequest {
    /// The operator's raw input, taken verbatim.
    pub input: String,
    /// The chat the operator is conversing in, used when the input is not
    /// an id.
    pub current_chat_id: i64,
}

/// Registers a destination chat. No dedup: registering the same chat
/// twice means it gets every broadcast twice.
pub struct RegisterChatUseCase {
    chats: Arc<dyn ChatRepository>,
}

impl RegisterChatUseCase {
    pub fn new(chats: Arc<dyn ChatRepository>) -> Self {
        Self { chats }
    }

    pub async fn execute(&self, request: RegisterChatRequest) -> Result<Chat, DomainError> {
        let chat_id = resolve_chat_id(&request.input, request.current_chat_id);
        self.chats.add(chat_id).await.map_err(DomainError::storage)
    }
}

/// An optionally-negative integer literal is the chat id itself; anything
/// else means "the chat this message came from".
fn resolve_chat_id(input: &str, current: i64) -> i64 {
    let digits = input.strip_prefix('-').unwrap_or(input);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(id) = input.parse::<i64>() {
            return id;
        }
    }
    current
}
