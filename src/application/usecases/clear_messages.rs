use std::sync::Arc;

use crate::domain::{errors::DomainError, repositories::MessageRepository};

/// Wipes the message store; the next dispatch tick will match nothing.
pub struct ClearMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl ClearMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn execute(&self) -> Result<(), DomainError> {
        self.messages
            .delete_all()
            .await
            .map_err(DomainError::storage)
    }
}
