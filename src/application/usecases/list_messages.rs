use std::sync::Arc;

use crate::domain::{
    errors::DomainError, models::ScheduledMessage, repositories::MessageRepository,
};

/// Lists every stored message, unfiltered, exactly as stored.
pub struct ListMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn execute(&self) -> Result<Vec<ScheduledMessage>, DomainError> {
        self.messages.list().await.map_err(DomainError::storage)
    }
}
