use std::sync::Arc;

use crate::domain::{
    errors::DomainError,
    models::{NewScheduledMessage, ScheduledMessage},
    repositories::MessageRepository,
};

/// Commits a finished composition draft to the message store.
pub struct ScheduleMessageUseCase {
    messages: Arc<dyn MessageRepository>,
}

impl ScheduleMessageUseCase {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn execute(
        &self,
        draft: NewScheduledMessage,
    ) -> Result<ScheduledMessage, DomainError> {
        self.messages.add(draft).await.map_err(DomainError::storage)
    }
}
