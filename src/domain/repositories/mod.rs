use async_trait::async_trait;

use crate::domain::models::{Chat, NewScheduledMessage, ScheduledMessage};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn add(&self, message: NewScheduledMessage) -> anyhow::Result<ScheduledMessage>;
    async fn list(&self) -> anyhow::Result<Vec<ScheduledMessage>>;
    /// Messages with `date == date` and `time <= time`, ascending id.
    /// Comparison is textual; the stored forms make it chronological.
    async fn list_due(&self, date: &str, time: &str) -> anyhow::Result<Vec<ScheduledMessage>>;
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
    async fn delete_all(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ChatRepository: Send + Sync {
    async fn add(&self, chat_id: i64) -> anyhow::Result<Chat>;
    async fn list(&self) -> anyhow::Result<Vec<Chat>>;
}
