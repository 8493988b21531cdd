use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{
    models::{Chat, NewScheduledMessage, ScheduledMessage},
    repositories::{ChatRepository, MessageRepository},
};

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<i64, ScheduledMessage>>>,
    next_id: AtomicI64,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn add(&self, message: NewScheduledMessage) -> anyhow::Result<ScheduledMessage> {
        let stored = ScheduledMessage {
            id: self.next_id(),
            title: message.title,
            text: message.text,
            time: message.time,
            date: message.date,
        };
        let mut messages = self.messages.write().await;
        messages.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> anyhow::Result<Vec<ScheduledMessage>> {
        let messages = self.messages.read().await;
        let mut all: Vec<_> = messages.values().cloned().collect();
        all.sort_by_key(|m| m.id);
        Ok(all)
    }

    async fn list_due(&self, date: &str, time: &str) -> anyhow::Result<Vec<ScheduledMessage>> {
        let messages = self.messages.read().await;
        let mut due: Vec<_> = messages
            .values()
            .filter(|m| m.date == date && m.time.as_str() <= time)
            .cloned()
            .collect();
        due.sort_by_key(|m| m.id);
        Ok(due)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        let mut messages = self.messages.write().await;
        messages.remove(&id);
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        let mut messages = self.messages.write().await;
        messages.clear();
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChatRepository {
    chats: Arc<RwLock<HashMap<i64, Chat>>>,
    next_id: AtomicI64,
}

impl InMemoryChatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl ChatRepository for InMemoryChatRepository {
    async fn add(&self, chat_id: i64) -> anyhow::Result<Chat> {
        let stored = Chat {
            id: self.next_id(),
            chat_id,
        };
        let mut chats = self.chats.write().await;
        chats.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> anyhow::Result<Vec<Chat>> {
        let chats = self.chats.read().await;
        let mut all: Vec<_> = chats.values().cloned().collect();
        all.sort_by_key(|c| c.id);
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_due_filter_compares_time_textually() {
        let repo = InMemoryMessageRepository::new();
        for (title, time) in [("early", "08:00"), ("exact", "09:30"), ("late", "10:00")] {
            repo.add(NewScheduledMessage {
                title: title.to_string(),
                text: String::new(),
                time: time.to_string(),
                date: "2025-03-01".to_string(),
            })
            .await
            .unwrap();
        }

        let due = repo.list_due("2025-03-01", "09:30").await.unwrap();
        let titles: Vec<_> = due.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "exact"]);
    }

    #[tokio::test]
    async fn test_registrations_keep_duplicates() {
        let repo = InMemoryChatRepository::new();
        repo.add(77).await.unwrap();
        repo.add(77).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 2);
    }
}
