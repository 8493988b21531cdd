use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    application::services::{BroadcastTransport, Clock},
    domain::{
        models::ScheduledMessage,
        repositories::{ChatRepository, MessageRepository},
    },
};

/// Selects messages whose scheduled moment has arrived.
pub struct DueMatcher {
    messages: Arc<dyn MessageRepository>,
}

impl DueMatcher {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    /// Everything scheduled for the day of `now` whose time has passed.
    ///
    /// Matching is strict on the date: a message that slept through
    /// midnight is never picked up again. Within the day a missed tick is
    /// caught up by the next one, since `time <= now` keeps matching until
    /// the message is retired.
    pub async fn due_at(&self, now: NaiveDateTime) -> anyhow::Result<Vec<ScheduledMessage>> {
        let date = now.format("%Y-%m-%d").to_string();
        let time = now.format("%H:%M").to_string();
        self.messages.list_due(&date, &time).await
    }
}

#[derive(Debug)]
pub struct DeliveryFailure {
    pub chat_id: i64,
    pub reason: String,
}

#[derive(Debug)]
pub struct MessageReport {
    pub message_id: i64,
    pub title: String,
    pub attempted: usize,
    pub failures: Vec<DeliveryFailure>,
}

/// Outcome of one dispatch batch, one entry per retired message.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub messages: Vec<MessageReport>,
}

impl BatchReport {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.messages.iter().map(|m| m.attempted).sum()
    }

    pub fn failed(&self) -> usize {
        self.messages.iter().map(|m| m.failures.len()).sum()
    }
}

/// Fans due messages out to every registered chat, then retires them.
pub struct BroadcastDispatcher {
    matcher: DueMatcher,
    messages: Arc<dyn MessageRepository>,
    chats: Arc<dyn ChatRepository>,
    transport: Arc<dyn BroadcastTransport>,
    clock: Arc<dyn Clock>,
}

impl BroadcastDispatcher {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        chats: Arc<dyn ChatRepository>,
        transport: Arc<dyn BroadcastTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            matcher: DueMatcher::new(messages.clone()),
            messages,
            chats,
            transport,
            clock,
        }
    }

    /// One batch: match, fan out, retire.
    ///
    /// The chat registry is snapshotted once at batch start. A failed
    /// destination is recorded and skipped, never escalated or retried.
    /// Each message is deleted after all destinations were attempted,
    /// whatever the outcomes, so delivery is at most once per message.
    /// Only a repository failure aborts the batch.
    pub async fn run_tick(&self) -> anyhow::Result<BatchReport> {
        let due = self.matcher.due_at(self.clock.now()).await?;
        let mut report = BatchReport::default();
        if due.is_empty() {
            return Ok(report);
        }

        let chats = self.chats.list().await?;
        for message in due {
            let mut failures = Vec::new();
            for chat in &chats {
                if let Err(err) = self.transport.send(chat.chat_id, &message.text).await {
                    tracing::warn!(
                        chat_id = chat.chat_id,
                        message_id = message.id,
                        error = %err,
                        "failed to deliver broadcast"
                    );
                    failures.push(DeliveryFailure {
                        chat_id: chat.chat_id,
                        reason: err.to_string(),
                    });
                }
            }
            self.messages.delete(message.id).await?;
            report.messages.push(MessageReport {
                message_id: message.id,
                title: message.title,
                attempted: chats.len(),
                failures,
            });
        }
        Ok(report)
    }
}
