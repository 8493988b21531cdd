use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Sqlite};

use crate::domain::{
    models::{Chat, NewScheduledMessage, ScheduledMessage},
    repositories::{ChatRepository, MessageRepository},
};

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    pub fn new(pool: SqlitePool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn add(&self, message: NewScheduledMessage) -> anyhow::Result<ScheduledMessage> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (title, text, time, date)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, text, time, date
            "#,
        )
        .bind(&message.title)
        .bind(&message.text)
        .bind(&message.time)
        .bind(&message.date)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn list(&self) -> anyhow::Result<Vec<ScheduledMessage>> {
        let rows = sqlx::query_as::<_, MessageRecord>(
            r#"SELECT id, title, text, time, date FROM messages ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ScheduledMessage::from).collect())
    }

    async fn list_due(&self, date: &str, time: &str) -> anyhow::Result<Vec<ScheduledMessage>> {
        // The stored forms sort chronologically, so `time <= ?` is the
        // "already passed" check.
        let rows = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, title, text, time, date
            FROM messages
            WHERE date = ? AND time <= ?
            ORDER BY id
            "#,
        )
        .bind(date)
        .bind(time)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ScheduledMessage::from).collect())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM messages WHERE id = ?"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_all(&self) -> anyhow::Result<()> {
        sqlx::query(r#"DELETE FROM messages"#)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct SqliteChatRepository {
    pool: SqlitePool,
}

impl SqliteChatRepository {
    pub fn new(pool: SqlitePool) -> Arc<Self> {
        Arc::new(Self { pool })
    }
}

#[async_trait]
impl ChatRepository for SqliteChatRepository {
    async fn add(&self, chat_id: i64) -> anyhow::Result<Chat> {
        let record = sqlx::query_as::<_, ChatRecord>(
            r#"
            INSERT INTO chats (chat_id)
            VALUES (?)
            RETURNING id, chat_id
            "#,
        )
        .bind(chat_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(record.into())
    }

    async fn list(&self) -> anyhow::Result<Vec<Chat>> {
        let rows =
            sqlx::query_as::<_, ChatRecord>(r#"SELECT id, chat_id FROM chats ORDER BY id"#)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(Chat::from).collect())
    }
}

#[derive(FromRow)]
struct MessageRecord {
    id: i64,
    title: String,
    text: String,
    time: String,
    date: String,
}

impl From<MessageRecord> for ScheduledMessage {
    fn from(value: MessageRecord) -> Self {
        Self {
            id: value.id,
            title: value.title,
            text: value.text,
            time: value.time,
            date: value.date,
        }
    }
}

#[derive(FromRow)]
struct ChatRecord {
    id: i64,
    chat_id: i64,
}

impl From<ChatRecord> for Chat {
    fn from(value: ChatRecord) -> Self {
        Self {
            id: value.id,
            chat_id: value.chat_id,
        }
    }
}
