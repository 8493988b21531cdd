use serde::{Deserialize, Serialize};

/// A broadcast waiting for its scheduled moment.
///
/// `time` is `HH:MM` and `date` is `YYYY-MM-DD`; both forms sort
/// lexicographically in chronological order, which due-matching relies on.
/// A message is deleted after its dispatch attempt and never updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledMessage {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub time: String,
    pub date: String,
}

/// Fields collected by the composition dialogue, ready to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScheduledMessage {
    pub title: String,
    pub text: String,
    pub time: String,
    pub date: String,
}
