use serde::{Deserialize, Serialize};

/// A destination chat registered for broadcasts.
///
/// Registrations are append-only: the same `chat_id` may appear more than
/// once, and every row gets its own delivery attempt at dispatch time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_id: i64,
}
