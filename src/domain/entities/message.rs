use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message. Immutable once constructed; identity is the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

impl Message {
    pub fn new(
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: fresh_id(),
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            content: content.into(),
            timestamp: Utc::now(),
            read: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn mark_read(mut self) -> Self {
        self.read = true;
        self
    }
}

/// Session-unique message id: millisecond timestamp plus a random suffix
fn fresh_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("msg-{}-{}", Utc::now().timestamp_millis(), &suffix[..12])
}
