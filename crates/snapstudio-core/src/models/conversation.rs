//! Conversation inbox records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Channel the last message arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Phone,
    Chat,
}

/// Triage priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A conversation thread with a contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub contact_name: String,
    pub contact_initials: String,
    pub contact_avatar: Option<String>,
    pub last_message_content: String,
    pub last_message_timestamp: DateTime<Utc>,
    pub last_message_channel: Channel,
    pub unread_count: u32,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn has_unread(&self) -> bool {
        self.unread_count > 0
    }
}
