use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::Folder;

/// Sender of an email. `initials` is derived from `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sender {
    pub name: String,
    pub address: String,
    pub initials: String,
}

/// Email record as the client works with it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub thread_id: String,
    pub from: Sender,
    pub to: Vec<String>,
    pub subject: String,
    pub snippet: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub is_starred: bool,
    pub is_read: bool,
    pub folder: Folder,
    pub labels: Vec<String>,
}

/// Conversation derived from all emails sharing a thread id.
/// Rebuilt from the store on every read, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    /// Ascending by timestamp
    pub emails: Vec<Email>,
    /// Distinct sender names, most recent sender first
    pub participants: Vec<String>,
    pub subject: String,
    pub snippet: String,
    pub last_message_time: DateTime<Utc>,
    pub is_starred: bool,
    pub has_unread: bool,
    pub message_count: usize,
}

impl Thread {
    pub fn first_email(&self) -> Option<&Email> {
        self.emails.first()
    }

    pub fn latest_email(&self) -> Option<&Email> {
        self.emails.last()
    }
}
