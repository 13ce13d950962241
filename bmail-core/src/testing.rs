//! Builders shared by unit tests

use chrono::{DateTime, TimeZone, Utc};
use shared_types::Folder;

use crate::model::{Email, Sender};
use crate::transform::initials;

pub fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 3, 14, hour, minute, 0).unwrap()
}

pub fn sender(name: &str, address: &str) -> Sender {
    Sender {
        name: name.to_string(),
        address: address.to_string(),
        initials: initials(name),
    }
}

/// A read, unstarred inbox email sent at `hour`:00 on 2030-03-14
pub fn email(id: &str, thread_id: &str, hour: u32) -> Email {
    Email {
        id: id.to_string(),
        thread_id: thread_id.to_string(),
        from: sender("Lisa Wang", "lisa.wang@company.com"),
        to: vec!["you@example.com".to_string()],
        subject: format!("Subject {}", id),
        snippet: format!("Snippet {}", id),
        body: format!("Body {}", id),
        timestamp: at(hour, 0),
        is_starred: false,
        is_read: true,
        folder: Folder::Inbox,
        labels: vec![],
    }
}

pub fn in_folder(mut email: Email, folder: Folder) -> Email {
    email.folder = folder;
    email
}

pub fn from(mut email: Email, name: &str, address: &str) -> Email {
    email.from = sender(name, address);
    email
}
