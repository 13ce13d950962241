//! Conversion between the API representation and the domain model.
//!
//! Initials only exist on the domain side; timestamps travel as ISO-8601
//! strings and are always written back in UTC with millisecond precision.

use chrono::{DateTime, SecondsFormat, Utc};
use shared_types::{ApiEmail, ApiSender, ApiThread};

use crate::error::Result;
use crate::model::{Email, Sender, Thread};

/// Up to two upper-cased initials, one per whitespace-separated word
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(|c| c.to_uppercase())
        .take(2)
        .collect()
}

pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn email_to_domain(api_email: &ApiEmail) -> Result<Email> {
    Ok(Email {
        id: api_email.id.clone(),
        thread_id: api_email.thread_id.clone(),
        from: Sender {
            name: api_email.from.name.clone(),
            address: api_email.from.email.clone(),
            initials: initials(&api_email.from.name),
        },
        to: api_email.to.clone(),
        subject: api_email.subject.clone(),
        snippet: api_email.snippet.clone(),
        body: api_email.body.clone(),
        timestamp: parse_timestamp(&api_email.timestamp)?,
        is_starred: api_email.is_starred,
        is_read: api_email.is_read,
        folder: api_email.folder,
        labels: api_email.labels.clone(),
    })
}

pub fn email_to_wire(email: &Email) -> ApiEmail {
    ApiEmail {
        id: email.id.clone(),
        thread_id: email.thread_id.clone(),
        from: ApiSender {
            name: email.from.name.clone(),
            email: email.from.address.clone(),
        },
        to: email.to.clone(),
        subject: email.subject.clone(),
        snippet: email.snippet.clone(),
        body: email.body.clone(),
        timestamp: format_timestamp(&email.timestamp),
        is_starred: email.is_starred,
        is_read: email.is_read,
        folder: email.folder,
        labels: email.labels.clone(),
    }
}

/// Attach already-transformed member emails to an API thread summary
pub fn thread_to_domain(api_thread: ApiThread, emails: Vec<Email>) -> Result<Thread> {
    Ok(Thread {
        last_message_time: parse_timestamp(&api_thread.last_message_time)?,
        id: api_thread.id,
        emails,
        participants: api_thread.participants,
        subject: api_thread.subject,
        snippet: api_thread.snippet,
        is_starred: api_thread.is_starred,
        has_unread: api_thread.has_unread,
        message_count: api_thread.message_count,
    })
}

pub fn thread_to_wire(thread: &Thread) -> ApiThread {
    ApiThread {
        id: thread.id.clone(),
        email_ids: thread.emails.iter().map(|e| e.id.clone()).collect(),
        participants: thread.participants.clone(),
        subject: thread.subject.clone(),
        snippet: thread.snippet.clone(),
        last_message_time: format_timestamp(&thread.last_message_time),
        is_starred: thread.is_starred,
        has_unread: thread.has_unread,
        message_count: thread.message_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailError;
    use chrono::TimeZone;
    use shared_types::Folder;

    fn api_email() -> ApiEmail {
        ApiEmail {
            id: "email-1".to_string(),
            thread_id: "thread-1".to_string(),
            from: ApiSender {
                name: "John Doe".to_string(),
                email: "john@example.com".to_string(),
            },
            to: vec!["jane@example.com".to_string(), "bob@example.com".to_string()],
            subject: "Test Subject".to_string(),
            snippet: "Test snippet...".to_string(),
            body: "Full email body content".to_string(),
            timestamp: "2030-03-14T10:30:00.000Z".to_string(),
            is_starred: true,
            is_read: false,
            folder: Folder::Inbox,
            labels: vec!["important".to_string(), "work".to_string()],
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Mary Jane Watson"), "MJ");
        assert_eq!(initials("Alice"), "A");
        assert_eq!(initials(""), "");
        assert_eq!(initials("  john   doe "), "JD");
        assert_eq!(initials("émile zola"), "ÉZ");
    }

    #[test]
    fn test_email_to_domain() {
        let email = email_to_domain(&api_email()).unwrap();

        assert_eq!(email.id, "email-1");
        assert_eq!(email.from.initials, "JD");
        assert_eq!(email.from.address, "john@example.com");
        assert_eq!(
            email.timestamp,
            Utc.with_ymd_and_hms(2030, 3, 14, 10, 30, 0).unwrap()
        );
        assert_eq!(email.labels, vec!["important", "work"]);
        assert!(email.is_starred);
        assert!(!email.is_read);
    }

    #[test]
    fn test_offset_timestamps_normalize_to_utc() {
        let mut wire = api_email();
        wire.timestamp = "2030-03-14T12:30:00+02:00".to_string();

        let email = email_to_domain(&wire).unwrap();
        assert_eq!(email_to_wire(&email).timestamp, "2030-03-14T10:30:00.000Z");
    }

    #[test]
    fn test_malformed_timestamp_is_an_error() {
        let mut wire = api_email();
        wire.timestamp = "yesterday".to_string();

        match email_to_domain(&wire) {
            Err(MailError::Timestamp(_)) => {}
            other => panic!("Expected timestamp error, got {:?}", other),
        }
    }

    #[test]
    fn test_wire_round_trip() {
        let wire = api_email();
        let back = email_to_wire(&email_to_domain(&wire).unwrap());
        assert_eq!(back, wire);
    }

    #[test]
    fn test_thread_round_trip() {
        let email = email_to_domain(&api_email()).unwrap();
        let api_thread = ApiThread {
            id: "thread-1".to_string(),
            email_ids: vec!["email-1".to_string()],
            participants: vec!["John Doe".to_string()],
            subject: "Test Subject".to_string(),
            snippet: "Test snippet...".to_string(),
            last_message_time: "2030-03-14T10:30:00.000Z".to_string(),
            is_starred: true,
            has_unread: true,
            message_count: 1,
        };

        let thread = thread_to_domain(api_thread.clone(), vec![email]).unwrap();
        assert_eq!(thread.emails.len(), 1);
        assert_eq!(thread.last_message_time, thread.emails[0].timestamp);
        assert_eq!(thread_to_wire(&thread), api_thread);
    }
}
