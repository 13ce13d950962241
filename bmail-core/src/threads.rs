use std::collections::HashMap;

use crate::model::{Email, Thread};

/// Group emails into threads.
///
/// Emails inside a thread are sorted ascending by timestamp and threads are
/// sorted by their latest message, newest first. Both sorts are stable, so
/// ties keep input order (emails) and first-seen order (threads).
pub fn group_threads(emails: &[Email]) -> Vec<Thread> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<Email>> = HashMap::new();

    for email in emails {
        let group = groups.entry(email.thread_id.as_str()).or_insert_with(|| {
            order.push(email.thread_id.as_str());
            Vec::new()
        });
        group.push(email.clone());
    }

    let mut threads: Vec<Thread> = order
        .into_iter()
        .filter_map(|thread_id| groups.remove(thread_id).map(|members| (thread_id, members)))
        .filter_map(|(thread_id, members)| build_thread(thread_id, members))
        .collect();

    threads.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
    threads
}

fn build_thread(thread_id: &str, mut emails: Vec<Email>) -> Option<Thread> {
    emails.sort_by_key(|e| e.timestamp);
    let latest = emails.last()?;

    let mut participants: Vec<String> = Vec::new();
    for email in emails.iter().rev() {
        if !participants.contains(&email.from.name) {
            participants.push(email.from.name.clone());
        }
    }

    Some(Thread {
        id: thread_id.to_string(),
        participants,
        subject: latest.subject.clone(),
        snippet: latest.snippet.clone(),
        last_message_time: latest.timestamp,
        is_starred: emails.iter().any(|e| e.is_starred),
        has_unread: emails.iter().any(|e| !e.is_read),
        message_count: emails.len(),
        emails,
    })
}

/// Derive a single thread without grouping the whole collection
pub fn find_thread(emails: &[Email], thread_id: &str) -> Option<Thread> {
    let members: Vec<Email> = emails
        .iter()
        .filter(|e| e.thread_id == thread_id)
        .cloned()
        .collect();
    build_thread(thread_id, members)
}

pub fn is_thread_starred(emails: &[Email], thread_id: &str) -> bool {
    emails
        .iter()
        .any(|e| e.thread_id == thread_id && e.is_starred)
}
