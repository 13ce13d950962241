//! Folder visibility, free-text search and sidebar counts.

use std::collections::HashSet;

use shared_types::{Folder, FolderInfo, FolderSelector, MailSettings};

use crate::model::{Email, Thread};

fn all_mail_includes(folder: Folder, settings: &MailSettings) -> bool {
    match folder {
        Folder::Inbox => true,
        Folder::Spam => settings.show_spam_in_all_mail,
        Folder::Trash => false,
    }
}

/// Whether a single email belongs to the selected folder view
pub fn email_in_folder(email: &Email, selector: FolderSelector, settings: &MailSettings) -> bool {
    match selector {
        FolderSelector::Starred => email.is_starred,
        FolderSelector::All => all_mail_includes(email.folder, settings),
        FolderSelector::Inbox | FolderSelector::Spam | FolderSelector::Trash => {
            selector.storage_folder() == Some(email.folder)
        }
    }
}

/// A thread shows in a folder when any member email is stored there.
/// The starred view uses the thread-level star instead.
pub fn thread_in_folder(thread: &Thread, selector: FolderSelector, settings: &MailSettings) -> bool {
    match selector {
        FolderSelector::Starred => thread.is_starred,
        _ => thread
            .emails
            .iter()
            .any(|e| email_in_folder(e, selector, settings)),
    }
}

pub fn visible_emails(
    emails: &[Email],
    selector: FolderSelector,
    settings: &MailSettings,
) -> Vec<Email> {
    emails
        .iter()
        .filter(|e| email_in_folder(e, selector, settings))
        .cloned()
        .collect()
}

/// Case-insensitive match against subject, snippet, senders and recipients.
/// A blank term matches everything.
pub fn matches_search(thread: &Thread, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(&thread.subject)
        || contains(&thread.snippet)
        || thread.emails.iter().any(|email| {
            contains(&email.from.name)
                || contains(&email.from.address)
                || email.to.iter().any(|to| contains(to))
        })
}

/// Threads to list for a folder and optional search term, order preserved
pub fn filter_threads(
    threads: &[Thread],
    selector: FolderSelector,
    search: Option<&str>,
    settings: &MailSettings,
) -> Vec<Thread> {
    threads
        .iter()
        .filter(|t| thread_in_folder(t, selector, settings))
        .filter(|t| search.map_or(true, |term| matches_search(t, term)))
        .cloned()
        .collect()
}

/// Inbox counts conversations, spam counts messages, other folders show no count
pub fn folder_count(emails: &[Email], selector: FolderSelector) -> Option<usize> {
    match selector {
        FolderSelector::Inbox => {
            let threads: HashSet<&str> = emails
                .iter()
                .filter(|e| e.folder == Folder::Inbox)
                .map(|e| e.thread_id.as_str())
                .collect();
            Some(threads.len())
        }
        FolderSelector::Spam => Some(emails.iter().filter(|e| e.folder == Folder::Spam).count()),
        FolderSelector::Starred | FolderSelector::All | FolderSelector::Trash => None,
    }
}

pub fn folder_infos(emails: &[Email]) -> Vec<FolderInfo> {
    FolderSelector::ALL
        .iter()
        .map(|&selector| FolderInfo {
            id: selector,
            name: selector.display_name().to_string(),
            count: folder_count(emails, selector),
        })
        .collect()
}
