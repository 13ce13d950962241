//! Presentation rules shared by every front end: participant labels,
//! recipient names, search highlighting and reading-pane defaults.

use std::collections::HashSet;

use regex::RegexBuilder;
use shared_types::{AccountOwner, FolderSelector};

use crate::model::Thread;

const YOU: &str = "you";

/// Label for the participants column of the thread list.
pub fn format_participants(thread: &Thread, selector: FolderSelector, owner: &AccountOwner) -> String {
    let Some(latest) = thread.latest_email() else {
        return String::new();
    };
    let sent_by_owner = owner.is_owner(&latest.from.name, &latest.from.address);

    if thread.emails.len() == 1 {
        // Trash lists who the message went to
        if selector == FolderSelector::Trash {
            let mut labels: Vec<String> = latest
                .to
                .iter()
                .map(|to| recipient_label(to, owner))
                .collect();
            if sent_by_owner {
                labels.push(YOU.to_string());
            }
            return labels.join(", ");
        }

        if sent_by_owner {
            return owner.name.clone();
        }
        return format!("{}, {}", latest.from.name, YOU);
    }

    let owner_names: HashSet<&str> = thread
        .emails
        .iter()
        .filter(|e| owner.is_owner(&e.from.name, &e.from.address))
        .map(|e| e.from.name.as_str())
        .chain(std::iter::once(owner.name.as_str()))
        .collect();

    let senders: Vec<&str> = thread
        .participants
        .iter()
        .map(String::as_str)
        .filter(|name| !owner_names.contains(name))
        .collect();

    // The owner takes part in every conversation
    format!("{}, {}", senders.join(", "), YOU)
}

fn split_address(recipient: &str) -> Option<&str> {
    recipient.split_once('@').map(|(local, _)| local)
}

fn is_owner_recipient(recipient: &str, owner: &AccountOwner) -> bool {
    recipient.eq_ignore_ascii_case(&owner.address)
        || split_address(recipient).is_some_and(|local| owner.is_alias(local))
}

/// Compact recipient label: "you" for the owner, the local part for other
/// addresses, bare display names unchanged.
pub fn recipient_label(recipient: &str, owner: &AccountOwner) -> String {
    if is_owner_recipient(recipient, owner) {
        return YOU.to_string();
    }
    match split_address(recipient) {
        Some(local) => local.to_string(),
        None => recipient.to_string(),
    }
}

/// Best-effort name for the reading pane "to" line.
/// `david.kim@company.com` reads as "David Kim"; anything else is left as is.
pub fn recipient_display_name(recipient: &str, owner: &AccountOwner) -> String {
    if is_owner_recipient(recipient, owner) {
        return YOU.to_string();
    }
    let Some(local) = split_address(recipient) else {
        return recipient.to_string();
    };
    if !local.contains('.') {
        return local.to_string();
    }
    local
        .split('.')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

/// Split `text` into segments, marking case-insensitive matches of `term`
pub fn highlight(text: &str, term: &str) -> Vec<Segment> {
    let term = term.trim();
    let whole = || {
        if text.is_empty() {
            Vec::new()
        } else {
            vec![Segment {
                text: text.to_string(),
                matched: false,
            }]
        }
    };
    if term.is_empty() {
        return whole();
    }

    let pattern = match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern,
        Err(e) => {
            tracing::warn!("Failed to build highlight pattern for {:?}: {}", term, e);
            return whole();
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for found in pattern.find_iter(text) {
        if found.start() > cursor {
            segments.push(Segment {
                text: text[cursor..found.start()].to_string(),
                matched: false,
            });
        }
        segments.push(Segment {
            text: found.as_str().to_string(),
            matched: true,
        });
        cursor = found.end();
    }
    if cursor < text.len() {
        segments.push(Segment {
            text: text[cursor..].to_string(),
            matched: false,
        });
    }
    segments
}

/// Actions offered by the reading pane toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadAction {
    ReportSpam,
    NotSpam,
    Delete,
    MoveToInbox,
}

pub fn thread_actions(selector: FolderSelector) -> Vec<ThreadAction> {
    match selector {
        FolderSelector::Spam => vec![ThreadAction::NotSpam],
        // No spam button in trash
        FolderSelector::Trash => vec![ThreadAction::MoveToInbox],
        FolderSelector::Inbox | FolderSelector::Starred | FolderSelector::All => {
            vec![ThreadAction::ReportSpam, ThreadAction::Delete]
        }
    }
}

/// Emails expanded when a thread opens: only the latest one
pub fn default_expanded(thread: &Thread) -> HashSet<String> {
    thread
        .latest_email()
        .map(|e| e.id.clone())
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{email, from};
    use crate::threads::group_threads;

    fn owner() -> AccountOwner {
        AccountOwner::default()
    }

    fn single(to: &[&str], sender: (&str, &str)) -> Thread {
        let mut message = from(email("1", "t", 9), sender.0, sender.1);
        message.to = to.iter().map(|s| s.to_string()).collect();
        group_threads(&[message]).remove(0)
    }

    #[test]
    fn test_trash_single_email_lists_recipients() {
        let thread = single(&["Sam Parker"], ("John Qian", "john@gmail.com"));
        assert_eq!(
            format_participants(&thread, FolderSelector::Trash, &owner()),
            "Sam Parker"
        );

        let thread = single(
            &["you@example.com", "all@company.com", "Lisa.Wang@company.com"],
            ("You", "you@example.com"),
        );
        assert_eq!(
            format_participants(&thread, FolderSelector::Trash, &owner()),
            "you, you, Lisa.Wang, you"
        );
    }

    #[test]
    fn test_single_email_outside_trash() {
        let thread = single(&["you@example.com"], ("BMail Team", "noreply@bmail.com"));
        assert_eq!(
            format_participants(&thread, FolderSelector::Inbox, &owner()),
            "BMail Team, you"
        );

        let thread = single(&["emma.thompson@email.com"], ("You", "you@example.com"));
        assert_eq!(format_participants(&thread, FolderSelector::All, &owner()), "You");
    }

    #[test]
    fn test_multi_email_thread_lists_senders_latest_first() {
        let emails = vec![
            from(email("1", "t", 9), "Lisa Wang", "lisa.wang@company.com"),
            from(email("2", "t", 10), "You", "you@example.com"),
            from(email("3", "t", 11), "David Kim", "david.kim@company.com"),
            from(email("4", "t", 12), "Lisa Wang", "lisa.wang@company.com"),
        ];
        let thread = group_threads(&emails).remove(0);

        assert_eq!(
            format_participants(&thread, FolderSelector::Inbox, &owner()),
            "Lisa Wang, David Kim, you"
        );
        // Multi-email threads ignore the trash recipient rule
        assert_eq!(
            format_participants(&thread, FolderSelector::Trash, &owner()),
            "Lisa Wang, David Kim, you"
        );
    }

    #[test]
    fn test_multi_email_thread_excludes_owner_by_address() {
        let emails = vec![
            from(email("1", "t", 9), "Emma Thompson", "emma.thompson@email.com"),
            from(email("2", "t", 10), "Me Myself", "you@example.com"),
        ];
        let thread = group_threads(&emails).remove(0);

        assert_eq!(
            format_participants(&thread, FolderSelector::Inbox, &owner()),
            "Emma Thompson, you"
        );
    }

    #[test]
    fn test_recipient_names() {
        let owner = owner();
        assert_eq!(recipient_display_name("david.kim@company.com", &owner), "David Kim");
        assert_eq!(recipient_display_name("you@example.com", &owner), "you");
        assert_eq!(recipient_display_name("all@company.com", &owner), "you");
        assert_eq!(recipient_display_name("newsletter@library.org", &owner), "newsletter");
        assert_eq!(recipient_display_name("Sam Parker", &owner), "Sam Parker");

        assert_eq!(recipient_label("Lisa.Wang@company.com", &owner), "Lisa.Wang");
        assert_eq!(recipient_label("YOU@example.com", &owner), "you");
    }

    #[test]
    fn test_highlight() {
        let segments = highlight("Coffee and more coffee", "COFFEE ");
        assert_eq!(
            segments,
            vec![
                Segment { text: "Coffee".to_string(), matched: true },
                Segment { text: " and more ".to_string(), matched: false },
                Segment { text: "coffee".to_string(), matched: true },
            ]
        );

        let segments = highlight("Price: $5 (sale)", "$5 (");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "$5 (");
        assert!(segments[1].matched);

        assert_eq!(highlight("text", "  ").len(), 1);
        assert!(!highlight("text", "")[0].matched);
        assert!(highlight("", "x").is_empty());
    }

    #[test]
    fn test_thread_actions() {
        assert_eq!(thread_actions(FolderSelector::Spam), vec![ThreadAction::NotSpam]);
        assert_eq!(thread_actions(FolderSelector::Trash), vec![ThreadAction::MoveToInbox]);
        assert_eq!(
            thread_actions(FolderSelector::Starred),
            vec![ThreadAction::ReportSpam, ThreadAction::Delete]
        );
    }

    #[test]
    fn test_default_expanded_is_latest_email() {
        let thread = group_threads(&[email("a", "t", 9), email("b", "t", 10)]).remove(0);
        let expanded = default_expanded(&thread);
        assert_eq!(expanded.len(), 1);
        assert!(expanded.contains("b"));
    }
}
