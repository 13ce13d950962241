//! Demo mailbox used by the in-process backend, the server and as the
//! fallback when the remote fetch fails.

use chrono::{DateTime, Duration, Utc};
use shared_types::Folder;

use crate::model::{Email, Sender};
use crate::transform::initials;

const OWNER: &str = "you@example.com";

fn ago(now: DateTime<Utc>, days: i64, hours: i64, minutes: i64) -> DateTime<Utc> {
    now - Duration::days(days) - Duration::hours(hours) - Duration::minutes(minutes)
}

struct Seed<'a> {
    id: &'a str,
    thread_id: &'a str,
    from: (&'a str, &'a str),
    to: &'a [&'a str],
    subject: &'a str,
    snippet: &'a str,
    body: &'a str,
    timestamp: DateTime<Utc>,
    is_starred: bool,
    is_read: bool,
    folder: Folder,
}

impl Seed<'_> {
    fn build(self) -> Email {
        Email {
            id: self.id.to_string(),
            thread_id: self.thread_id.to_string(),
            from: Sender {
                name: self.from.0.to_string(),
                address: self.from.1.to_string(),
                initials: initials(self.from.0),
            },
            to: self.to.iter().map(|s| s.to_string()).collect(),
            subject: self.subject.to_string(),
            snippet: self.snippet.to_string(),
            body: self.body.to_string(),
            timestamp: self.timestamp,
            is_starred: self.is_starred,
            is_read: self.is_read,
            folder: self.folder,
            labels: Vec::new(),
        }
    }
}

/// Eleven messages in nine threads: seven inbox threads, one spam, one trash
pub fn initial_emails(now: DateTime<Utc>) -> Vec<Email> {
    vec![
        Seed {
            id: "1",
            thread_id: "t1",
            from: ("BMail Team", "noreply@bmail.com"),
            to: &[OWNER],
            subject: "Welcome to BMail",
            snippet: "Welcome to BMail! Your account is all set up and ready to go. Start exploring our features.",
            body: "Welcome to BMail! Your account is all set up and ready to go. Start exploring our features.\n\nBest regards,\nThe BMail Team",
            timestamp: ago(now, 0, 5, 59),
            is_starred: true,
            is_read: true,
            folder: Folder::Inbox,
        },
        Seed {
            id: "2",
            thread_id: "t2",
            from: ("Lisa Wang", "lisa.wang@company.com"),
            to: &[OWNER, "david.kim@company.com"],
            subject: "Re: Project deadline reminder",
            snippet: "Hi team, just a reminder that our project deadline is this Friday. Please submit your final reports.",
            body: "Hi team, just a reminder that our project deadline is this Friday. Please submit your final reports.",
            timestamp: ago(now, 1, 0, -30),
            is_starred: false,
            is_read: false,
            folder: Folder::Inbox,
        },
        Seed {
            id: "3",
            thread_id: "t2",
            from: ("David Kim", "david.kim@company.com"),
            to: &["lisa.wang@company.com", OWNER],
            subject: "Re: Project deadline reminder",
            snippet: "Thanks Lisa! I'll have my section ready by Thursday afternoon.",
            body: "Thanks Lisa! I'll have my section ready by Thursday afternoon.",
            timestamp: ago(now, 0, 23, 10),
            is_starred: false,
            is_read: false,
            folder: Folder::Inbox,
        },
        Seed {
            id: "4",
            thread_id: "t3",
            from: ("Local Library", "newsletter@library.org"),
            to: &[OWNER],
            subject: "Monthly newsletter",
            snippet: "Check out our new arrivals and upcoming events this month at your local library.",
            body: "Check out our new arrivals and upcoming events this month at your local library.\n\nNew Books:\n- Fiction bestsellers\n- Science & Technology\n- Children's section\n\nUpcoming Events:\n- Book club meeting\n- Author signing\n- Story time for kids",
            timestamp: ago(now, 1, 0, 0),
            is_starred: false,
            is_read: true,
            folder: Folder::Inbox,
        },
        Seed {
            id: "5",
            thread_id: "t4",
            from: ("StreamingService", "noreply@streaming.com"),
            to: &[OWNER],
            subject: "Your subscription is expiring",
            snippet: "Your monthly subscription will expire in 3 days. Renew now to continue enjoying our content.",
            body: "Your monthly subscription will expire in 3 days. Renew now to continue enjoying our content.\n\nCurrent plan: Premium\nExpires: March 17, 2030\n\nRenew now to keep watching!",
            timestamp: ago(now, 1, 20, 14),
            is_starred: false,
            is_read: true,
            folder: Folder::Inbox,
        },
        Seed {
            id: "6",
            thread_id: "t5",
            from: ("Outdoor Club", "info@outdoorclub.org"),
            to: &[OWNER],
            subject: "Weekend hiking trip",
            snippet: "Join us this Saturday for a scenic hike at Blue Mountain Trail. All skill levels welcome!",
            body: "Join us this Saturday for a scenic hike at Blue Mountain Trail. All skill levels welcome!",
            timestamp: ago(now, 1, 22, 44),
            is_starred: true,
            is_read: false,
            folder: Folder::Inbox,
        },
        Seed {
            id: "7",
            thread_id: "t6",
            from: ("Emma Thompson", "emma.thompson@email.com"),
            to: &[OWNER],
            subject: "Re: Coffee catch-up?",
            snippet: "Hey! It's been ages since we last caught up. Want to grab coffee sometime this week?",
            body: "Hey! It's been ages since we last caught up. Want to grab coffee sometime this week?",
            timestamp: ago(now, 2, 4, 0),
            is_starred: false,
            is_read: true,
            folder: Folder::Inbox,
        },
        Seed {
            id: "8",
            thread_id: "t6",
            from: ("You", OWNER),
            to: &["emma.thompson@email.com"],
            subject: "Re: Coffee catch-up?",
            snippet: "Absolutely! I'd love to catch up. How about Thursday afternoon around 3 PM? There's a nice new cafe on 5th Street called Brew & Beans.",
            body: "Absolutely! I'd love to catch up. How about Thursday afternoon around 3 PM? There's a nice new cafe on 5th Street called Brew & Beans.",
            timestamp: ago(now, 2, 2, 0),
            is_starred: false,
            is_read: true,
            folder: Folder::Inbox,
        },
        Seed {
            id: "9",
            thread_id: "t7",
            from: ("IT Department", "it@company.com"),
            to: &["all@company.com"],
            subject: "Important: Security update",
            snippet: "Please update your password before the end of the week as part of our security policy.",
            body: "Please update your password before the end of the week as part of our security policy.",
            timestamp: ago(now, 2, 4, 0),
            is_starred: false,
            is_read: true,
            folder: Folder::Inbox,
        },
        Seed {
            id: "10",
            thread_id: "t8",
            from: ("Deals4U", "no-reply@deals4u.biz"),
            to: &[OWNER],
            subject: "Free iPhone 15 - Act Now!",
            snippet: "You've been selected to receive a FREE iPhone 15! Just pay shipping. Limited time offer!!!",
            body: "You've been selected to receive a FREE iPhone 15! Just pay shipping. Limited time offer!!!",
            timestamp: ago(now, 1, 16, 59),
            is_starred: false,
            is_read: false,
            folder: Folder::Spam,
        },
        Seed {
            id: "11",
            thread_id: "t9",
            from: ("John Qian", "john@gmail.com"),
            to: &["Sam Parker"],
            subject: "Re: Lunch tomorrow?",
            snippet: "Sure! How about that new sushi place on Main Street?",
            body: "Sure! How about that new sushi place on Main Street?",
            timestamp: ago(now, 2, 0, 0),
            is_starred: false,
            is_read: true,
            folder: Folder::Trash,
        },
    ]
    .into_iter()
    .map(Seed::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::folder_count;
    use crate::threads::group_threads;
    use crate::time::frozen_time;
    use shared_types::FolderSelector;

    #[test]
    fn test_seed_shape() {
        let emails = initial_emails(frozen_time());
        assert_eq!(emails.len(), 11);

        let threads = group_threads(&emails);
        assert_eq!(threads.len(), 9);
        assert_eq!(threads[0].id, "t1");

        assert_eq!(folder_count(&emails, FolderSelector::Inbox), Some(7));
        assert_eq!(folder_count(&emails, FolderSelector::Spam), Some(1));
    }

    #[test]
    fn test_seed_is_relative_to_clock() {
        let now = frozen_time();
        let emails = initial_emails(now);
        assert!(emails.iter().all(|e| e.timestamp < now));
        assert_eq!(emails[0].from.initials, "BT");
    }
}
