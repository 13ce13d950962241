use shared_types::{Folder, FolderSelector, MailSettings};

use crate::model::Email;

/// Flat collection of emails. Source of truth for every derived view.
///
/// `version` increases on every write so readers can tell whether a
/// derivation they hold is still current.
#[derive(Debug, Clone, Default)]
pub struct EmailStore {
    emails: Vec<Email>,
    version: u64,
}

impl EmailStore {
    pub fn new(emails: Vec<Email>) -> Self {
        Self { emails, version: 0 }
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn get(&self, email_id: &str) -> Option<&Email> {
        self.emails.iter().find(|e| e.id == email_id)
    }

    /// Emails matching a selector, judged one email at a time
    pub fn by_selector(&self, selector: FolderSelector, settings: &MailSettings) -> Vec<Email> {
        crate::filter::visible_emails(&self.emails, selector, settings)
    }

    /// Swap the whole collection, e.g. after a fetch
    pub fn replace_all(&mut self, emails: Vec<Email>) {
        self.emails = emails;
        self.version += 1;
    }

    /// Replace the stored copy of `email` by id. Returns false if it is unknown.
    pub fn replace(&mut self, email: Email) -> bool {
        match self.emails.iter_mut().find(|e| e.id == email.id) {
            Some(slot) => {
                *slot = email;
                self.version += 1;
                true
            }
            None => false,
        }
    }

    fn update<F>(&mut self, email_id: &str, apply: F) -> Option<Email>
    where
        F: FnOnce(&mut Email),
    {
        let email = self.emails.iter_mut().find(|e| e.id == email_id)?;
        apply(email);
        self.version += 1;
        Some(email.clone())
    }

    pub fn set_starred(&mut self, email_id: &str, is_starred: bool) -> Option<Email> {
        self.update(email_id, |e| e.is_starred = is_starred)
    }

    pub fn set_read(&mut self, email_id: &str, is_read: bool) -> Option<Email> {
        self.update(email_id, |e| e.is_read = is_read)
    }

    /// Moving to trash clears the star when `remove_star_on_trash` is set.
    /// Any other move leaves the star alone.
    pub fn move_to(
        &mut self,
        email_id: &str,
        folder: Folder,
        remove_star_on_trash: bool,
    ) -> Option<Email> {
        self.update(email_id, |e| {
            e.folder = folder;
            if folder == Folder::Trash && remove_star_on_trash {
                e.is_starred = false;
            }
        })
    }
}
