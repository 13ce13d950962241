//! Writes against a backend, mirrored into the local store.
//!
//! Every operation looks its target up in the local store first. Unknown ids
//! are a no-op. A backend failure leaves the local copy untouched; batch
//! operations apply whatever succeeded and report the rest without rollback.

use std::sync::Arc;

use futures::future::join_all;
use shared_types::{Folder, FolderSelector, MailSettings, MoveEmailRequest};
use tracing::{debug, info, warn};

use crate::backend::EmailBackend;
use crate::error::{MailError, Result};
use crate::model::Email;
use crate::store::EmailStore;
use crate::threads::{find_thread, is_thread_starred};

/// What the caller is currently looking at
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub folder: FolderSelector,
    pub open_thread_id: Option<&'a str>,
}

/// Instruction for the view layer produced by a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSignal {
    CloseThread,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarOutcome {
    pub email: Email,
    pub signal: Option<ViewSignal>,
}

/// Result of a multi-email operation. Successful writes are already applied
/// to the local store when this is returned.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub updated: Vec<Email>,
    pub failed: Vec<(String, MailError)>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.failed.is_empty()
    }
}

pub struct MutationEngine {
    store: EmailStore,
    backend: Arc<dyn EmailBackend>,
    settings: MailSettings,
}

impl MutationEngine {
    pub fn new(backend: Arc<dyn EmailBackend>, settings: MailSettings) -> Self {
        Self {
            store: EmailStore::default(),
            backend,
            settings,
        }
    }

    pub fn store(&self) -> &EmailStore {
        &self.store
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// Replace the local copy with whatever the backend holds now
    pub async fn refresh(&mut self) -> Result<usize> {
        let emails = self.backend.fetch_emails().await?;
        let count = emails.len();
        self.store.replace_all(emails);
        Ok(count)
    }

    /// Install a snapshot obtained elsewhere, e.g. the seed dataset
    pub fn load_snapshot(&mut self, emails: Vec<Email>) {
        self.store.replace_all(emails);
    }

    fn knows(&self, email_id: &str) -> bool {
        if self.store.get(email_id).is_some() {
            return true;
        }
        debug!("Ignoring mutation for unknown email {}", email_id);
        false
    }

    fn apply(&mut self, email: Email) -> Email {
        self.store.replace(email.clone());
        email
    }

    pub async fn toggle_star(
        &mut self,
        email_id: &str,
        is_starred: bool,
        view: &ViewContext<'_>,
    ) -> Result<Option<StarOutcome>> {
        if !self.knows(email_id) {
            return Ok(None);
        }

        let updated = match self.backend.set_starred(email_id, is_starred).await {
            Ok(email) => self.apply(email),
            Err(e) => {
                warn!("Failed to set star on email {}: {}", email_id, e);
                return Err(e);
            }
        };

        let closes_open_thread = !is_starred
            && self.settings.close_thread_when_unstarred_in_starred_view
            && view.folder == FolderSelector::Starred
            && view.open_thread_id == Some(updated.thread_id.as_str())
            && !is_thread_starred(self.store.emails(), &updated.thread_id);

        Ok(Some(StarOutcome {
            email: updated,
            signal: closes_open_thread.then_some(ViewSignal::CloseThread),
        }))
    }

    /// Star an unstarred thread through a single member, or clear every star
    /// on a starred one.
    pub async fn toggle_thread_star(&mut self, thread_id: &str) -> BatchOutcome {
        let Some(thread) = find_thread(self.store.emails(), thread_id) else {
            debug!("Ignoring star toggle for unknown thread {}", thread_id);
            return BatchOutcome::default();
        };

        if !thread.is_starred {
            let target = if self.settings.star_first_email_on_thread_star {
                thread.first_email()
            } else {
                thread.latest_email()
            };
            let ids: Vec<String> = target.map(|e| e.id.clone()).into_iter().collect();
            return self.star_batch(ids, true).await;
        }

        let ids: Vec<String> = thread
            .emails
            .iter()
            .filter(|e| e.is_starred)
            .map(|e| e.id.clone())
            .collect();
        self.star_batch(ids, false).await
    }

    async fn star_batch(&mut self, ids: Vec<String>, is_starred: bool) -> BatchOutcome {
        let backend = Arc::clone(&self.backend);
        let results = join_all(ids.iter().map(|id| backend.set_starred(id, is_starred))).await;
        self.collect(ids, results)
    }

    fn collect(&mut self, ids: Vec<String>, results: Vec<Result<Email>>) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(email) => outcome.updated.push(self.apply(email)),
                Err(e) => {
                    warn!("Batch write failed for email {}: {}", id, e);
                    outcome.failed.push((id, e));
                }
            }
        }
        if !outcome.is_complete() {
            info!(
                "Batch applied {} of {} writes",
                outcome.updated.len(),
                outcome.updated.len() + outcome.failed.len()
            );
        }
        outcome
    }

    pub async fn move_to_folder(
        &mut self,
        email_id: &str,
        folder: Folder,
        remove_star_on_trash: bool,
    ) -> Result<Option<Email>> {
        if !self.knows(email_id) {
            return Ok(None);
        }

        let request = MoveEmailRequest {
            folder,
            remove_star_on_trash: Some(remove_star_on_trash),
        };
        match self.backend.move_email(email_id, &request).await {
            Ok(email) => Ok(Some(self.apply(email))),
            Err(e) => {
                warn!("Failed to move email {} to {}: {}", email_id, folder, e);
                Err(e)
            }
        }
    }

    /// Move every member of a thread, all writes issued together
    pub async fn move_thread(
        &mut self,
        thread_id: &str,
        folder: Folder,
        remove_star_on_trash: bool,
    ) -> BatchOutcome {
        let Some(thread) = find_thread(self.store.emails(), thread_id) else {
            debug!("Ignoring move for unknown thread {}", thread_id);
            return BatchOutcome::default();
        };

        let request = MoveEmailRequest {
            folder,
            remove_star_on_trash: Some(remove_star_on_trash),
        };
        let ids: Vec<String> = thread.emails.iter().map(|e| e.id.clone()).collect();
        let backend = Arc::clone(&self.backend);
        let results = join_all(ids.iter().map(|id| backend.move_email(id, &request))).await;
        self.collect(ids, results)
    }

    pub async fn mark_read(&mut self, email_id: &str, is_read: bool) -> Result<Option<Email>> {
        if !self.knows(email_id) {
            return Ok(None);
        }

        match self.backend.set_read(email_id, is_read).await {
            Ok(email) => Ok(Some(self.apply(email))),
            Err(e) => {
                warn!("Failed to set read state on email {}: {}", email_id, e);
                Err(e)
            }
        }
    }

    /// Mark unread members read one at a time, in thread order.
    /// A failure does not stop the remaining writes.
    pub async fn mark_thread_read(&mut self, thread_id: &str) -> BatchOutcome {
        let Some(thread) = find_thread(self.store.emails(), thread_id) else {
            return BatchOutcome::default();
        };

        let mut outcome = BatchOutcome::default();
        for email in thread.emails.iter().filter(|e| !e.is_read) {
            match self.mark_read(&email.id, true).await {
                Ok(Some(updated)) => outcome.updated.push(updated),
                Ok(None) => {}
                Err(e) => outcome.failed.push((email.id.clone(), e)),
            }
        }
        outcome
    }
}
