use async_trait::async_trait;
use shared_types::{FolderSelector, MailSettings, MoveEmailRequest};
use tokio::sync::RwLock;

use super::EmailBackend;
use crate::error::{MailError, Result};
use crate::model::Email;
use crate::seed::initial_emails;
use crate::store::EmailStore;
use crate::time::Clock;

/// In-process backend over a shared `EmailStore`
pub struct InMemoryBackend {
    store: RwLock<EmailStore>,
    settings: MailSettings,
}

impl InMemoryBackend {
    pub fn new(emails: Vec<Email>, settings: MailSettings) -> Self {
        Self {
            store: RwLock::new(EmailStore::new(emails)),
            settings,
        }
    }

    /// Backend holding the demo mailbox positioned relative to `clock`
    pub fn seeded(clock: &dyn Clock, settings: MailSettings) -> Self {
        Self::new(initial_emails(clock.now()), settings)
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    pub async fn get(&self, email_id: &str) -> Result<Email> {
        let store = self.store.read().await;
        store
            .get(email_id)
            .cloned()
            .ok_or_else(|| MailError::NotFound(email_id.to_string()))
    }

    /// Copy of every stored email, in storage order
    pub async fn snapshot(&self) -> Vec<Email> {
        self.store.read().await.emails().to_vec()
    }
}

#[async_trait]
impl EmailBackend for InMemoryBackend {
    async fn fetch_emails(&self) -> Result<Vec<Email>> {
        Ok(self.snapshot().await)
    }

    async fn fetch_emails_by_folder(&self, folder: FolderSelector) -> Result<Vec<Email>> {
        let store = self.store.read().await;
        Ok(store.by_selector(folder, &self.settings))
    }

    async fn move_email(&self, email_id: &str, request: &MoveEmailRequest) -> Result<Email> {
        let remove_star = request
            .remove_star_on_trash
            .unwrap_or(self.settings.remove_star_on_trash);
        let mut store = self.store.write().await;
        store
            .move_to(email_id, request.folder, remove_star)
            .ok_or_else(|| MailError::NotFound(email_id.to_string()))
    }

    async fn set_starred(&self, email_id: &str, is_starred: bool) -> Result<Email> {
        let mut store = self.store.write().await;
        store
            .set_starred(email_id, is_starred)
            .ok_or_else(|| MailError::NotFound(email_id.to_string()))
    }

    async fn set_read(&self, email_id: &str, is_read: bool) -> Result<Email> {
        let mut store = self.store.write().await;
        store
            .set_read(email_id, is_read)
            .ok_or_else(|| MailError::NotFound(email_id.to_string()))
    }
}
