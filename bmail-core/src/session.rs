use std::sync::Arc;

use shared_types::{AccountOwner, Folder, FolderInfo, FolderSelector, MailSettings};
use tracing::{debug, info, warn};

use crate::backend::EmailBackend;
use crate::error::Result;
use crate::filter::{filter_threads, folder_infos};
use crate::model::{Email, Thread};
use crate::mutation::{BatchOutcome, MutationEngine, ViewContext, ViewSignal};
use crate::seed::initial_emails;
use crate::store::EmailStore;
use crate::threads::{find_thread, group_threads};
use crate::time::{format_email_date, format_list_time, Clock};
use crate::view::{format_participants, thread_actions, ThreadAction};

/// Where the emails shown after `MailSession::load` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Backend,
    Snapshot,
    Seed,
}

/// View state of one mail client plus the engine it writes through.
///
/// Thread lists, counts and the open thread are derived from the current
/// store on every call.
pub struct MailSession {
    engine: MutationEngine,
    clock: Arc<dyn Clock>,
    owner: AccountOwner,
    folder: FolderSelector,
    open_thread_id: Option<String>,
    selected_email_id: Option<String>,
    search: String,
}

impl MailSession {
    pub fn new(
        backend: Arc<dyn EmailBackend>,
        owner: AccountOwner,
        settings: MailSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            engine: MutationEngine::new(backend, settings),
            clock,
            owner,
            folder: FolderSelector::default(),
            open_thread_id: None,
            selected_email_id: None,
            search: String::new(),
        }
    }

    /// Fetch from the backend. On failure keep the emails already held, or
    /// fall back to the demo mailbox when there are none.
    pub async fn load(&mut self) -> LoadSource {
        match self.engine.refresh().await {
            Ok(count) => {
                info!("Loaded {} emails", count);
                LoadSource::Backend
            }
            Err(e) if !self.engine.store().is_empty() => {
                warn!("Failed to fetch emails, keeping local snapshot: {}", e);
                LoadSource::Snapshot
            }
            Err(e) => {
                warn!("Failed to fetch emails, using demo mailbox: {}", e);
                self.engine.load_snapshot(initial_emails(self.clock.now()));
                LoadSource::Seed
            }
        }
    }

    pub fn store(&self) -> &EmailStore {
        self.engine.store()
    }

    pub fn emails(&self) -> &[Email] {
        self.engine.store().emails()
    }

    pub fn owner(&self) -> &AccountOwner {
        &self.owner
    }

    pub fn settings(&self) -> &MailSettings {
        self.engine.settings()
    }

    pub fn folder(&self) -> FolderSelector {
        self.folder
    }

    pub fn open_thread_id(&self) -> Option<&str> {
        self.open_thread_id.as_deref()
    }

    pub fn selected_email_id(&self) -> Option<&str> {
        self.selected_email_id.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Switching folders closes whatever thread is open
    pub fn set_folder(&mut self, folder: FolderSelector) {
        debug!("Switching to folder {}", folder);
        self.folder = folder;
        self.close_thread();
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    pub fn select_email(&mut self, email_id: &str) {
        self.selected_email_id = Some(email_id.to_string());
    }

    pub fn close_thread(&mut self) {
        self.open_thread_id = None;
        self.selected_email_id = None;
    }

    /// Open a thread and mark its unread emails read
    pub async fn open_thread(&mut self, thread_id: &str) -> BatchOutcome {
        let Some(thread) = find_thread(self.emails(), thread_id) else {
            debug!("Cannot open unknown thread {}", thread_id);
            return BatchOutcome::default();
        };

        self.open_thread_id = Some(thread.id.clone());
        self.selected_email_id = thread.latest_email().map(|e| e.id.clone());
        self.engine.mark_thread_read(thread_id).await
    }

    pub fn current_thread(&self) -> Option<Thread> {
        self.open_thread_id
            .as_deref()
            .and_then(|thread_id| find_thread(self.emails(), thread_id))
    }

    /// Threads for the active folder and search term, newest first
    pub fn visible_threads(&self) -> Vec<Thread> {
        let threads = group_threads(self.emails());
        filter_threads(&threads, self.folder, Some(self.search.as_str()), self.settings())
    }

    pub fn folder_infos(&self) -> Vec<FolderInfo> {
        folder_infos(self.emails())
    }

    pub fn thread_actions(&self) -> Vec<ThreadAction> {
        thread_actions(self.folder)
    }

    pub fn participants_label(&self, thread: &Thread) -> String {
        format_participants(thread, self.folder, &self.owner)
    }

    pub fn list_time(&self, thread: &Thread) -> String {
        format_list_time(
            &thread.last_message_time,
            &self.clock.now(),
            self.settings().extend_hour_display,
        )
    }

    pub fn email_date(&self, email: &Email) -> String {
        format_email_date(&email.timestamp, &self.clock.now())
    }

    pub async fn toggle_star(&mut self, email_id: &str, is_starred: bool) -> Result<Option<Email>> {
        let view = ViewContext {
            folder: self.folder,
            open_thread_id: self.open_thread_id.as_deref(),
        };
        let Some(outcome) = self.engine.toggle_star(email_id, is_starred, &view).await? else {
            return Ok(None);
        };

        if outcome.signal == Some(ViewSignal::CloseThread) {
            debug!("Closing thread {} after its last star was removed", outcome.email.thread_id);
            self.close_thread();
        }
        Ok(Some(outcome.email))
    }

    pub async fn toggle_thread_star(&mut self, thread_id: &str) -> BatchOutcome {
        self.engine.toggle_thread_star(thread_id).await
    }

    pub async fn move_to_folder(&mut self, email_id: &str, folder: Folder) -> Result<Option<Email>> {
        let remove_star = self.settings().remove_star_on_trash;
        self.engine.move_to_folder(email_id, folder, remove_star).await
    }

    pub async fn mark_read(&mut self, email_id: &str, is_read: bool) -> Result<Option<Email>> {
        self.engine.mark_read(email_id, is_read).await
    }

    pub async fn trash_thread(&mut self) -> BatchOutcome {
        self.move_open_thread(Folder::Trash).await
    }

    pub async fn spam_thread(&mut self) -> BatchOutcome {
        self.move_open_thread(Folder::Spam).await
    }

    /// "Not spam" and "Move to inbox" both land here
    pub async fn restore_thread(&mut self) -> BatchOutcome {
        self.move_open_thread(Folder::Inbox).await
    }

    async fn move_open_thread(&mut self, folder: Folder) -> BatchOutcome {
        let Some(thread_id) = self.open_thread_id.clone() else {
            debug!("No open thread to move to {}", folder);
            return BatchOutcome::default();
        };
        self.move_thread(&thread_id, folder).await
    }

    /// Move every member of a thread without opening it. Read state is left
    /// alone; the thread is closed if it was the open one.
    pub async fn move_thread(&mut self, thread_id: &str, folder: Folder) -> BatchOutcome {
        let remove_star = self.settings().remove_star_on_trash;
        let outcome = self.engine.move_thread(thread_id, folder, remove_star).await;
        if self.open_thread_id.as_deref() == Some(thread_id) {
            self.close_thread();
        }
        outcome
    }
}
