pub mod http;
pub mod memory;

pub use http::HttpBackend;
pub use memory::InMemoryBackend;

use async_trait::async_trait;
use shared_types::{FolderSelector, MoveEmailRequest};

use crate::error::Result;
use crate::model::Email;

/// Where emails live. The client keeps its own copy in an `EmailStore`
/// and writes through a backend; every write returns the updated record.
#[async_trait]
pub trait EmailBackend: Send + Sync {
    async fn fetch_emails(&self) -> Result<Vec<Email>>;

    async fn fetch_emails_by_folder(&self, folder: FolderSelector) -> Result<Vec<Email>>;

    async fn move_email(&self, email_id: &str, request: &MoveEmailRequest) -> Result<Email>;

    async fn set_starred(&self, email_id: &str, is_starred: bool) -> Result<Email>;

    async fn set_read(&self, email_id: &str, is_read: bool) -> Result<Email>;
}
