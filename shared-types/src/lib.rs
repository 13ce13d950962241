use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod email;
pub mod folder;
pub mod user;

pub use email::{
    ApiEmail, ApiSender, ApiThread, ListEmailsRequest, ListEmailsResponse, ListThreadsRequest,
    ListThreadsResponse, MarkAsReadRequest, MoveEmailRequest, ToggleStarRequest,
};
pub use folder::{Folder, FolderInfo, FolderSelector, ListFoldersResponse, ParseFolderError};
pub use user::{AccountOwner, ApiUser, MailSettings};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}
