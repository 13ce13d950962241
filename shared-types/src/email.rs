use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::folder::{Folder, FolderSelector};

/// Sender as sent over the wire. Initials are computed client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiSender {
    pub name: String,
    pub email: String,
}

/// Email record in its API representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiEmail {
    pub id: String,
    pub thread_id: String,
    pub from: ApiSender,
    /// Raw addresses or bare display names, in header order
    #[serde(default)]
    pub to: Vec<String>,
    pub subject: String,
    pub snippet: String,
    pub body: String,
    /// ISO-8601 timestamp
    pub timestamp: String,
    pub is_starred: bool,
    pub is_read: bool,
    pub folder: Folder,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Thread summary as the API returns it: member ids instead of full emails
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ApiThread {
    pub id: String,
    pub email_ids: Vec<String>,
    pub participants: Vec<String>,
    pub subject: String,
    pub snippet: String,
    pub last_message_time: String,
    pub is_starred: bool,
    pub has_unread: bool,
    pub message_count: usize,
}

/// Request to list emails
#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListEmailsRequest {
    pub folder: Option<FolderSelector>,
}

/// Response for email list
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListEmailsResponse {
    pub emails: Vec<ApiEmail>,
    pub total_count: usize,
}

/// Request to list threads visible in a folder
#[derive(Debug, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListThreadsRequest {
    pub folder: Option<FolderSelector>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListThreadsResponse {
    pub threads: Vec<ApiThread>,
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MoveEmailRequest {
    pub folder: Folder,
    /// Server default is to clear the star when moving to trash
    #[serde(default)]
    pub remove_star_on_trash: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ToggleStarRequest {
    pub is_starred: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MarkAsReadRequest {
    pub is_read: bool,
}
