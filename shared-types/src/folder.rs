use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Storage location of an email. Exactly one per email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Folder {
    Inbox,
    Spam,
    Trash,
}

/// Folder values the sidebar can select. `Starred` and `All` are computed
/// views and never stored on an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum FolderSelector {
    #[default]
    Inbox,
    Starred,
    All,
    Spam,
    Trash,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown folder: {0}")]
pub struct ParseFolderError(pub String);

impl Folder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Spam => "spam",
            Folder::Trash => "trash",
        }
    }
}

impl FolderSelector {
    pub const ALL: [FolderSelector; 5] = [
        FolderSelector::Inbox,
        FolderSelector::Starred,
        FolderSelector::All,
        FolderSelector::Spam,
        FolderSelector::Trash,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FolderSelector::Inbox => "inbox",
            FolderSelector::Starred => "starred",
            FolderSelector::All => "all",
            FolderSelector::Spam => "spam",
            FolderSelector::Trash => "trash",
        }
    }

    /// Sidebar label
    pub fn display_name(&self) -> &'static str {
        match self {
            FolderSelector::Inbox => "Inbox",
            FolderSelector::Starred => "Starred",
            FolderSelector::All => "All Mail",
            FolderSelector::Spam => "Spam",
            FolderSelector::Trash => "Trash",
        }
    }

    /// The storage folder this selector maps to, if it is not a computed view
    pub fn storage_folder(&self) -> Option<Folder> {
        match self {
            FolderSelector::Inbox => Some(Folder::Inbox),
            FolderSelector::Spam => Some(Folder::Spam),
            FolderSelector::Trash => Some(Folder::Trash),
            FolderSelector::Starred | FolderSelector::All => None,
        }
    }
}

impl From<Folder> for FolderSelector {
    fn from(folder: Folder) -> Self {
        match folder {
            Folder::Inbox => FolderSelector::Inbox,
            Folder::Spam => FolderSelector::Spam,
            Folder::Trash => FolderSelector::Trash,
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for FolderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Folder {
    type Err = ParseFolderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(Folder::Inbox),
            "spam" => Ok(Folder::Spam),
            "trash" => Ok(Folder::Trash),
            _ => Err(ParseFolderError(s.to_string())),
        }
    }
}

impl FromStr for FolderSelector {
    type Err = ParseFolderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inbox" => Ok(FolderSelector::Inbox),
            "starred" => Ok(FolderSelector::Starred),
            "all" => Ok(FolderSelector::All),
            "spam" => Ok(FolderSelector::Spam),
            "trash" => Ok(FolderSelector::Trash),
            _ => Err(ParseFolderError(s.to_string())),
        }
    }
}

/// Sidebar entry. `count` is only reported for inbox and spam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FolderInfo {
    pub id: FolderSelector,
    pub name: String,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListFoldersResponse {
    pub folders: Vec<FolderInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_serialization() {
        let json = serde_json::to_string(&FolderSelector::All).unwrap();
        assert_eq!(json, "\"all\"");

        let deserialized: FolderSelector = serde_json::from_str("\"starred\"").unwrap();
        assert_eq!(deserialized, FolderSelector::Starred);
    }

    #[test]
    fn test_parse_folder() {
        assert_eq!("Trash".parse::<Folder>().unwrap(), Folder::Trash);
        assert!("starred".parse::<Folder>().is_err());
        assert_eq!(
            "starred".parse::<FolderSelector>().unwrap(),
            FolderSelector::Starred
        );
        assert!("archive".parse::<FolderSelector>().is_err());
    }

    #[test]
    fn test_views_have_no_storage_folder() {
        assert_eq!(FolderSelector::Starred.storage_folder(), None);
        assert_eq!(FolderSelector::All.storage_folder(), None);
        assert_eq!(
            FolderSelector::from(Folder::Spam).storage_folder(),
            Some(Folder::Spam)
        );
    }
}
