use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The mailbox owner, used to render "you" in participant labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct AccountOwner {
    pub name: String,
    pub address: String,
    /// Address local parts that are delivered to the owner (e.g. "all")
    pub aliases: Vec<String>,
}

impl Default for AccountOwner {
    fn default() -> Self {
        Self {
            name: "You".to_string(),
            address: "you@example.com".to_string(),
            aliases: vec!["all".to_string()],
        }
    }
}

impl AccountOwner {
    pub fn is_owner(&self, name: &str, address: &str) -> bool {
        name == self.name || address.eq_ignore_ascii_case(&self.address)
    }

    pub fn is_alias(&self, local_part: &str) -> bool {
        self.aliases.iter().any(|alias| alias == local_part)
    }
}

/// Behavior switches of the mail client. Defaults are the standard rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct MailSettings {
    /// Starring an unstarred thread stars its earliest email (otherwise its latest)
    pub star_first_email_on_thread_star: bool,
    pub remove_star_on_trash: bool,
    pub show_spam_in_all_mail: bool,
    pub close_thread_when_unstarred_in_starred_view: bool,
    /// Show the hour for emails received today instead of the date
    pub extend_hour_display: bool,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            star_first_email_on_thread_star: true,
            remove_star_on_trash: true,
            show_spam_in_all_mail: true,
            close_thread_when_unstarred_in_starred_view: true,
            extend_hour_display: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ApiUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub settings: MailSettings,
}
