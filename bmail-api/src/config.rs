use std::path::{Path, PathBuf};
use std::sync::Arc;

use bmail_core::transform::parse_timestamp;
use bmail_core::{Clock, FixedClock, SystemClock};
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use shared_types::{AccountOwner, ApiUser, MailSettings};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ApiConfig {
    pub cors: Option<CorsConfig>,
    pub server: Option<ServerConfig>,
    pub account: Option<AccountOwner>,
    pub behavior: Option<BehaviorConfig>,
    pub demo: Option<DemoConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Mailbox behavior switches. Every switch is on unless the file says otherwise.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct BehaviorConfig {
    pub star_first_email_on_thread_star: bool,
    pub remove_star_on_trash: bool,
    pub show_spam_in_all_mail: bool,
    pub close_thread_when_unstarred_in_starred_view: bool,
    pub extend_hour_display: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        let settings = MailSettings::default();
        Self {
            star_first_email_on_thread_star: settings.star_first_email_on_thread_star,
            remove_star_on_trash: settings.remove_star_on_trash,
            show_spam_in_all_mail: settings.show_spam_in_all_mail,
            close_thread_when_unstarred_in_starred_view: settings
                .close_thread_when_unstarred_in_starred_view,
            extend_hour_display: settings.extend_hour_display,
        }
    }
}

impl From<BehaviorConfig> for MailSettings {
    fn from(behavior: BehaviorConfig) -> Self {
        Self {
            star_first_email_on_thread_star: behavior.star_first_email_on_thread_star,
            remove_star_on_trash: behavior.remove_star_on_trash,
            show_spam_in_all_mail: behavior.show_spam_in_all_mail,
            close_thread_when_unstarred_in_starred_view: behavior
                .close_thread_when_unstarred_in_starred_view,
            extend_hour_display: behavior.extend_hour_display,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DemoConfig {
    /// RFC 3339 instant the demo mailbox is positioned against.
    /// Unset means the system clock.
    pub frozen_at: Option<String>,
}

const DEFAULT_CONFIG: &str = r#"
[cors]
allowed_origins = ["http://localhost:3000"]

[server]
host = "127.0.0.1"
port = 8080

[account]
name = "You"
address = "you@example.com"
aliases = ["all"]

[behavior]
# star_first_email_on_thread_star = true
# remove_star_on_trash = true
# show_spam_in_all_mail = true
# close_thread_when_unstarred_in_starred_view = true
# extend_hour_display = true

[demo]
frozen_at = "2030-03-14T15:14:00Z"
"#;

impl ApiConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Read the config at `config_path`, writing the default file first if
    /// there is none.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?
            .try_deserialize()
    }

    pub fn host_and_port(&self) -> (String, u16) {
        match &self.server {
            Some(server) => (server.host.clone(), server.port),
            None => ("127.0.0.1".to_string(), 8080),
        }
    }

    pub fn owner(&self) -> AccountOwner {
        self.account.clone().unwrap_or_default()
    }

    pub fn settings(&self) -> MailSettings {
        self.behavior.clone().unwrap_or_default().into()
    }

    pub fn user(&self) -> ApiUser {
        let owner = self.owner();
        ApiUser {
            id: "1".to_string(),
            email: owner.address,
            name: owner.name,
            settings: self.settings(),
        }
    }

    pub fn clock(&self) -> Result<Arc<dyn Clock>, ConfigError> {
        let frozen_at = self.demo.as_ref().and_then(|demo| demo.frozen_at.as_deref());
        match frozen_at {
            Some(value) => {
                let instant = parse_timestamp(value).map_err(|e| {
                    ConfigError::Message(format!("Invalid demo.frozen_at {value:?}: {e}"))
                })?;
                Ok(Arc::new(FixedClock(instant)))
            }
            None => Ok(Arc::new(SystemClock)),
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("bmail").join("api.toml")
    } else {
        PathBuf::from("api.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmail_core::time::frozen_time;

    #[test]
    fn test_default_file_is_written_and_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bmail").join("api.toml");

        let config = ApiConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.host_and_port(), ("127.0.0.1".to_string(), 8080));
        assert_eq!(config.owner(), AccountOwner::default());
        assert_eq!(config.settings(), MailSettings::default());
        assert_eq!(config.clock().unwrap().now(), frozen_time());
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api.toml");
        std::fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 9090

[account]
name = "Sam Parker"
address = "sam@example.com"

[behavior]
show_spam_in_all_mail = false
"#,
        )
        .unwrap();

        let config = ApiConfig::load_from(&path).unwrap();
        assert_eq!(config.host_and_port(), ("0.0.0.0".to_string(), 9090));
        assert!(config.cors.is_none());

        let user = config.user();
        assert_eq!(user.name, "Sam Parker");
        assert_eq!(user.email, "sam@example.com");
        assert!(!user.settings.show_spam_in_all_mail);
        assert!(user.settings.remove_star_on_trash);
        assert_eq!(config.owner().aliases, vec!["all".to_string()]);
    }

    #[test]
    fn test_invalid_frozen_at() {
        let config = ApiConfig {
            demo: Some(DemoConfig {
                frozen_at: Some("yesterday".to_string()),
            }),
            ..ApiConfig::default()
        };
        assert!(config.clock().is_err());
    }
}
