use crate::domain::{GerritServer, PluginCommentAddedEvent};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to encode trigger fields: {0}")]
    Encode(#[source] toml::de::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One configured trigger, persisted as its type tag plus the fields the
/// matching descriptor builds it from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerConfig {
    #[serde(rename = "type", default = "default_trigger_type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: toml::Table,
}

impl TriggerConfig {
    pub fn from_comment_added(event: &PluginCommentAddedEvent) -> Result<Self, ConfigError> {
        let fields: toml::Table = toml::Value::try_from(event)?
            .try_into()
            .map_err(ConfigError::Encode)?;
        Ok(Self {
            kind: default_trigger_type(),
            fields,
        })
    }
}

fn default_trigger_type() -> String {
    "comment-added".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub servers: Vec<GerritServer>,
    #[serde(default)]
    pub triggers: Vec<TriggerConfig>,
}

/// Loads the config from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_or_default(&config_path())
}

/// Like [`load_config_from`], but a missing file yields an empty config.
/// Any other failure, including a file that does not parse, is returned.
pub fn load_config_or_default(path: &Path) -> Result<AppConfig, ConfigError> {
    match load_config_from(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == ErrorKind::NotFound => {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(AppConfig::default())
        }
        other => other,
    }
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).map_err(write_err)
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("GERRIT_TRIGGER_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    app_data_dir().join("config.toml")
}

fn app_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("GERRIT_TRIGGER_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("gerrit-trigger");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("gerrit-trigger");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("gerrit-trigger");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("gerrit-trigger");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".gerrit-trigger")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VerdictCategory;

    const SAMPLE: &str = r#"
[[servers]]
name = "review"

[[servers.categories]]
value = "Code-Review"
description = "Code Review"

[[servers.categories]]
value = "Verified"
description = "Verified"

[[triggers]]
verdictCategory = "Code-Review"
commentAddedTriggerApprovalValue = "2"
commentPattern = "(?i)recheck"
"#;

    #[test]
    fn test_load_sample_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.servers.len(), 1);
        assert_eq!(
            config.servers[0].categories[1],
            VerdictCategory::new("Verified", "Verified")
        );
        assert_eq!(config.triggers.len(), 1);
        assert_eq!(config.triggers[0].kind, "comment-added");
        assert_eq!(
            config.triggers[0].fields.get("commentPattern"),
            Some(&toml::Value::String("(?i)recheck".into()))
        );
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_defaults_but_broken_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(
            load_config_or_default(&missing).unwrap(),
            AppConfig::default()
        );

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[[servers]]\nname = \"review\"\ncategories = 3\n").unwrap();
        assert!(matches!(
            load_config_or_default(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_trigger_from_comment_added_round_trips() {
        let event = PluginCommentAddedEvent::new("Code-Review", "2", "(?i)recheck");
        let trigger = TriggerConfig::from_comment_added(&event).unwrap();
        assert_eq!(trigger.kind, "comment-added");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            servers: vec![],
            triggers: vec![trigger],
        };
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let restored: PluginCommentAddedEvent =
            toml::Value::Table(loaded.triggers[0].fields.clone())
                .try_into()
                .unwrap();
        assert_eq!(restored, event);
    }

    #[test]
    fn test_errors_carry_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_config_from(&missing),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "servers = 3").unwrap();
        let err = load_config_from(&broken).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }
}
