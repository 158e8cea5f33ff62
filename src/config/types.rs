//! Core configuration types and loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::permissions::PermissionsConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A permission group is missing one of its required keys.
    #[error("permission group '{group}' is missing required key '{key}'")]
    MissingKey { group: String, key: &'static str },
}

impl ConfigError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "config_io",
            Self::Parse(_) => "config_parse",
            Self::Serialize(_) => "config_serialize",
            Self::MissingKey { .. } => "config_missing_key",
        }
    }
}

/// Per-context configuration snapshot.
///
/// One of these exists for every managed connection. The `permissions`
/// table is the part the permission index reads on reload and writes back
/// into on membership changes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Context name, used to label every log line (e.g. "libera").
    #[serde(default = "default_name")]
    pub name: String,
    /// Emergency mask-pattern that bypasses every permission check.
    /// Should be absent in normal operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdoor: Option<String>,
    /// Permission groups, keyed by name as the operator wrote it.
    #[serde(default)]
    pub permissions: PermissionsConfig,
}

fn default_name() -> String {
    "default".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Serialize the configuration back to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a TOML file, replacing its contents.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_when_omitted() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.name, "default");
        assert!(config.backdoor.is_none());
        assert!(config.permissions.is_empty());
    }

    #[test]
    fn parses_groups_and_backdoor() {
        let config = Config::from_toml_str(
            r#"
name = "libera"
backdoor = "root!*@localhost"

[permissions.admins]
perms = ["botcontrol", "op"]
users = ["*!*@trusted.example.com"]
"#,
        )
        .unwrap();

        assert_eq!(config.name, "libera");
        assert_eq!(config.backdoor.as_deref(), Some("root!*@localhost"));
        let admins = config.permissions.get("admins").unwrap();
        assert_eq!(
            admins.perms.as_deref(),
            Some(&["botcontrol".to_string(), "op".to_string()][..])
        );
        assert_eq!(
            admins.users.as_deref(),
            Some(&["*!*@trusted.example.com".to_string()][..])
        );
    }

    #[test]
    fn missing_keys_survive_parsing() {
        // Shape errors are reported by reload, which knows the group name.
        let config = Config::from_toml_str("[permissions.broken]\nperms = [\"x\"]\n").unwrap();
        let broken = config.permissions.get("broken").unwrap();
        assert!(broken.users.is_none());
    }

    #[test]
    fn save_and_load_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perms.toml");

        let mut config = Config::default();
        config.name = "testnet".to_string();
        config.permissions.insert_group("ops", vec!["kick".to_string()], vec!["*!*@ops.example".to_string()]);
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.name, "testnet");
        assert_eq!(
            loaded.permissions.get("ops").and_then(|g| g.users.clone()),
            Some(vec!["*!*@ops.example".to_string()])
        );
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Config::load("/nonexistent/slirc-perms.toml").unwrap_err();
        assert_eq!(err.error_code(), "config_io");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::from_toml_str("[permissions.admins\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
