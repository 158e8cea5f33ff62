//! Group-based hostmask permissions.
//!
//! A [`PermissionIndex`] answers "may `nick!user@host` use permission P"
//! for one context. It is built from the `[permissions]` configuration
//! tables and keeps three derived mappings:
//!
//! | Mapping | Key | Value |
//! |---------|-----|-------|
//! | group permissions | group | permission set |
//! | group members | group | mask-patterns |
//! | permission members | permission | mask-patterns of every granting group |
//!
//! # Reload
//!
//! Queries only ever see the derived mappings. [`PermissionIndex::reload`]
//! rebuilds all three on the side and publishes them together; readers keep
//! whatever snapshot they already hold. A failed reload publishes nothing.
//!
//! # Mutation
//!
//! [`PermissionIndex::add_group_member`] and
//! [`PermissionIndex::remove_group_member`] edit the caller's configuration
//! only. The change becomes visible to queries after the next reload.

mod membership;
mod query;
mod snapshot;

pub use query::Grant;
pub use snapshot::IndexSnapshot;

use crate::config::{Config, ConfigError, PermissionsConfig};
use crate::mask::{IrcMaskMatcher, MaskMatcher};
use crate::telemetry::spans;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::info;

/// Permission index for a single context (usually one IRC network).
pub struct PermissionIndex<M = IrcMaskMatcher> {
    /// Context name, used in log lines.
    name: String,
    /// Mask-pattern that bypasses every check when it matches.
    backdoor: Option<String>,
    matcher: M,
    /// Currently published snapshot.
    current: RwLock<Arc<IndexSnapshot>>,
    /// Serializes reloads so builds never race each other's publish.
    reload_lock: Mutex<()>,
}

impl PermissionIndex<IrcMaskMatcher> {
    /// Build an index using IRC glob matching.
    pub fn new(
        name: impl Into<String>,
        backdoor: Option<String>,
        config: &PermissionsConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_matcher(name, backdoor, config, IrcMaskMatcher)
    }

    /// Build an index from a full context configuration.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.name.clone(),
            config.backdoor.clone(),
            &config.permissions,
        )
    }
}

impl<M: MaskMatcher> PermissionIndex<M> {
    /// Build an index with a custom mask matcher.
    pub fn with_matcher(
        name: impl Into<String>,
        backdoor: Option<String>,
        config: &PermissionsConfig,
        matcher: M,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        info!(context = %name, "Created permission manager");

        let index = Self {
            name,
            backdoor,
            matcher,
            current: RwLock::new(Arc::new(IndexSnapshot::default())),
            reload_lock: Mutex::new(()),
        };
        index.reload(config)?;
        Ok(index)
    }

    /// Rebuild the derived mappings from configuration.
    ///
    /// On error the previously published snapshot stays in place.
    pub fn reload(&self, config: &PermissionsConfig) -> Result<(), ConfigError> {
        let _guard = self.reload_lock.lock();
        let _span = spans::reload(&self.name, config.len()).entered();
        info!(context = %self.name, "Reloading permissions");

        let snapshot = IndexSnapshot::build(&self.name, config).inspect_err(|e| {
            tracing::error!(
                context = %self.name,
                error = %e,
                code = e.error_code(),
                "Permission reload rejected; keeping previous index"
            );
        })?;

        *self.current.write() = Arc::new(snapshot);
        Ok(())
    }

    /// The currently published snapshot.
    ///
    /// Holding it keeps a consistent view across several lookups even if a
    /// reload happens meanwhile.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backdoor(&self) -> Option<&str> {
        self.backdoor.as_deref()
    }

    /// Match an identity that is already folded against a configured pattern.
    fn mask_matches(&self, identity_lower: &str, pattern: &str) -> bool {
        self.matcher.matches(identity_lower, &pattern.to_lowercase())
    }
}

impl<M> std::fmt::Debug for PermissionIndex<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionIndex")
            .field("name", &self.name)
            .field("backdoor", &self.backdoor.is_some())
            .field("current", &*self.current.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupEntry;

    fn admins_config() -> PermissionsConfig {
        let mut config = PermissionsConfig::new();
        config.insert_group(
            "admins",
            vec!["botcontrol".into()],
            vec!["*!*@trusted.example.com".into()],
        );
        config
    }

    #[test]
    fn construction_builds_index() {
        let index = PermissionIndex::new("test", None, &admins_config()).unwrap();
        assert_eq!(index.name(), "test");
        assert!(index.snapshot().group_exists("admins"));
    }

    #[test]
    fn construction_fails_on_malformed_group() {
        let mut config = admins_config();
        config.insert("broken", GroupEntry::default());
        let err = PermissionIndex::new("test", None, &config).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { ref group, .. } if group == "broken"));
    }

    #[test]
    fn reload_replaces_everything() {
        let index = PermissionIndex::new("test", None, &admins_config()).unwrap();

        let mut config = PermissionsConfig::new();
        config.insert_group("voicers", vec!["voice".into()], vec!["*!*@*".into()]);
        index.reload(&config).unwrap();

        let snapshot = index.snapshot();
        assert!(!snapshot.group_exists("admins"));
        assert!(snapshot.permission_members("botcontrol").is_none());
        assert!(snapshot.group_exists("voicers"));
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let index = PermissionIndex::new("test", None, &admins_config()).unwrap();
        let before = index.snapshot();

        let mut config = PermissionsConfig::new();
        config.insert_group("voicers", vec!["voice".into()], vec!["*!*@*".into()]);
        config.insert(
            "broken",
            GroupEntry {
                perms: Some(vec![]),
                users: None,
            },
        );
        assert!(index.reload(&config).is_err());

        assert_eq!(*index.snapshot(), *before);
        assert!(!index.snapshot().group_exists("voicers"));
    }

    #[test]
    fn held_snapshot_survives_reload() {
        let index = PermissionIndex::new("test", None, &admins_config()).unwrap();
        let held = index.snapshot();

        index.reload(&PermissionsConfig::new()).unwrap();

        assert!(held.group_exists("admins"));
        assert!(!index.snapshot().group_exists("admins"));
    }

    #[test]
    fn from_config_carries_name_and_backdoor() {
        let config = Config::from_toml_str(
            r#"
name = "libera"
backdoor = "root!*@localhost"

[permissions.admins]
perms = ["botcontrol"]
users = []
"#,
        )
        .unwrap();
        let index = PermissionIndex::from_config(&config).unwrap();
        assert_eq!(index.name(), "libera");
        assert_eq!(index.backdoor(), Some("root!*@localhost"));
    }
}
