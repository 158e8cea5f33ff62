//! Group membership edits.
//!
//! These write into the caller's [`PermissionsConfig`] and leave the
//! published index alone. Persisting the configuration and reloading the
//! index are both up to the caller.

use super::PermissionIndex;
use crate::config::{ConfigError, PermissionsConfig};
use crate::error::PermissionResult;
use crate::mask::MaskMatcher;
use crate::telemetry::spans;
use tracing::{debug, info, warn};

impl<M: MaskMatcher> PermissionIndex<M> {
    /// Add `identity` to `group` as a literal pattern.
    ///
    /// Returns `Ok(false)` when the published index already places
    /// `identity` in the group. A missing group is created with no
    /// permissions. The group name is folded to lower case first.
    pub fn add_group_member(
        &self,
        config: &mut PermissionsConfig,
        identity: &str,
        group: &str,
    ) -> PermissionResult<bool> {
        let _span = spans::membership(&self.name, "add", group).entered();
        let key = group.to_lowercase();

        if self.user_in_group(identity, &key) {
            debug!(context = %self.name, user = %identity, group = %key, "User already in group");
            return Ok(false);
        }

        match config.get_mut(&key) {
            Some(entry) => {
                let users = entry.users.as_mut().ok_or_else(|| ConfigError::MissingKey {
                    group: key.clone(),
                    key: "users",
                })?;
                users.push(identity.to_string());
            }
            None => {
                info!(context = %self.name, group = %key, "Creating permission group");
                config.insert_group(key.clone(), Vec::new(), vec![identity.to_string()]);
            }
        }

        info!(context = %self.name, user = %identity, group = %key, "Added user to group");
        Ok(true)
    }

    /// Remove every configured pattern of `group` that matches `identity`.
    ///
    /// Returns the removed patterns. The group must be configured under its
    /// lower-case name: tables only reachable by folding (e.g. written as
    /// "Admins") are left untouched with a warning, and their matching
    /// patterns are not part of the returned list.
    pub fn remove_group_member(
        &self,
        config: &mut PermissionsConfig,
        group: &str,
        identity: &str,
    ) -> PermissionResult<Vec<String>> {
        let _span = spans::membership(&self.name, "remove", group).entered();
        let key = group.to_lowercase();
        let identity_lower = identity.to_lowercase();

        if !config.contains(&key) {
            if config.iter().any(|(name, _)| name.to_lowercase() == key) {
                warn!(
                    context = %self.name,
                    group = %key,
                    "Can't remove user from group due to upper-case group names"
                );
            }
            return Ok(Vec::new());
        }

        let shadowed = config.iter().any(|(name, entry)| {
            *name != key
                && name.to_lowercase() == key
                && entry
                    .users
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .any(|pattern| self.mask_matches(&identity_lower, pattern))
        });
        if shadowed {
            warn!(
                context = %self.name,
                group = %key,
                user = %identity,
                "Can't remove user from group due to upper-case group names"
            );
        }

        let users = config
            .get_mut(&key)
            .and_then(|entry| entry.users.as_mut())
            .ok_or_else(|| ConfigError::MissingKey {
                group: key.clone(),
                key: "users",
            })?;

        let mut removed = Vec::new();
        users.retain(|pattern| {
            if self.mask_matches(&identity_lower, pattern) {
                removed.push(pattern.clone());
                false
            } else {
                true
            }
        });

        if !removed.is_empty() {
            info!(
                context = %self.name,
                user = %identity,
                group = %key,
                removed = ?removed,
                "Removed user from group"
            );
        }
        Ok(removed)
    }
}
