//! The derived permission index.
//!
//! An [`IndexSnapshot`] is built in one pass from a validated configuration
//! and never changed afterwards. Reload builds a fresh one and publishes it
//! in place of the old.

use crate::config::{ConfigError, PermissionsConfig, validate_groups};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Immutable view of the three derived mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSnapshot {
    /// Folded group name -> folded permission strings.
    group_permissions: BTreeMap<String, BTreeSet<String>>,
    /// Folded group name -> member mask-patterns as configured.
    group_members: BTreeMap<String, Vec<String>>,
    /// Folded permission -> members of every group granting it, concatenated.
    permission_members: BTreeMap<String, Vec<String>>,
}

impl IndexSnapshot {
    /// Build a snapshot from configuration.
    ///
    /// Fails on the first malformed group without producing anything.
    pub fn build(context: &str, config: &PermissionsConfig) -> Result<Self, ConfigError> {
        let groups = validate_groups(config)?;
        let mut snapshot = Self::default();

        for group in groups {
            let key = group.name.to_lowercase();
            if key != group.name {
                warn!(
                    context = %context,
                    group = %group.name,
                    folded = %key,
                    "Non-lower-case group in config; membership commands cannot edit it"
                );
            }

            // Groups folding to the same name are merged.
            snapshot
                .group_permissions
                .entry(key.clone())
                .or_default()
                .extend(group.perms.iter().map(|p| p.to_lowercase()));
            snapshot
                .group_members
                .entry(key)
                .or_default()
                .extend(group.users.iter().cloned());
        }

        for (group, perms) in &snapshot.group_permissions {
            let Some(members) = snapshot.group_members.get(group) else {
                continue;
            };
            for perm in perms {
                snapshot
                    .permission_members
                    .entry(perm.clone())
                    .or_default()
                    .extend(members.iter().cloned());
            }
        }

        debug!(context = %context, group_permissions = ?snapshot.group_permissions, "Group permissions");
        debug!(context = %context, group_members = ?snapshot.group_members, "Group users");
        debug!(context = %context, permission_members = ?snapshot.permission_members, "Permission users");

        Ok(snapshot)
    }

    /// Every known group name.
    pub fn groups(&self) -> BTreeSet<&str> {
        self.group_permissions
            .keys()
            .chain(self.group_members.keys())
            .map(String::as_str)
            .collect()
    }

    // Group keys are stored folded, so a lookup with upper-case letters
    // never matches. Callers wanting folding must fold the name themselves.

    /// Permissions of a group, `None` if the group is unknown.
    pub fn group_permissions(&self, group: &str) -> Option<&BTreeSet<String>> {
        self.group_permissions.get(group)
    }

    /// Member patterns of a group, `None` if the group is unknown.
    pub fn group_members(&self, group: &str) -> Option<&[String]> {
        self.group_members.get(group).map(Vec::as_slice)
    }

    /// All patterns granting a permission, `None` if no group grants it.
    pub fn permission_members(&self, permission: &str) -> Option<&[String]> {
        self.permission_members
            .get(&permission.to_lowercase())
            .map(Vec::as_slice)
    }

    pub fn group_exists(&self, group: &str) -> bool {
        self.group_permissions.contains_key(group)
    }

    pub(crate) fn iter_group_members(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.group_members.iter()
    }

    pub(crate) fn iter_permission_members(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.permission_members.iter()
    }
}
