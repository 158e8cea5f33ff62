//! Permission group configuration.
//!
//! This is the operator-facing shape of the `[permissions.<group>]` tables.
//! Group keys are stored exactly as written; the permission index folds
//! them to lower case when it builds its derived view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single `[permissions.<group>]` table.
///
/// Both keys are required, but they are kept optional here so a missing
/// key can be reported against its group name instead of as an anonymous
/// parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupEntry {
    /// Permission strings granted to the group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perms: Option<Vec<String>>,
    /// Member mask-patterns (e.g. "*!*@trusted.example.com").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
}

impl GroupEntry {
    /// A well-formed group entry.
    pub fn new(perms: Vec<String>, users: Vec<String>) -> Self {
        Self {
            perms: Some(perms),
            users: Some(users),
        }
    }
}

/// All permission groups of one context, keyed by configured name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PermissionsConfig {
    groups: BTreeMap<String, GroupEntry>,
}

impl PermissionsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a group by its exact configured name.
    pub fn get(&self, group: &str) -> Option<&GroupEntry> {
        self.groups.get(group)
    }

    /// Mutable lookup by exact configured name.
    pub fn get_mut(&mut self, group: &str) -> Option<&mut GroupEntry> {
        self.groups.get_mut(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Insert or replace a group.
    pub fn insert(&mut self, group: impl Into<String>, entry: GroupEntry) -> Option<GroupEntry> {
        self.groups.insert(group.into(), entry)
    }

    /// Insert or replace a well-formed group.
    pub fn insert_group(
        &mut self,
        group: impl Into<String>,
        perms: Vec<String>,
        users: Vec<String>,
    ) -> Option<GroupEntry> {
        self.insert(group, GroupEntry::new(perms, users))
    }

    pub fn remove(&mut self, group: &str) -> Option<GroupEntry> {
        self.groups.remove(group)
    }

    /// Iterate groups in configured-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupEntry)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl FromIterator<(String, GroupEntry)> for PermissionsConfig {
    fn from_iter<T: IntoIterator<Item = (String, GroupEntry)>>(iter: T) -> Self {
        Self {
            groups: iter.into_iter().collect(),
        }
    }
}
