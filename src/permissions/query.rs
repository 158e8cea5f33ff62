//! Permission checks and introspection.

use super::PermissionIndex;
use crate::mask::MaskMatcher;
use std::collections::BTreeSet;
use tracing::info;

/// Why a permission check succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant {
    /// The identity matched the backdoor mask.
    Backdoor,
    /// The identity matched this configured mask-pattern.
    Pattern(String),
}

impl<M: MaskMatcher> PermissionIndex<M> {
    /// Decide whether `identity` holds `permission`, and why.
    ///
    /// Returns the first granting pattern in index order, or `None`.
    pub fn authorize(&self, identity: &str, permission: &str) -> Option<Grant> {
        let identity = identity.to_lowercase();

        if let Some(backdoor) = &self.backdoor
            && self.mask_matches(&identity, backdoor)
        {
            return Some(Grant::Backdoor);
        }

        let snapshot = self.snapshot();
        // A permission no group grants: nobody has access.
        let allowed = snapshot.permission_members(permission)?;
        allowed
            .iter()
            .find(|pattern| self.mask_matches(&identity, pattern))
            .map(|pattern| Grant::Pattern(pattern.clone()))
    }

    /// Check a permission, logging the grant for audit.
    pub fn has_permission(&self, identity: &str, permission: &str) -> bool {
        match self.authorize(identity, permission) {
            Some(Grant::Pattern(pattern)) => {
                info!(
                    context = %self.name,
                    user = %identity,
                    permission = %permission,
                    mask = %pattern,
                    "Allowed user access"
                );
                true
            }
            Some(Grant::Backdoor) => true,
            None => false,
        }
    }

    /// Check a permission without the audit log line.
    pub fn has_permission_silent(&self, identity: &str, permission: &str) -> bool {
        self.authorize(identity, permission).is_some()
    }

    /// All group names, including groups with no members or no permissions.
    pub fn groups(&self) -> BTreeSet<String> {
        self.snapshot()
            .groups()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Permissions of `group`, `None` if there is no such group.
    pub fn group_permissions(&self, group: &str) -> Option<BTreeSet<String>> {
        self.snapshot().group_permissions(group).cloned()
    }

    /// Member patterns of `group`, `None` if there is no such group.
    pub fn group_members(&self, group: &str) -> Option<Vec<String>> {
        self.snapshot().group_members(group).map(<[String]>::to_vec)
    }

    /// Patterns granting `permission` (folded), `None` if no group grants it.
    pub fn permission_members(&self, permission: &str) -> Option<Vec<String>> {
        self.snapshot()
            .permission_members(permission)
            .map(<[String]>::to_vec)
    }

    /// Every permission held by `identity` through any group.
    pub fn user_permissions(&self, identity: &str) -> BTreeSet<String> {
        let identity = identity.to_lowercase();
        let snapshot = self.snapshot();

        snapshot
            .iter_permission_members()
            .filter(|(_, patterns)| patterns.iter().any(|p| self.mask_matches(&identity, p)))
            .map(|(permission, _)| permission.clone())
            .collect()
    }

    /// Every group with at least one pattern matching `identity`.
    ///
    /// Each group appears once, however many of its patterns match.
    pub fn user_groups(&self, identity: &str) -> Vec<String> {
        let identity = identity.to_lowercase();
        let snapshot = self.snapshot();

        snapshot
            .iter_group_members()
            .filter(|(_, patterns)| patterns.iter().any(|p| self.mask_matches(&identity, p)))
            .map(|(group, _)| group.clone())
            .collect()
    }

    pub fn group_exists(&self, group: &str) -> bool {
        self.snapshot().group_exists(group)
    }

    /// Whether any pattern of `group` matches `identity`. False for unknown groups.
    pub fn user_in_group(&self, identity: &str, group: &str) -> bool {
        let identity = identity.to_lowercase();
        self.snapshot()
            .group_members(group)
            .is_some_and(|patterns| patterns.iter().any(|p| self.mask_matches(&identity, p)))
    }
}
