//! Configuration validation.
//!
//! Turns the raw `[permissions]` tables into checked groups before the
//! permission index builds anything from them.

use super::{ConfigError, PermissionsConfig};

/// A group entry that has both of its required keys.
#[derive(Debug, Clone, Copy)]
pub struct ValidGroup<'a> {
    /// Group name exactly as configured.
    pub name: &'a str,
    pub perms: &'a [String],
    pub users: &'a [String],
}

/// Validate every permission group, stopping at the first malformed one.
pub fn validate_groups(config: &PermissionsConfig) -> Result<Vec<ValidGroup<'_>>, ConfigError> {
    config
        .iter()
        .map(|(name, entry)| {
            let perms = entry.perms.as_deref().ok_or_else(|| ConfigError::MissingKey {
                group: name.clone(),
                key: "perms",
            })?;
            let users = entry.users.as_deref().ok_or_else(|| ConfigError::MissingKey {
                group: name.clone(),
                key: "users",
            })?;
            Ok(ValidGroup {
                name: name.as_str(),
                perms,
                users,
            })
        })
        .collect()
}
