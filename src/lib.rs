//! slirc-perms - group-based hostmask permissions for IRC bots and services.
//!
//! Operators describe groups in TOML:
//!
//! ```toml
//! [permissions.admins]
//! perms = ["botcontrol"]
//! users = ["*!*@trusted.example.com"]
//! ```
//!
//! and a [`PermissionIndex`] answers whether a `nick!user@host` holds a
//! permission through any group it matches.
//!
//! ```
//! use slirc_perms::{Config, PermissionIndex};
//!
//! let config = Config::from_toml_str(r#"
//! [permissions.admins]
//! perms = ["botcontrol"]
//! users = ["*!*@trusted.example.com"]
//! "#).unwrap();
//! let index = PermissionIndex::from_config(&config).unwrap();
//!
//! assert!(index.has_permission("alice!u@trusted.example.com", "botcontrol"));
//! assert!(!index.has_permission("alice!u@other.example.com", "botcontrol"));
//! ```

pub mod config;
pub mod error;
pub mod mask;
pub mod permissions;
pub mod telemetry;

pub use config::{Config, ConfigError, GroupEntry, PermissionsConfig};
pub use error::{PermissionError, PermissionResult};
pub use mask::{IrcMaskMatcher, MaskMatcher, wildcard_match};
pub use permissions::{Grant, IndexSnapshot, PermissionIndex};
