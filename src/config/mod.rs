//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Top-level [`Config`] for one context, loading and saving
//! - [`permissions`]: Permission group tables ([`PermissionsConfig`], [`GroupEntry`])
//! - [`validation`]: Shape checks run before the permission index is rebuilt

mod permissions;
mod types;
pub mod validation;

pub use permissions::{GroupEntry, PermissionsConfig};
pub use types::{Config, ConfigError};
pub use validation::{ValidGroup, validate_groups};
