//! Integration test common infrastructure.
//!
//! Builds configurations and indexes from TOML fixtures.

#![allow(dead_code)]

use slirc_perms::{Config, PermissionIndex};
use std::path::PathBuf;

/// The reference configuration used across scenario tests.
pub const ADMINS_TOML: &str = r#"
name = "testnet"

[permissions.admins]
perms = ["botcontrol", "op"]
users = ["*!*@trusted.example.com"]

[permissions.moderators]
perms = ["op", "kick"]
users = ["mod!*@*", "*!mods@*.example.net"]
"#;

pub fn config(toml: &str) -> Config {
    Config::from_toml_str(toml).expect("fixture config parses")
}

pub fn index(config: &Config) -> PermissionIndex {
    PermissionIndex::from_config(config).expect("fixture config is valid")
}

/// Write `toml` to a fresh temporary directory, returning the directory
/// guard and the file path.
pub fn write_config(toml: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("perms.toml");
    std::fs::write(&path, toml).expect("write config");
    (dir, path)
}

/// Formatted log output collected by [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogBuffer(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with an INFO-level subscriber scoped to this thread and return
/// what it logged.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
