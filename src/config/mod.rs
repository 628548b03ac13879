//! Configuration layer for linode-ddns.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Mode`])
//! - The settings file ([`Settings`]) and token validation ([`validate_token`])
//! - Runtime options taken from the execution context ([`RuntimeOptions`], [`CommitMode`])
//! - Default values and file names ([`defaults`])
//!
//! # Files
//!
//! Both files live in the configuration folder (`--cfg`, default `~/.ssh`):
//!
//! - `linode-ddns.json` holds the token and the record endpoints to update.
//! - `.linode-ddns-ip` holds the last IP pushed to those records.
//!
//! # Commit vs. simulate
//!
//! Provider updates are only transmitted when running as root. Any other user
//! gets a description of each request instead, which makes it safe to try a
//! configuration by hand before installing it in a root crontab.

mod cli;
pub mod defaults;
mod error;
mod runtime;
mod settings;


use std::path::{Path, PathBuf};

pub use cli::{Cli, Mode};
pub use error::ConfigError;
pub use runtime::{CommitMode, RuntimeOptions};
pub use settings::{Settings, validate_token};

/// Path of the settings file inside `folder`.
#[must_use]
pub fn settings_path(folder: &Path) -> PathBuf {
    folder.join(defaults::SETTINGS_FILE)
}

/// Path of the last-IP record inside `folder`.
#[must_use]
pub fn last_ip_path(folder: &Path) -> PathBuf {
    folder.join(defaults::LAST_IP_FILE)
}

/// Creates `folder` (owner-only on Unix) if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the folder cannot be created.
pub fn ensure_folder(folder: &Path) -> Result<(), ConfigError> {
    if folder.is_dir() {
        return Ok(());
    }

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(folder)
        .map_err(|source| ConfigError::FolderCreate {
            path: folder.to_path_buf(),
            source,
        })
}
