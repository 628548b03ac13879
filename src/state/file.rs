//! File-based last-IP persistence.

use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{LastIpStore, LoadResult, StateError};
use crate::time::comment_stamp;

/// File-based implementation of [`LastIpStore`].
///
/// The record is two text lines: the address, then a comment saying when
/// and for which records it was written.
///
/// ```text
/// 1.2.3.5
/// # Updated on 2026-10-19 14:02:11 for 1/records/3
/// ```
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename so that a crash never leaves a
/// half-written record behind.
#[derive(Debug, Clone)]
pub struct FileLastIp {
    path: PathBuf,
}

impl FileLastIp {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the first line of the record as stored, trimmed.
    ///
    /// Unlike [`LastIpStore::load`] the line is not parsed, so a damaged
    /// record still shows up. `None` when the file is missing, unreadable
    /// or starts with a blank line.
    #[must_use]
    pub fn stored(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        first_line(&content).map(str::to_string)
    }
}

fn first_line(content: &str) -> Option<&str> {
    let first = content.lines().next().unwrap_or_default().trim();
    (!first.is_empty()).then_some(first)
}

impl LastIpStore for FileLastIp {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        let Some(first) = first_line(&content) else {
            return LoadResult::NotFound;
        };
        first.parse().map_or_else(
            |_| LoadResult::Corrupted {
                reason: format!("Not an IPv4 address: '{first}'"),
            },
            LoadResult::Loaded,
        )
    }

    fn save(&self, ip: Ipv4Addr, context: &str, at: SystemTime) -> Result<(), StateError> {
        let content = format!("{ip}\n# Updated on {} for {context}\n", comment_stamp(at));

        // .linode-ddns-ip -> .linode-ddns-ip.tmp, next to the target
        let temp_path = PathBuf::from(format!("{}.tmp", self.path.display()));
        std::fs::write(&temp_path, content).map_err(StateError::Write)?;
        std::fs::rename(&temp_path, &self.path).map_err(StateError::Write)?;

        Ok(())
    }
}
