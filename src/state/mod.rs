//! Last-IP persistence for detecting changes across runs.
//!
//! This module provides abstractions for storing and retrieving the
//! address most recently pushed to the DNS records.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileLastIp;

use std::io;
use std::net::Ipv4Addr;
use std::time::SystemTime;

use thiserror::Error;

/// Result of loading the last IP from persistent storage.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - Successfully loaded a previous address
/// - No previous address exists (first run, or empty first line)
/// - A record exists but its first line is not an IPv4 address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// Successfully loaded the previously saved address.
    Loaded(Ipv4Addr),

    /// No record exists.
    NotFound,

    /// Record exists but could not be read or parsed.
    /// The next successful update overwrites it.
    Corrupted {
        /// Reason for corruption (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded address, or `None` for `NotFound`/`Corrupted`.
    #[must_use]
    pub const fn ip(&self) -> Option<Ipv4Addr> {
        match self {
            Self::Loaded(ip) => Some(*ip),
            Self::NotFound | Self::Corrupted { .. } => None,
        }
    }
}

/// Errors that can occur while writing the last-IP record.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants to allow graceful degradation.
#[derive(Debug, Error)]
pub enum StateError {
    /// Failed to write the record.
    #[error("Failed to write last IP file: {0}")]
    Write(#[source] io::Error),
}

/// Abstraction for persisting the last applied IP between runs.
///
/// # Testing
///
/// Test builds add an in-memory `mock::MemoryLastIp` to avoid filesystem
/// dependencies.
pub trait LastIpStore {
    /// Loads the previously saved address.
    fn load(&self) -> LoadResult;

    /// Replaces the record with `ip`, noting `at` and `context` in a comment.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, ip: Ipv4Addr, context: &str, at: SystemTime) -> Result<(), StateError>;
}

impl<T: LastIpStore + ?Sized> LastIpStore for &T {
    fn load(&self) -> LoadResult {
        (**self).load()
    }

    fn save(&self, ip: Ipv4Addr, context: &str, at: SystemTime) -> Result<(), StateError> {
        (**self).save(ip, context, at)
    }
}
