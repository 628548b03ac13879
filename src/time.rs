//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait that allows injecting mock clocks
//! in tests while using the real system clock in production, plus the two
//! timestamp renderings written to disk.

use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use linode_ddns::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Syslog-style stamp used as the event log line prefix (`Oct 19 14:02:11`).
#[must_use]
pub fn log_stamp(at: SystemTime) -> String {
    DateTime::<Local>::from(at)
        .format("%b %d %H:%M:%S")
        .to_string()
}

/// Full local date and time for the last-IP comment (`2026-10-19 14:02:11`).
#[must_use]
pub fn comment_stamp(at: SystemTime) -> String {
    DateTime::<Local>::from(at)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
