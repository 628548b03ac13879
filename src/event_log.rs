//! Append-only event log in syslog style.
//!
//! Each event is one line:
//!
//! ```text
//! Oct 19 14:02:11 router linode-ddns: Home IP updated to 1.2.3.5
//! ```
//!
//! Lines go to the configured file; when it cannot be opened they are
//! printed on stdout instead so the event is never lost silently.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::time::{Clock, SystemClock, log_stamp};

/// Sink for the few events worth keeping: updates and fatal errors.
#[derive(Debug, Clone)]
pub struct EventLog<C = SystemClock> {
    path: PathBuf,
    hostname: String,
    clock: C,
}

impl EventLog<SystemClock> {
    /// Creates a log appending to `path`, tagging lines with `hostname`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, hostname: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hostname: hostname.into(),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> EventLog<C> {
    /// Replaces the clock used for line stamps.
    #[must_use]
    pub fn with_clock<C2: Clock>(self, clock: C2) -> EventLog<C2> {
        EventLog {
            path: self.path,
            hostname: self.hostname,
            clock,
        }
    }

    /// Returns the log file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the clock stamping this log's lines.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Renders `message` as a complete log line (without newline).
    #[must_use]
    pub fn format_line(&self, message: &str) -> String {
        format!(
            "{} {} {}: {}",
            log_stamp(self.clock.now()),
            self.hostname,
            defaults::PROGRAM,
            message.trim_end_matches('\n')
        )
    }

    /// Appends `message` to the log file, or prints it if the file is unusable.
    pub fn append(&self, message: &str) {
        let line = self.format_line(message);
        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));

        if let Err(e) = written {
            tracing::debug!("Cannot write {}: {e}", self.path.display());
            println!("{line}");
        }
    }
}
