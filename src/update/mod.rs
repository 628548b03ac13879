//! Scheduled update run.
//!
//! One run walks a fixed sequence and stops at the first step that says so:
//!
//! 1. No records configured: fatal.
//! 2. Current IP undetectable: nothing to do.
//! 3. Current IP equals the last-IP record: nothing to do.
//! 4. PUT `{"target": ip}` to every record, in order. The first failure
//!    aborts the run; records already updated stay updated.
//! 5. Write the last-IP record (when allowed) and log one event line.
//!
//! Steps 2 and 3 touch neither the network nor any file, so a scheduler can
//! call this every few minutes at no cost.

mod error;

#[cfg(test)]
mod tests;

use std::fmt;
use std::net::Ipv4Addr;
use std::path::Path;

pub use error::UpdateError;

use crate::api::{HttpClient, LinodeClient, PutOutcome};
use crate::config::{CommitMode, ConfigError};
use crate::event_log::EventLog;
use crate::network::{RouteTable, detect_current_ip};
use crate::state::LastIpStore;
use crate::time::Clock;

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The current IP could not be determined.
    Undetected,
    /// The current IP matches the last-IP record.
    Unchanged(Ipv4Addr),
    /// Records were updated (or would have been).
    Updated(UpdateReport),
}

/// What an update run pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    /// The address the records now point to.
    pub ip: Ipv4Addr,
    /// Whether the PUTs were sent.
    pub commit: CommitMode,
    /// Descriptions of PUTs skipped in simulate mode, in order.
    pub notices: Vec<String>,
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = if self.commit.is_commit() {
            "updated"
        } else {
            "would be updated"
        };
        write!(f, "Home IP {action} to {}", self.ip)
    }
}

/// Ties route inspection, last-IP state and the Linode client together.
#[derive(Debug)]
pub struct Updater<H, R, S, C> {
    client: LinodeClient<H>,
    routes: R,
    store: S,
    log: EventLog<C>,
    persist_last_ip: bool,
}

impl<H, R, S, C> Updater<H, R, S, C>
where
    H: HttpClient,
    R: RouteTable,
    S: LastIpStore,
    C: Clock,
{
    /// Creates an updater that writes the last-IP record only when
    /// `persist_last_ip` is set.
    #[must_use]
    pub fn new(
        client: LinodeClient<H>,
        routes: R,
        store: S,
        log: EventLog<C>,
        persist_last_ip: bool,
    ) -> Self {
        Self {
            client,
            routes,
            store,
            log,
            persist_last_ip,
        }
    }

    /// Performs one update run for `records`.
    ///
    /// `settings_path` only feeds the missing-records message. The event
    /// log's clock stamps the last-IP record.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRecords`] before any other work when
    /// `records` is empty, and propagates the first failing PUT or the
    /// last-IP write failure.
    pub async fn run(
        &self,
        records: &[String],
        settings_path: &Path,
    ) -> Result<UpdateOutcome, UpdateError> {
        if records.is_empty() {
            return Err(ConfigError::MissingRecords {
                path: settings_path.to_path_buf(),
            }
            .into());
        }

        let Some(ip) = detect_current_ip(&self.routes) else {
            tracing::debug!("Current IP unknown, nothing to do");
            return Ok(UpdateOutcome::Undetected);
        };
        if self.store.load().ip() == Some(ip) {
            tracing::debug!("IP unchanged at {ip}");
            return Ok(UpdateOutcome::Unchanged(ip));
        }

        let body = serde_json::json!({ "target": ip.to_string() });
        let mut notices = Vec::new();
        for record in records {
            let path = format!("domains/{record}");
            if let PutOutcome::Simulated { notice } = self.client.put(&path, &body).await? {
                notices.push(notice);
            }
        }

        let context = records.join(" ");
        if self.persist_last_ip {
            self.store.save(ip, &context, self.log.clock().now())?;
        } else {
            tracing::debug!("Not persisting last IP {ip} (not running as root)");
        }

        let report = UpdateReport {
            ip,
            commit: self.client.commit_mode(),
            notices,
        };
        self.log.append(&report.to_string());
        Ok(UpdateOutcome::Updated(report))
    }
}
