//! Canned responses standing in for the network and the host.
//!
//! A settings file may carry a `_mock` object mapping a call identifier to
//! the response that call should get:
//!
//! ```json
//! "_mock": {
//!   "domains": {"data": [{"id": 1, "domain": "d1.com"}]},
//!   "records": {"data": [{"id": 3, "name": "home", "target": "1.2.3.4"}]},
//!   "/bin/ip": "default via 1.2.3.1 dev eth0\n1.2.3.0/23 dev eth0 src 1.2.3.5",
//!   "/bin/hostname": "test-router"
//! }
//! ```
//!
//! API calls are identified by the last segment of their URL path, host
//! commands by program name. Keys written as paths match on their last
//! `/` segment, so `/bin/ip` and `ip` are equivalent.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::network::StaticRoutes;

/// Identifier of the route table entry.
pub const ROUTES_KEY: &str = "ip";

/// Identifier of the hostname entry.
pub const HOSTNAME_KEY: &str = "hostname";

/// Mapping from call identifier to canned response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ReplayTable {
    entries: BTreeMap<String, serde_json::Value>,
}

impl ReplayTable {
    /// Builds a table from `(key, response)` pairs.
    pub fn from_entries<K: Into<String>>(
        entries: impl IntoIterator<Item = (K, serde_json::Value)>,
    ) -> Self {
        Self {
            entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns the canned response for the call identified by `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key).or_else(|| {
            self.entries
                .iter()
                .find(|(name, _)| name.rsplit('/').next() == Some(key))
                .map(|(_, value)| value)
        })
    }

    /// Returns the canned response as text (strings verbatim, other values as JSON).
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).map(|value| match value {
            serde_json::Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    /// Returns a route table serving the canned `ip` output.
    ///
    /// A missing entry yields an empty table, i.e. an undetectable IP.
    #[must_use]
    pub fn routes(&self) -> StaticRoutes {
        StaticRoutes::new(self.text(ROUTES_KEY).unwrap_or_default())
    }

    /// Returns the canned hostname, if any.
    #[must_use]
    pub fn hostname(&self) -> Option<String> {
        self.text(HOSTNAME_KEY).map(|name| name.trim().to_string())
    }
}

/// [`HttpClient`] answering every request from a [`ReplayTable`].
///
/// Performs no network I/O; requests without an entry fail with
/// [`HttpError::NoReplay`].
#[derive(Debug, Clone)]
pub struct ReplayClient {
    table: ReplayTable,
}

impl ReplayClient {
    /// Creates a client serving `table`.
    #[must_use]
    pub const fn new(table: ReplayTable) -> Self {
        Self { table }
    }
}

impl HttpClient for ReplayClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let key = req.resource();
        let body = self.table.text(key).ok_or_else(|| HttpError::NoReplay {
            key: key.to_string(),
        })?;
        tracing::debug!("Replaying {} {} from canned '{key}'", req.method, req.url);
        Ok(HttpResponse::ok(body.into_bytes()))
    }
}
