//! Domain and record objects as returned by the Linode API.

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;

/// Opaque provider identifier (numeric in practice, rendered verbatim).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric id.
    Number(u64),
    /// Any other id representation.
    Text(String),
}

impl Default for ResourceId {
    /// Stands in for an entry the provider returned without an id.
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A DNS zone in the account.
///
/// Domains compare and order by name only, so sorting a listing gives a
/// deterministic visiting order.
#[derive(Debug, Clone, Deserialize)]
pub struct Domain {
    /// Provider id, empty when the entry carries none.
    #[serde(default)]
    pub id: ResourceId,
    /// Zone type (`master`, `slave`).
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Fully qualified zone name.
    #[serde(default, rename = "domain")]
    pub name: String,
    /// Zone status (`active`, `disabled`, ...).
    #[serde(default)]
    pub status: String,
}

impl PartialEq for Domain {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Domain {}

impl PartialOrd for Domain {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Domain {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// A resource record inside one [`Domain`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    /// Provider id, empty when the entry carries none.
    #[serde(default)]
    pub id: ResourceId,
    /// Hostname label (`home`, `www`, empty for the apex).
    #[serde(default)]
    pub name: String,
    /// Record value (an address for A/AAAA records).
    #[serde(default)]
    pub target: String,
}

impl Record {
    /// Returns true when the target looks like an IPv6 literal.
    #[must_use]
    pub fn targets_ipv6(&self) -> bool {
        self.target.contains(':')
    }

    /// Endpoint path of this record relative to `domains/`.
    #[must_use]
    pub fn endpoint(&self, domain: &Domain) -> String {
        format!("{}/records/{}", domain.id, self.id)
    }
}
