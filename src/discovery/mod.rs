//! Record discovery: from a hostname to the endpoints worth updating.
//!
//! A query such as `home.example.com` is split on its first dot into a
//! hostname label (`home`) and an optional domain (`example.com`). Every
//! matching domain is searched for records with exactly that label whose
//! target is not an IPv6 literal.

mod error;


use std::collections::BTreeMap;

pub use error::DiscoveryError;

use crate::api::{Domain, HttpClient, LinodeClient};

/// A parsed `host[.domain]` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostQuery {
    /// Hostname label to match against record names.
    pub host: String,
    /// Domain to restrict the search to, `None` for every domain.
    pub domain: Option<String>,
}

impl HostQuery {
    /// Splits `query` on its first dot.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let (host, domain) = query.split_once('.').unwrap_or((query, ""));
        Self {
            host: host.to_string(),
            domain: (!domain.is_empty()).then(|| domain.to_string()),
        }
    }

    /// Returns true if records of `domain` should be searched.
    #[must_use]
    pub fn includes(&self, domain: &Domain) -> bool {
        self.domain.as_deref().is_none_or(|wanted| wanted == domain.name)
    }
}

/// Endpoints found for a [`HostQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Endpoints in discovery order (domains ascending, records in provider order).
    pub endpoints: Vec<String>,
    /// Endpoints grouped by domain name.
    pub by_domain: BTreeMap<String, Vec<String>>,
}

impl Discovery {
    /// Number of endpoints found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Returns true if nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Endpoints joined by spaces, as stored in the settings `records` field.
    #[must_use]
    pub fn records_value(&self) -> String {
        self.endpoints.join(" ")
    }

    fn push(&mut self, domain: &str, endpoint: String) {
        self.by_domain
            .entry(domain.to_string())
            .or_default()
            .push(endpoint.clone());
        self.endpoints.push(endpoint);
    }
}

/// Lists the account's domains sorted by name.
///
/// # Errors
///
/// Returns [`DiscoveryError::NoDomains`] for an empty account, or the
/// underlying API error.
pub async fn list_domains<H: HttpClient>(
    client: &LinodeClient<H>,
) -> Result<Vec<Domain>, DiscoveryError> {
    let domains = client.domains().await?;
    if domains.is_empty() {
        return Err(DiscoveryError::NoDomains);
    }
    Ok(domains)
}

/// Finds the IPv4 records matching `query` across `domains`.
///
/// Domains are visited in ascending name order whatever order `domains`
/// comes in. A domain without matching records is not an error on its own.
///
/// # Errors
///
/// Returns [`DiscoveryError::NoMatchingRecords`] when nothing matched
/// anywhere, or the underlying API error.
pub async fn find_records<H: HttpClient>(
    client: &LinodeClient<H>,
    domains: &[Domain],
    query: &HostQuery,
) -> Result<Discovery, DiscoveryError> {
    let mut visit: Vec<&Domain> = domains.iter().filter(|d| query.includes(d)).collect();
    visit.sort();

    let mut discovery = Discovery::default();
    for domain in visit {
        let records = client.records(domain).await?;
        tracing::debug!("{} has {} record(s)", domain.name, records.len());
        for record in records {
            if record.name == query.host && !record.target.is_empty() && !record.targets_ipv6() {
                discovery.push(&domain.name, record.endpoint(domain));
            }
        }
    }

    if discovery.is_empty() {
        return Err(DiscoveryError::NoMatchingRecords {
            query: match &query.domain {
                Some(domain) => format!("{}.{domain}", query.host),
                None => query.host.clone(),
            },
        });
    }
    Ok(discovery)
}
