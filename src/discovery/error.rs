//! Error types for record discovery.

use thiserror::Error;

use crate::api::ApiError;

/// Error type for domain listing and record lookup.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The account has no domains at all.
    #[error("No domains found")]
    NoDomains,

    /// No IPv4 record carries the requested hostname.
    #[error("No linode DNS records matching '{query}' found")]
    NoMatchingRecords {
        /// The query as typed
        query: String,
    },

    /// The provider call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}
