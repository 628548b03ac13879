//! Linode API layer.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Canned responses for offline runs ([`ReplayTable`], [`ReplayClient`])
//! - The authenticated Linode client with pagination ([`LinodeClient`])
//! - Domain and record objects ([`Domain`], [`Record`])

mod client;
mod error;
mod http;
mod linode;
mod model;
mod replay;

#[cfg(test)]
pub(crate) mod mock;

#[cfg(test)]
mod http_tests;
#[cfg(test)]
mod replay_tests;

pub use client::ReqwestClient;
pub use error::{ApiError, HttpError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use linode::{LinodeClient, PutOutcome};
pub use model::{Domain, Record, ResourceId};
pub use replay::{HOSTNAME_KEY, ROUTES_KEY, ReplayClient, ReplayTable};
