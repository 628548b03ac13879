//! linode-ddns: dynamic DNS for Linode-hosted zones
//!
//! A library for pointing Linode DNS records at the host's current IPv4
//! address, detected from the kernel route table, without redundant
//! provider calls.

pub mod api;
pub mod config;
pub mod discovery;
pub mod event_log;
pub mod host;
pub mod network;
pub mod prompt;
pub mod state;
pub mod time;
pub mod update;
