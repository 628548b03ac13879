//! Network layer: reading the route table and deriving the current IP.
//!
//! This module provides:
//! - The route table source abstraction ([`RouteTable`])
//! - The `ip -4 route` implementation ([`IpRouteCommand`])
//! - Canned route tables for tests and replay runs ([`StaticRoutes`])
//! - Current IP detection ([`detect_current_ip`], [`default_source`])

mod command;
mod fetcher;
mod route;


pub use command::{IP_PROGRAM, IpRouteCommand};
pub use fetcher::{RouteError, RouteTable, StaticRoutes};
pub use route::{default_source, detect_current_ip};
