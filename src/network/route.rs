//! Current IP detection from the route table.
//!
//! The address we publish is the source address the kernel uses on the
//! interface carrying the default route. `ip -4 route` prints the default
//! route without a `src`, so the address comes from another route on the
//! same device:
//!
//! ```text
//! default via 1.2.3.1 dev eth0 proto zebra
//! 1.2.3.0/23 dev eth0 proto kernel scope link src 1.2.3.5
//! ```

use std::collections::HashMap;
use std::net::Ipv4Addr;

use super::RouteTable;

/// Marker `ip` appends to routes whose carrier is down.
const LINK_DOWN: &str = "linkdown";

/// Returns the source address of the default-route interface in `table`.
///
/// Returns `None` when there is no default route, its interface has no
/// route with a source address, or that address is not IPv4.
#[must_use]
pub fn default_source(table: &str) -> Option<Ipv4Addr> {
    let mut default = None;
    let mut sources: HashMap<&str, &str> = HashMap::new();

    for line in table.lines().filter(|line| !line.contains(LINK_DOWN)) {
        let Some(device) = field(line, "dev") else {
            continue;
        };
        if line.starts_with("default") {
            default = Some(device);
        } else if let Some(source) = field(line, "src") {
            sources.insert(device, source);
        }
    }

    sources.get(default?)?.parse().ok()
}

/// Returns the word following `key`, ignoring the route's leading word.
fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut words = line.split_whitespace().skip(1);
    while let Some(word) = words.next() {
        if word == key {
            return words.next();
        }
    }
    None
}

/// Reads `routes` and returns the current IP, `None` if it cannot be told.
///
/// Failures to read the table are logged at debug level only.
pub fn detect_current_ip(routes: &impl RouteTable) -> Option<Ipv4Addr> {
    let table = match routes.dump() {
        Ok(table) => table,
        Err(e) => {
            tracing::debug!("Cannot read route table: {e}");
            return None;
        }
    };

    let ip = default_source(&table);
    if ip.is_none() {
        tracing::debug!("No source address found for the default route");
    }
    ip
}
