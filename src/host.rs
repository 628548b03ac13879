//! Local hostname lookup.

/// Returns this machine's hostname, or an empty string if it cannot be read.
#[must_use]
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .map(|name| name.trim().to_string())
        .unwrap_or_default()
}
