//! Route table source trait and error types.

use thiserror::Error;

/// Error type for reading the route table.
///
/// Callers treat every variant as "current IP unknown".
#[derive(Debug, Error)]
pub enum RouteError {
    /// The route command could not be started.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The route command exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    Exit {
        /// Program that was executed
        program: String,
        /// Exit status reported by the OS
        status: std::process::ExitStatus,
    },
}

/// Trait for reading the host's IPv4 route table as text.
///
/// The text is expected in `ip -4 route` format, one route per line.
/// Implementations exist for the real command and for canned text.
///
/// # Example
///
/// ```
/// use linode_ddns::network::{RouteTable, StaticRoutes, detect_current_ip};
///
/// let routes = StaticRoutes::new("default via 10.0.0.1 dev eth0\n10.0.0.0/24 dev eth0 src 10.0.0.7\n");
/// assert_eq!(detect_current_ip(&routes), Some("10.0.0.7".parse().unwrap()));
/// ```
pub trait RouteTable: Send + Sync {
    /// Returns the raw route table text.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] when the table cannot be produced.
    fn dump(&self) -> Result<String, RouteError>;
}

impl<T: RouteTable + ?Sized> RouteTable for &T {
    fn dump(&self) -> Result<String, RouteError> {
        (**self).dump()
    }
}

/// Route table with fixed contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRoutes {
    text: String,
}

impl StaticRoutes {
    /// Creates a table returning `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl RouteTable for StaticRoutes {
    fn dump(&self) -> Result<String, RouteError> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl RouteTable for Failing {
        fn dump(&self) -> Result<String, RouteError> {
            Err(RouteError::Spawn {
                program: "/bin/ip".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        }
    }

    #[test]
    fn static_routes_return_their_text() {
        let routes = StaticRoutes::new("default dev eth0");

        assert_eq!(routes.dump().unwrap(), "default dev eth0");
    }

    #[test]
    fn references_are_route_tables() {
        let routes = StaticRoutes::new("x");
        let by_ref: &dyn RouteTable = &routes;

        assert_eq!(by_ref.dump().unwrap(), "x");
    }

    #[test]
    fn spawn_failure_names_the_program() {
        let error = Failing.dump().unwrap_err();

        assert!(error.to_string().starts_with("Failed to run '/bin/ip': "));
    }
}
