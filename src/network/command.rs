//! Route table read from the `ip` command.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{RouteError, RouteTable};

/// Default location of the iproute2 binary.
pub const IP_PROGRAM: &str = "/bin/ip";

/// Runs `ip -4 route` and returns its standard output.
#[derive(Debug, Clone)]
pub struct IpRouteCommand {
    program: PathBuf,
}

impl IpRouteCommand {
    /// Uses the binary at `program` instead of [`IP_PROGRAM`].
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for IpRouteCommand {
    fn default() -> Self {
        Self::new(IP_PROGRAM)
    }
}

impl RouteTable for IpRouteCommand {
    fn dump(&self) -> Result<String, RouteError> {
        let program = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(["-4", "route"])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| RouteError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RouteError::Exit {
                program,
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
