//! CLI argument parsing using clap.
//!
//! Defines the command-line interface and the run mode it selects.

use std::path::{Path, PathBuf};

use clap::Parser;

use super::defaults;

/// Point Linode DNS records at this host's current IPv4 address.
///
/// Without `--interactive` the tool performs one scheduled update run and
/// exits; call it periodically from cron or a similar scheduler.
#[derive(Debug, Parser)]
#[command(name = "linode-ddns")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Folder holding the settings and last-IP files
    #[arg(long, short = 'c', default_value = defaults::CONFIG_FOLDER)]
    pub cfg: PathBuf,

    /// Save discovered records to the settings file (interactive lookup only)
    #[arg(long)]
    pub commit: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub debug: bool,

    /// Interactive mode: `status`, `domains`, `_ask_`, or a hostname to look up
    #[arg(long, short = 'i', value_name = "MODE")]
    pub interactive: Option<String>,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Non-interactive update run, as invoked by a scheduler.
    Scheduled,
    /// Print current and last IP.
    Status,
    /// List every domain in the account.
    Domains,
    /// Prompt for the hostname to look up.
    Ask,
    /// Look up records matching `host[.domain]`.
    Lookup(String),
}

impl Mode {
    /// Returns true for every mode except [`Mode::Scheduled`].
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        !matches!(self, Self::Scheduled)
    }
}

impl From<Option<&str>> for Mode {
    fn from(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Scheduled,
            Some("status") => Self::Status,
            Some("domains") => Self::Domains,
            Some("_ask_") => Self::Ask,
            Some(query) => Self::Lookup(query.to_string()),
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the run mode selected by `--interactive`.
    #[must_use]
    pub fn mode(&self) -> Mode {
        Mode::from(self.interactive.as_deref())
    }

    /// Returns the configuration folder with `~` expanded and made absolute.
    #[must_use]
    pub fn config_folder(&self) -> PathBuf {
        let expanded = expand_home(&self.cfg);
        std::path::absolute(&expanded).unwrap_or(expanded)
    }
}

/// Expands a leading `~` using the current user's home directory.
fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}
