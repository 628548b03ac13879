//! Settings file (`linode-ddns.json`) loading and saving.
//!
//! Only `token` and `records` are ever written back; `logfile` and `_mock`
//! are runtime overrides placed in the file by hand (mostly by tests).

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ConfigError, defaults};
use crate::api::ReplayTable;

/// Contents of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    /// Linode personal access token.
    #[serde(default)]
    pub token: Option<String>,

    /// Record endpoints (`domainID/records/recordID`) separated by whitespace.
    #[serde(default)]
    pub records: Option<String>,

    /// Event log path.
    #[serde(default)]
    pub logfile: Option<PathBuf>,

    /// Canned responses replacing the network, route table and hostname.
    #[serde(default, rename = "_mock")]
    pub replay: Option<ReplayTable>,
}

/// The persisted subset, in sorted key order.
#[derive(Serialize)]
struct Persisted<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a str>,
    token: &'a str,
}

impl Settings {
    /// Loads settings from `path`.
    ///
    /// A missing or unparsable file yields empty settings.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No settings file at {}", path.display());
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings file {}: {e}", path.display());
                return Self::default();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid settings file {}: {e}", path.display());
            Self::default()
        })
    }

    /// Returns the token, if a non-empty one is configured.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|token| !token.is_empty())
    }

    /// Returns the configured record endpoints in order, duplicates kept.
    #[must_use]
    pub fn records(&self) -> Vec<String> {
        self.records
            .as_deref()
            .map(|records| records.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Returns the event log path.
    #[must_use]
    pub fn logfile(&self) -> PathBuf {
        self.logfile
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::LOGFILE))
    }

    /// Renders the persisted subset as pretty JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let persisted = Persisted {
            records: self.records.as_deref().filter(|records| !records.is_empty()),
            token: self.token.as_deref().unwrap_or_default(),
        };
        let mut json = serde_json::to_string_pretty(&persisted)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes `token` and `records` to `path`, readable by the owner only.
    ///
    /// Nothing is written while no token is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if self.token().is_none() {
            tracing::debug!("No token set, not saving {}", path.display());
            return Ok(());
        }

        let content = self.to_json()?;
        let write_error = |source| ConfigError::FileWrite {
            path: path.to_path_buf(),
            source,
        };
        std::fs::write(path, content).map_err(write_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(write_error)?;
        }

        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

/// Checks an interactively entered token.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidToken`] unless the token has exactly
/// [`defaults::TOKEN_LENGTH`] characters.
pub fn validate_token(token: &str) -> Result<String, ConfigError> {
    let token = token.trim();
    if token.chars().count() == defaults::TOKEN_LENGTH {
        Ok(token.to_string())
    } else {
        Err(ConfigError::InvalidToken {
            token: token.to_string(),
            expected: defaults::TOKEN_LENGTH,
        })
    }
}
