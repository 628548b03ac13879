//! Error types for configuration loading, saving and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Every variant is fatal and is raised before any network access.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API token in the settings file.
    #[error("No token configured in '{}'", path.display())]
    MissingToken {
        /// Settings file that was consulted
        path: PathBuf,
    },

    /// Scheduled run without any record endpoints.
    #[error("Records not configured in {}", path.display())]
    MissingRecords {
        /// Settings file that was consulted
        path: PathBuf,
    },

    /// Token entered interactively has the wrong shape.
    #[error("Invalid token '{token}', should be {expected} characters long")]
    InvalidToken {
        /// The rejected token
        token: String,
        /// Required length
        expected: usize,
    },

    /// Failed to read an interactive answer.
    #[error("Failed to read answer: {0}")]
    Prompt(#[source] std::io::Error),

    /// Failed to create the configuration folder.
    #[error("Failed to create config folder '{}': {source}", path.display())]
    FolderCreate {
        /// Folder path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the settings file.
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the settings.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
