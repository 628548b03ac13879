//! Error types for update runs.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::state::StateError;

/// Error type for a scheduled update run.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// The settings do not allow a run.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A PUT failed; later records were not attempted.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The records were updated but the last-IP record could not be written.
    #[error(transparent)]
    State(#[from] StateError),
}
