//! Runtime options decided once at startup.
//!
//! Everything here comes from the execution context (effective user,
//! environment) and is passed explicitly to the components that need it.

use std::fmt;

use super::defaults;
use crate::prompt::AnswerSource;

/// Whether mutating API calls are transmitted or only described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Send PUT requests to the provider.
    Commit,
    /// Describe PUT requests without sending them.
    Simulate,
}

impl CommitMode {
    /// Commits when running as root, simulates otherwise.
    #[must_use]
    pub fn detect() -> Self {
        if is_root() {
            Self::Commit
        } else {
            Self::Simulate
        }
    }

    /// Returns true for [`CommitMode::Commit`].
    #[must_use]
    pub const fn is_commit(self) -> bool {
        matches!(self, Self::Commit)
    }
}

impl fmt::Display for CommitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => write!(f, "commit"),
            Self::Simulate => write!(f, "simulate"),
        }
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    // SAFETY: geteuid has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
const fn is_root() -> bool {
    false
}

/// Options derived from the execution context.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Commit or simulate provider updates.
    pub commit: CommitMode,
    /// Persist the last-IP record even when simulating.
    pub force_last_ip: bool,
    /// Where interactive answers come from.
    pub answers: AnswerSource,
}

impl RuntimeOptions {
    /// Reads the options from the effective user id and the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let answers = std::env::var(defaults::ANSWER_ENV)
            .ok()
            .filter(|answer| !answer.is_empty())
            .map_or(AnswerSource::Terminal, AnswerSource::Canned);
        let force_last_ip = std::env::var_os(defaults::FORCE_SAVE_ENV)
            .is_some_and(|value| !value.is_empty());

        Self {
            commit: CommitMode::detect(),
            force_last_ip,
            answers,
        }
    }

    /// Returns true when the last-IP record may be written.
    #[must_use]
    pub const fn persists_last_ip(&self) -> bool {
        self.commit.is_commit() || self.force_last_ip
    }
}
