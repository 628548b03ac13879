//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default configuration folder (`~` is expanded at runtime).
pub const CONFIG_FOLDER: &str = "~/.ssh";

/// Settings file name inside the configuration folder.
pub const SETTINGS_FILE: &str = "linode-ddns.json";

/// Last-IP record file name inside the configuration folder.
pub const LAST_IP_FILE: &str = ".linode-ddns-ip";

/// Event log used when the settings do not name one.
pub const LOGFILE: &str = "/var/log/messages";

/// Program name used in event log lines.
pub const PROGRAM: &str = "linode-ddns";

/// Linode API v4 base URL.
pub const API_BASE_URL: &str = "https://api.linode.com/v4";

/// Required length of a Linode personal access token.
pub const TOKEN_LENGTH: usize = 64;

/// Upper bound on pages fetched by a single paginated listing.
pub const MAX_PAGES: u32 = 10;

/// Hostname suggested by the `_ask_` prompt.
pub const ASK_HOSTNAME: &str = "home";

/// Environment variable holding a canned answer for interactive prompts.
pub const ANSWER_ENV: &str = "LINODE_DDNS_ANSWER";

/// Environment variable forcing last-IP persistence without root.
pub const FORCE_SAVE_ENV: &str = "LINODE_DDNS_FORCE_SAVE";
