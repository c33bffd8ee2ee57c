//! Configuration constants and utilities for termfolio
//!
//! Fixed limits of the REPL plus the environment overrides for where
//! state and logs live.

use std::path::PathBuf;
use std::time::Duration;

/// Default location of the key-value store backing history and theme
pub const DEFAULT_STORE_PATH: &str = "~/.termfolio/storage.json";

/// Environment variable name for overriding the store path
pub const STORE_PATH_ENV_VAR: &str = "TERMFOLIO_STORE_PATH";

/// Environment variable holding the tracing filter (e.g. `debug`, `termfolio=trace`)
pub const LOG_LEVEL_ENV_VAR: &str = "TERMFOLIO_LOG";

/// Environment variable naming the log file; logging is off when unset
pub const LOG_FILE_ENV_VAR: &str = "TERMFOLIO_LOG_FILE";

/// Store key of the persisted command history
pub const HISTORY_KEY: &str = "cli_history";

/// Store key of the persisted theme override
pub const THEME_KEY: &str = "theme";

/// Maximum number of remembered commands
pub const HISTORY_CAPACITY: usize = 100;

/// Maximum number of entries kept in the output log
pub const OUTPUT_CAPACITY: usize = 70;

/// Rows from the bottom edge that still count as "at the bottom"
pub const SCROLL_PIN_TOLERANCE: usize = 1;

/// Suggestions must be strictly closer than this edit distance
pub const SUGGESTION_THRESHOLD: usize = 3;

/// Per-character delay of the boot typewriter
pub const DEFAULT_BOOT_DELAY: Duration = Duration::from_millis(16);

/// Pause between two boot lines
pub const BOOT_LINE_PAUSE: Duration = Duration::from_millis(120);

/// Upper bound (inclusive) of the random typing jitter in milliseconds
pub const TYPING_JITTER_MS: u64 = 5;

/// Maximum characters of a pretty-printed fetch response
pub const FETCH_CHAR_BUDGET: usize = 2000;

/// Hosts reachable by `fetch` besides the site's own origin
pub const FETCH_ALLOWED_HOSTS: &[&str] = &["api.github.com", "github.com"];

/// Origin the portfolio is served from when none is configured
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Version tag of the on-disk asset cache
pub const CACHE_VERSION: &str = "termfolio-v1";

/// Get the store path, checking environment variable first, then falling back to default
pub fn get_store_path() -> String {
    std::env::var_os(STORE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
}

/// Expand `~` and environment references in a user supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::full(path).map_or_else(|_| path.to_string(), |p| p.into_owned()))
}

/// Directory holding the asset cache, next to the store file
pub fn cache_root_for(store_path: &std::path::Path) -> PathBuf {
    store_path
        .parent()
        .map(|dir| dir.join("cache"))
        .unwrap_or_else(|| PathBuf::from("cache"))
}
