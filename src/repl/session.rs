//! # Session
//!
//! All mutable REPL state in one place, created once at startup and handed
//! to the dispatcher and commands by `&mut`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::repl::models::{History, OutputLog, Portfolio, Theme, ThemeSetting};
use crate::repl::services::{KeyValueStore, MemoryStore, SoundBoard};

/// Cooperative cancellation signal for the typewriter.
///
/// Raised by any keystroke; the animator polls it between characters.
/// Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Session {
    pub log: OutputLog,
    pub history: History,
    pub theme: ThemeSetting,
    pub sound: SoundBoard,
    pub abort: AbortFlag,
    pub portfolio: Portfolio,
    pub store: Box<dyn KeyValueStore>,
}

impl Session {
    /// Build a session, loading history and theme from `store`
    pub fn new(
        store: Box<dyn KeyValueStore>,
        portfolio: Portfolio,
        sound: SoundBoard,
        system_theme: Theme,
    ) -> Self {
        let history = History::load(store.as_ref());
        let theme = ThemeSetting::load(store.as_ref(), system_theme);
        tracing::debug!(
            "Session loaded {} history entries, theme preference {}",
            history.len(),
            theme.preference()
        );
        Self {
            log: OutputLog::new(),
            history,
            theme,
            sound,
            abort: AbortFlag::new(),
            portfolio,
            store,
        }
    }

    /// Silent in-memory session with default content
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryStore::new()),
            Portfolio::default(),
            SoundBoard::silent(),
            Theme::Dark,
        )
    }

    /// Record a submitted line in the persisted history
    pub fn record_history(&mut self, line: &str) {
        self.history.record(line, self.store.as_mut());
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("log_entries", &self.log.len())
            .field("history", &self.history.len())
            .field("theme", &self.theme.preference())
            .field("sound", &self.sound)
            .field("aborted", &self.abort.is_raised())
            .finish()
    }
}
