//! # Theme Preference
//!
//! Tri-state light/dark/auto preference. `Auto` is the absence of a stored
//! override and defers to the terminal's own background.

use std::fmt;
use std::str::FromStr;

use crate::config::THEME_KEY;
use crate::repl::services::KeyValueStore;

/// Concrete color scheme used for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Guess the terminal background from `COLORFGBG` ("fg;bg", bg 7 or 15
    /// is light). Dark when the hint is missing.
    pub fn system() -> Theme {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    fn from_colorfgbg(value: Option<&str>) -> Theme {
        let background = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match background {
            Some(7) | Some(15) => Theme::Light,
            _ => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored user preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::Auto => "auto",
        }
    }
}

impl From<Theme> for ThemePreference {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
        }
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "auto" => Ok(ThemePreference::Auto),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current preference plus the system fallback it resolves against
#[derive(Debug, Clone)]
pub struct ThemeSetting {
    preference: ThemePreference,
    system: Theme,
}

impl ThemeSetting {
    pub fn new(preference: ThemePreference, system: Theme) -> Self {
        Self { preference, system }
    }

    /// Read the stored override; anything unreadable means `Auto`
    pub fn load(store: &dyn KeyValueStore, system: Theme) -> Self {
        let preference = match store.get(THEME_KEY) {
            Ok(Some(value)) => match value.parse::<ThemePreference>() {
                Ok(ThemePreference::Auto) | Err(_) => ThemePreference::Auto,
                Ok(explicit) => explicit,
            },
            Ok(None) => ThemePreference::Auto,
            Err(e) => {
                tracing::debug!("Theme preference unavailable: {e:#}");
                ThemePreference::Auto
            }
        };
        Self::new(preference, system)
    }

    /// Change the preference; `Auto` removes the stored override.
    /// Store failures are swallowed, the in-memory preference still applies.
    pub fn set(&mut self, preference: ThemePreference, store: &mut dyn KeyValueStore) {
        self.preference = preference;
        let result = match preference {
            ThemePreference::Auto => store.remove(THEME_KEY),
            explicit => store.set(THEME_KEY, explicit.as_str()),
        };
        if let Err(e) = result {
            tracing::warn!("Theme not persisted: {e:#}");
        }
    }

    /// Flip the resolved theme and store it explicitly
    pub fn toggle(&mut self, store: &mut dyn KeyValueStore) -> Theme {
        let next = self.resolved().toggled();
        self.set(next.into(), store);
        next
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    pub fn resolved(&self) -> Theme {
        match self.preference {
            ThemePreference::Light => Theme::Light,
            ThemePreference::Dark => Theme::Dark,
            ThemePreference::Auto => self.system,
        }
    }
}

impl Default for ThemeSetting {
    fn default() -> Self {
        Self::new(ThemePreference::Auto, Theme::Dark)
    }
}
