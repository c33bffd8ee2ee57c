//! # Aliases
//!
//! Static shorthand table. Resolution is single-level: an expansion is
//! never resolved again.

#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<(&'static str, &'static str)>,
}

impl AliasTable {
    pub fn new(entries: Vec<(&'static str, &'static str)>) -> Self {
        Self { entries }
    }

    /// Expansion of `token`, or `token` itself when it is not an alias
    pub fn resolve<'a>(&self, token: &'a str) -> &'a str {
        self.entries
            .iter()
            .find(|(short, _)| *short == token)
            .map(|(_, expansion)| *expansion)
            .unwrap_or(token)
    }

    /// Shorthands expanding to exactly `command_line`
    pub fn shorthands_for<'s>(&'s self, command_line: &'s str) -> impl Iterator<Item = &'static str> + 's {
        self.entries
            .iter()
            .filter(move |(_, expansion)| *expansion == command_line)
            .map(|(short, _)| *short)
    }

    pub fn entries(&self) -> &[(&'static str, &'static str)] {
        &self.entries
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new(vec![
            ("h", "help"),
            ("r", "cat resume"),
            ("p", "cat projects"),
            ("c", "clear"),
        ])
    }
}
