//! # Command Registry
//!
//! Name-indexed set of commands, filled once at startup and read-only
//! afterwards. Listing preserves registration order, which also decides
//! ties in suggestions and completions.

use std::collections::HashMap;
use std::sync::Arc;

use super::{builtin_commands, Command, CommandSummary};

// Type alias for complex Command type
type CommandArc = Arc<dyn Command>;

#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<CommandArc>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in command
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for command in builtin_commands() {
            registry.register(command);
        }
        registry
    }

    /// Add a command. A second registration under the same name replaces
    /// the first in place, so names stay unique.
    pub fn register(&mut self, command: CommandArc) {
        let name = command.name();
        match self.index.get(name) {
            Some(&slot) => {
                tracing::warn!("Command '{name}' registered twice; the later one wins");
                self.commands[slot] = command;
            }
            None => {
                self.index.insert(name, self.commands.len());
                self.commands.push(command);
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<CommandArc> {
        self.index
            .get(name)
            .map(|&slot| Arc::clone(&self.commands[slot]))
    }

    /// Every command in registration order
    pub fn list_all(&self) -> Vec<CommandSummary> {
        self.commands
            .iter()
            .map(|c| CommandSummary::of(c.as_ref()))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name())
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}
