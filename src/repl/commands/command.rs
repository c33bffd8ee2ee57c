//! # Command Pattern Infrastructure
//!
//! One implementation per REPL command, registered into the
//! [`CommandRegistry`](super::CommandRegistry) at startup. Commands write to
//! the session's output log directly and return [`CommandEvent`]s for work
//! the controller has to finish (network, quitting).

use anyhow::Result;

use super::{CommandContext, CommandEvent};

/// A REPL command
pub trait Command: Send + Sync {
    /// The token the user types
    fn name(&self) -> &'static str;

    /// One-line description for `help`
    fn description(&self) -> &'static str;

    /// Usage shown in `help`, e.g. `cat <file>`
    fn usage(&self) -> &'static str {
        self.name()
    }

    /// Run with the argument string (everything after the command token,
    /// internal whitespace preserved; empty when absent).
    ///
    /// An `Err` is reported inline by the dispatcher and never stops the REPL.
    fn execute(&self, arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>>;
}

/// Name, usage and description of a registered command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandSummary {
    pub fn of(command: &dyn Command) -> Self {
        Self {
            name: command.name(),
            usage: command.usage(),
            description: command.description(),
        }
    }
}
