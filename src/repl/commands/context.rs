//! # Command Context
//!
//! What a command may touch while it runs.

use crate::repl::commands::{AliasTable, CommandSummary};
use crate::repl::services::FetchPolicy;
use crate::repl::session::Session;

pub struct CommandContext<'a> {
    pub session: &'a mut Session,
    /// Every registered command in registration order
    pub catalog: &'a [CommandSummary],
    pub aliases: &'a AliasTable,
    pub fetch_policy: &'a FetchPolicy,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        session: &'a mut Session,
        catalog: &'a [CommandSummary],
        aliases: &'a AliasTable,
        fetch_policy: &'a FetchPolicy,
    ) -> Self {
        Self {
            session,
            catalog,
            aliases,
            fetch_policy,
        }
    }
}
