//! # REPL Dispatcher
//!
//! Turns a raw input line into a command invocation:
//!
//! ```text
//! trim ─▶ alias ─▶ (empty? stop) ─▶ echo "$ line" ─▶ split token/arg
//!      ─▶ registry hit:  run handler, report its error inline
//!      ─▶ registry miss: "command not found", maybe "did you mean"
//! ```
//!
//! Each dispatch is independent: nothing a command does can stop the REPL.

use crate::repl::commands::{
    suggest, AliasTable, CommandContext, CommandEvent, CommandRegistry, CommandSummary,
};
use crate::repl::models::StyleClass;
use crate::repl::services::{FetchPolicy, HttpService};
use crate::repl::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    /// Ready for input
    Idle,
    /// A handler (or the fetch it requested) is running
    Executing,
}

/// What the controller should do after a line ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplOutcome {
    Continue,
    Quit,
}

/// Split into the command token and the rest. The first whitespace run is
/// the delimiter; the rest keeps its internal whitespace.
pub fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim_start()),
        None => (line, ""),
    }
}

pub struct Repl {
    registry: CommandRegistry,
    aliases: AliasTable,
    catalog: Vec<CommandSummary>,
    fetch_policy: FetchPolicy,
    state: ReplState,
}

impl Repl {
    pub fn new(registry: CommandRegistry, aliases: AliasTable, fetch_policy: FetchPolicy) -> Self {
        let catalog = registry.list_all();
        Self {
            registry,
            aliases,
            catalog,
            fetch_policy,
            state: ReplState::Idle,
        }
    }

    /// Built-in commands and aliases
    pub fn with_builtins(fetch_policy: FetchPolicy) -> Self {
        Self::new(
            CommandRegistry::with_builtins(),
            AliasTable::default(),
            fetch_policy,
        )
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run one line synchronously. Deferred work comes back as events.
    pub fn dispatch(&mut self, raw: &str, session: &mut Session) -> Vec<CommandEvent> {
        let line = self.aliases.resolve(raw.trim());
        if line.is_empty() {
            return Vec::new();
        }

        session
            .log
            .print_text(format!("$ {line}"), StyleClass::Prompt);
        let (name, arg) = split_command(line);

        let Some(command) = self.registry.lookup(name) else {
            let message = match self.suggest(name) {
                Some(close) => format!("command not found: {name} (did you mean '{close}'?)"),
                None => format!("command not found: {name}"),
            };
            tracing::debug!("{message}");
            session.log.print_text(message, StyleClass::Err);
            return Vec::new();
        };

        tracing::debug!("Dispatching '{name}' with arg {arg:?}");
        self.state = ReplState::Executing;
        let mut ctx = CommandContext::new(session, &self.catalog, &self.aliases, &self.fetch_policy);
        let events = match command.execute(arg, &mut ctx) {
            Ok(events) => events,
            Err(e) => {
                tracing::warn!("Command '{name}' failed: {e:#}");
                session
                    .log
                    .print_text(format!("{name}: {e}"), StyleClass::Err);
                Vec::new()
            }
        };
        self.state = ReplState::Idle;
        events
    }

    /// Run one line and finish whatever it requested. The caller awaits
    /// this before reading more input, so fetches never overlap.
    pub async fn execute(
        &mut self,
        raw: &str,
        session: &mut Session,
        http: &HttpService,
    ) -> ReplOutcome {
        let events = self.dispatch(raw, session);
        self.apply(events, session, http).await
    }

    /// Carry out the deferred work of a dispatch
    pub async fn apply(
        &mut self,
        events: Vec<CommandEvent>,
        session: &mut Session,
        http: &HttpService,
    ) -> ReplOutcome {
        let mut outcome = ReplOutcome::Continue;
        for event in events {
            match event {
                CommandEvent::FetchRequested { url } => {
                    self.state = ReplState::Executing;
                    match http.fetch_json(&url).await {
                        Ok(body) => {
                            session.log.print_text(body, StyleClass::Ok);
                        }
                        Err(e) => {
                            tracing::info!("fetch {url} failed: {e}");
                            session
                                .log
                                .print_text(format!("fetch: {e}"), StyleClass::Err);
                        }
                    }
                    self.state = ReplState::Idle;
                }
                CommandEvent::QuitRequested => outcome = ReplOutcome::Quit,
            }
        }
        outcome
    }

    /// "Did you mean" candidate for an unknown command token
    pub fn suggest(&self, token: &str) -> Option<&'static str> {
        suggest::suggest(token, self.registry.names())
    }

    /// Command names starting with `prefix`
    pub fn complete(&self, prefix: &str) -> Vec<&'static str> {
        suggest::complete(prefix, self.registry.names())
    }

    /// Live autocomplete: the untyped remainder of the first command that
    /// extends `input`, while the user is still on the first token
    pub fn hint(&self, input: &str) -> Option<&'static str> {
        if input.is_empty() || input.contains(char::is_whitespace) {
            return None;
        }
        self.complete(input)
            .into_iter()
            .find(|name| name.len() > input.len())
            .map(|name| &name[input.len()..])
    }

    /// Tab completion of the first token. Returns the new line, or `None`
    /// when nothing changes; several matches extend to their common prefix
    /// and are listed in the log when that prefix is already typed.
    pub fn tab_complete(&self, input: &str, session: &mut Session) -> Option<String> {
        if input.is_empty() || input.contains(char::is_whitespace) {
            return None;
        }
        let matches = self.complete(input);
        match matches.as_slice() {
            [] => None,
            [only] => Some(format!("{only} ")),
            many => {
                let shared = suggest::common_prefix(many);
                if shared.len() > input.len() {
                    Some(shared.to_string())
                } else {
                    session.log.print_text(many.join("  "), StyleClass::Info);
                    None
                }
            }
        }
    }
}
