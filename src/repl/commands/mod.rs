//! # Command Implementations
//!
//! The command trait, its registry, alias table and suggestion helpers,
//! plus every built-in command organized by category.

pub mod alias;
pub mod command;
pub mod context;
pub mod events;
pub mod network;
pub mod profile;
pub mod registry;
pub mod sections;
pub mod suggest;
pub mod system;

use std::sync::Arc;

pub use alias::AliasTable;
pub use command::{Command, CommandSummary};
pub use context::CommandContext;
pub use events::CommandEvent;
pub use registry::CommandRegistry;
pub use sections::{render_section, Section};

/// Built-in commands in help/registration order
pub fn builtin_commands() -> Vec<Arc<dyn Command>> {
    use network::FetchCommand;
    use profile::{CatCommand, HelpCommand, LsCommand, WhoamiCommand};
    use sections::{EasterEggCommand, SectionCommand, StatusCommand};
    use system::{ClearCommand, ExitCommand, MuteCommand, ScrollCommand, ThemeCommand};

    vec![
        Arc::new(HelpCommand),
        Arc::new(LsCommand),
        Arc::new(CatCommand),
        Arc::new(WhoamiCommand),
        Arc::new(StatusCommand),
        Arc::new(SectionCommand::new("blog", "latest posts", Section::Blog)),
        Arc::new(SectionCommand::new("skills", "what I work with", Section::Skills)),
        Arc::new(SectionCommand::new("social", "where to find me", Section::Social)),
        Arc::new(SectionCommand::new("contact", "get in touch", Section::Contact)),
        Arc::new(SectionCommand::new("timeline", "career milestones", Section::Timeline)),
        Arc::new(SectionCommand::new(
            "achievements",
            "highlights",
            Section::Achievements,
        )),
        Arc::new(FetchCommand),
        Arc::new(ThemeCommand),
        Arc::new(ScrollCommand),
        Arc::new(EasterEggCommand),
        Arc::new(MuteCommand),
        Arc::new(ClearCommand),
        Arc::new(ExitCommand),
    ]
}
