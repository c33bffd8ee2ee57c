//! Commands about the profile itself: help, ls, cat, whoami.

use anyhow::Result;

use super::{Command, CommandContext, CommandEvent};
use crate::repl::commands::sections::{render_section, Section};
use crate::repl::models::{Span, SpanKind, StyleClass};

const HELP_COLUMN: usize = 14;

pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "list available commands"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let mut spans = vec![Span::new(
            format!("{:<width$}DESCRIPTION", "COMMAND", width = HELP_COLUMN),
            SpanKind::Heading,
        )];
        for summary in ctx.catalog {
            let shorthands: Vec<_> = ctx.aliases.shorthands_for(summary.name).collect();
            let label = if shorthands.is_empty() {
                summary.usage.to_string()
            } else {
                format!("{} ({})", summary.usage, shorthands.join(", "))
            };
            spans.push(Span::text(format!("\n{label:<width$}{}", summary.description, width = HELP_COLUMN)));
        }
        // shorthands for whole command lines get their own rows
        for (short, expansion) in ctx.aliases.entries() {
            if expansion.contains(' ') {
                spans.push(Span::text(format!("\n{short:<width$}{expansion}", width = HELP_COLUMN)));
            }
        }
        ctx.session.log.print_rich(spans, StyleClass::Ok);
        Ok(vec![])
    }
}

pub struct LsCommand;

impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    fn description(&self) -> &'static str {
        "list available files"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let names: Vec<_> = ctx
            .session
            .portfolio
            .files
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        let listing = if names.is_empty() {
            "(empty)".to_string()
        } else {
            names.join("  ")
        };
        ctx.session.log.print_text(listing, StyleClass::Ok);
        Ok(vec![])
    }
}

pub struct CatCommand;

impl Command for CatCommand {
    fn name(&self) -> &'static str {
        "cat"
    }

    fn description(&self) -> &'static str {
        "view resume or projects"
    }

    fn usage(&self) -> &'static str {
        "cat <file>"
    }

    fn execute(&self, arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let portfolio = &ctx.session.portfolio;
        match portfolio.file(arg) {
            Some(file) => {
                let spans = vec![
                    Span::text(format!("Opening {arg}... ")),
                    Span::link(format!("[{}]", file.label), portfolio.absolute(&file.href)),
                ];
                tracing::debug!("cat {arg} -> {}", file.href);
                ctx.session.log.print_rich(spans, StyleClass::Ok);
            }
            None => {
                ctx.session
                    .log
                    .print_text(format!("cat: {arg}: No such file"), StyleClass::Err);
            }
        }
        Ok(vec![])
    }
}

pub struct WhoamiCommand;

impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    fn description(&self) -> &'static str {
        "profile info"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        render_section(Section::About, ctx.session);
        Ok(vec![])
    }
}
