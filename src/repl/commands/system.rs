//! Commands that act on the REPL itself: theme, scroll, clear, mute, exit.

use anyhow::Result;

use super::{Command, CommandContext, CommandEvent};
use crate::repl::commands::sections::{render_section, Section};
use crate::repl::models::{StyleClass, ThemePreference};

pub struct ThemeCommand;

impl Command for ThemeCommand {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn description(&self) -> &'static str {
        "switch color theme"
    }

    fn usage(&self) -> &'static str {
        "theme <mode>"
    }

    fn execute(&self, arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let session = &mut *ctx.session;
        match arg.trim() {
            "" => {
                let message = format!(
                    "theme: {} ({})",
                    session.theme.preference(),
                    session.theme.resolved()
                );
                session.log.print_text(message, StyleClass::Info);
            }
            "toggle" => {
                let theme = session.theme.toggle(session.store.as_mut());
                session
                    .log
                    .print_text(format!("theme set to {theme}"), StyleClass::Ok);
            }
            other => match other.parse::<ThemePreference>() {
                Ok(preference) => {
                    session.theme.set(preference, session.store.as_mut());
                    let message = match preference {
                        ThemePreference::Auto => {
                            format!("theme set to auto ({})", session.theme.resolved())
                        }
                        explicit => format!("theme set to {explicit}"),
                    };
                    session.log.print_text(message, StyleClass::Ok);
                }
                Err(_) => {
                    session.log.print_text(
                        "usage: theme <dark|light|auto|toggle>",
                        StyleClass::Err,
                    );
                }
            },
        }
        Ok(vec![])
    }
}

pub struct ScrollCommand;

impl ScrollCommand {
    fn valid_targets() -> String {
        let mut ids: Vec<&str> = Section::ALL.iter().map(|s| s.id()).collect();
        ids.extend(["top", "bottom"]);
        ids.join(", ")
    }
}

impl Command for ScrollCommand {
    fn name(&self) -> &'static str {
        "scroll"
    }

    fn description(&self) -> &'static str {
        "jump to a section"
    }

    fn usage(&self) -> &'static str {
        "scroll <section>"
    }

    fn execute(&self, arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let session = &mut *ctx.session;
        let target = arg.trim();
        match target {
            "top" => {
                session.log.print_text("scrolled to top", StyleClass::Info);
                session.log.scroll_top();
            }
            "bottom" => {
                session.log.print_text("scrolled to bottom", StyleClass::Info);
                session.log.scroll_bottom();
            }
            _ => match target.parse::<Section>() {
                Ok(section) => {
                    if !session.log.has_anchor(section.id()) {
                        render_section(section, session);
                    }
                    session
                        .log
                        .print_text(format!("scrolled to #{section}"), StyleClass::Info);
                    session.log.scroll_to_anchor(section.id());
                }
                Err(()) => {
                    let message = if target.is_empty() {
                        format!("usage: scroll <section> ({})", Self::valid_targets())
                    } else {
                        format!(
                            "scroll: no such section: {target} (try {})",
                            Self::valid_targets()
                        )
                    };
                    session.log.print_text(message, StyleClass::Err);
                }
            },
        }
        Ok(vec![])
    }
}

pub struct ClearCommand;

impl Command for ClearCommand {
    fn name(&self) -> &'static str {
        "clear"
    }

    fn description(&self) -> &'static str {
        "clear screen"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        ctx.session.log.clear();
        Ok(vec![])
    }
}

pub struct MuteCommand;

impl Command for MuteCommand {
    fn name(&self) -> &'static str {
        "mute"
    }

    fn description(&self) -> &'static str {
        "toggle key sounds"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let muted = ctx.session.sound.toggle_mute();
        ctx.session.log.print_text(
            format!("mute: {}", if muted { "on" } else { "off" }),
            StyleClass::Ok,
        );
        Ok(vec![])
    }
}

pub struct ExitCommand;

impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "leave the terminal"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        ctx.session.log.print_text("bye", StyleClass::Info);
        Ok(vec![CommandEvent::QuitRequested])
    }
}
