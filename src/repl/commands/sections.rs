//! Portfolio sections: the commands that show static content, and the
//! renderers `scroll` reuses to bring a section into the log.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

use super::{Command, CommandContext, CommandEvent};
use crate::repl::models::{Content, MetricKind, Span, SpanKind, StyleClass};
use crate::repl::session::Session;

/// Named section of the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Projects,
    Skills,
    Blog,
    Timeline,
    Achievements,
    Contact,
    Social,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Blog,
        Section::Timeline,
        Section::Achievements,
        Section::Contact,
        Section::Social,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Blog => "blog",
            Section::Timeline => "timeline",
            Section::Achievements => "achievements",
            Section::Contact => "contact",
            Section::Social => "social",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_start_matches('#');
        Section::ALL.into_iter().find(|sec| sec.id() == s).ok_or(())
    }
}

fn heading(title: &str) -> Span {
    Span::new(title, SpanKind::Heading)
}

/// Append a section to the log; its first entry carries the section anchor
pub fn render_section(section: Section, session: &mut Session) {
    let portfolio = &session.portfolio;
    let (first, rest): (Content, Vec<(Content, StyleClass)>) = match section {
        Section::About => (
            Content::plain(&portfolio.headline),
            vec![(Content::plain(&portfolio.details), StyleClass::Info)],
        ),
        Section::Projects => {
            let mut spans = vec![heading("Projects")];
            if let Some(file) = portfolio.file("projects") {
                spans.push(Span::text("\n"));
                spans.push(Span::link(format!("[{}]", file.label), portfolio.absolute(&file.href)));
            }
            (Content::Rich(spans), vec![])
        }
        Section::Skills => {
            let mut spans = vec![heading("Skills")];
            for group in &portfolio.skills {
                spans.push(Span::text(format!("\n{:<10}", group.name)));
                spans.push(Span::new(group.items.join(", "), SpanKind::Ok));
            }
            (Content::Rich(spans), vec![])
        }
        Section::Blog => {
            let mut spans = vec![heading("Blog")];
            for post in &portfolio.blog {
                spans.push(Span::new(format!("\n{}  ", post.date), SpanKind::Dim));
                spans.push(Span::link(&post.title, portfolio.absolute(&post.href)));
            }
            if portfolio.blog.is_empty() {
                spans.push(Span::new("\nno posts yet", SpanKind::Dim));
            }
            (Content::Rich(spans), vec![])
        }
        Section::Timeline => {
            let mut spans = vec![heading("Timeline")];
            for milestone in &portfolio.timeline {
                spans.push(Span::new(format!("\n{:<8}", milestone.period), SpanKind::Num));
                spans.push(Span::text(&milestone.title));
            }
            (Content::Rich(spans), vec![])
        }
        Section::Achievements => {
            let mut spans = vec![heading("Achievements")];
            for item in &portfolio.achievements {
                spans.push(Span::text(format!("\n• {item}")));
            }
            (Content::Rich(spans), vec![])
        }
        Section::Contact => {
            let mut spans = vec![heading("Contact")];
            if let Some(email) = &portfolio.contact.email {
                spans.push(Span::text("\nemail  "));
                spans.push(Span::link(email, format!("mailto:{email}")));
            }
            spans.push(Span::text("\nform   "));
            spans.push(Span::link(
                "[open contact form]",
                portfolio.absolute(&portfolio.contact.form_href),
            ));
            (Content::Rich(spans), vec![])
        }
        Section::Social => {
            let mut spans = vec![heading("Social")];
            for link in &portfolio.social {
                spans.push(Span::text(format!("\n{:<8}", link.label)));
                spans.push(Span::link(&link.href, &link.href));
            }
            (Content::Rich(spans), vec![])
        }
    };

    session
        .log
        .append_anchored(first, StyleClass::Ok, section.id());
    for (content, style) in rest {
        session.log.append(content, style);
    }
}

/// Command that shows one section
pub struct SectionCommand {
    name: &'static str,
    description: &'static str,
    section: Section,
}

impl SectionCommand {
    pub const fn new(name: &'static str, description: &'static str, section: Section) -> Self {
        Self {
            name,
            description,
            section,
        }
    }
}

impl Command for SectionCommand {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        render_section(self.section, ctx.session);
        Ok(vec![])
    }
}

pub struct StatusCommand;

impl Command for StatusCommand {
    fn name(&self) -> &'static str {
        "status"
    }

    fn description(&self) -> &'static str {
        "node ops summary"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let mut spans = Vec::new();
        for (i, metric) in ctx.session.portfolio.status.iter().enumerate() {
            let newline = if i == 0 { "" } else { "\n" };
            spans.push(Span::text(format!("{newline}{}: ", metric.label)));
            let kind = match metric.kind {
                MetricKind::Ok => SpanKind::Ok,
                MetricKind::Num => SpanKind::Num,
            };
            spans.push(Span::new(&metric.value, kind));
        }
        if spans.is_empty() {
            spans.push(Span::text("System: unknown"));
        }
        ctx.session.log.print_rich(spans, StyleClass::Ok);
        Ok(vec![])
    }
}

const EASTER_EGG: &str = r#"   _________
  |  _   _  |
  | |_| |_| |   there is no spoon,
  |    _    |   only a REPL.
  |___|_|___|"#;

pub struct EasterEggCommand;

impl Command for EasterEggCommand {
    fn name(&self) -> &'static str {
        "easter-egg"
    }

    fn description(&self) -> &'static str {
        "you found it"
    }

    fn execute(&self, _arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        ctx.session.log.print_text(EASTER_EGG, StyleClass::Info);
        ctx.session
            .log
            .print_rich(vec![Span::new("+1 curiosity", SpanKind::Num)], StyleClass::Ok);
        Ok(vec![])
    }
}
