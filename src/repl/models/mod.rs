//! # Models
//!
//! Plain state owned by the session: the output log, command history,
//! prompt line, theme preference and the portfolio content.

pub mod history;
pub mod input_line;
pub mod output_log;
pub mod portfolio;
pub mod theme;

pub use history::History;
pub use input_line::{Focus, InputLine};
pub use output_log::{
    sanitize, Content, EntryId, OutputEntry, OutputLog, Span, SpanKind, StyleClass, Viewport,
};
pub use portfolio::{Contact, FileEntry, Link, Metric, MetricKind, Milestone, Portfolio, Post, SkillGroup};
pub use theme::{Theme, ThemePreference, ThemeSetting};
