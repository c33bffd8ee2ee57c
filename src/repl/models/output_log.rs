//! # Output Log Model
//!
//! The scrolling log of rendered lines shown above the prompt. The log is
//! capacity-bounded (oldest entries pruned first) and owns the viewport
//! state, including whether the view is pinned to the bottom.

use std::collections::VecDeque;

use crate::config::{OUTPUT_CAPACITY, SCROLL_PIN_TOLERANCE};

/// Style class of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Ok,
    Err,
    Info,
    Prompt,
}

/// Kind of a rich text span, mapped to colors by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    /// Inherit the entry's style class
    Text,
    /// Emphasised "good" value
    Ok,
    /// Numeric metric
    Num,
    /// Section heading
    Heading,
    /// De-emphasised text
    Dim,
    /// Hyperlink to `href`
    Link { href: String },
}

/// A run of text with one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub kind: SpanKind,
}

impl Span {
    pub fn new(text: impl AsRef<str>, kind: SpanKind) -> Self {
        Self {
            text: sanitize(text.as_ref()),
            kind,
        }
    }

    pub fn text(text: impl AsRef<str>) -> Self {
        Self::new(text, SpanKind::Text)
    }

    pub fn link(label: impl AsRef<str>, href: impl AsRef<str>) -> Self {
        Self::new(
            label,
            SpanKind::Link {
                href: sanitize(href.as_ref()),
            },
        )
    }
}

/// Content of a log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text, always stored escaped
    Plain(String),
    /// Pre-built styled spans; newlines inside spans start new rows
    Rich(Vec<Span>),
}

impl Content {
    /// Plain text content. Control characters are neutralised so that
    /// arbitrary input can never emit terminal escape sequences.
    pub fn plain(text: impl AsRef<str>) -> Self {
        Content::Plain(sanitize(text.as_ref()))
    }

    /// The text without styling
    pub fn text(&self) -> String {
        match self {
            Content::Plain(text) => text.clone(),
            Content::Rich(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
        }
    }

    /// Split into display rows of spans
    pub fn rows(&self) -> Vec<Vec<Span>> {
        let spans = match self {
            Content::Plain(text) => vec![Span {
                text: text.clone(),
                kind: SpanKind::Text,
            }],
            Content::Rich(spans) => spans.clone(),
        };

        let mut rows: Vec<Vec<Span>> = vec![Vec::new()];
        for span in spans {
            for (i, piece) in span.text.split('\n').enumerate() {
                if i > 0 {
                    rows.push(Vec::new());
                }
                if !piece.is_empty() {
                    if let Some(row) = rows.last_mut() {
                        row.push(Span {
                            text: piece.to_string(),
                            kind: span.kind.clone(),
                        });
                    }
                }
            }
        }
        rows
    }

    /// Number of display rows
    pub fn row_count(&self) -> usize {
        match self {
            Content::Plain(text) => text.split('\n').count(),
            Content::Rich(spans) => 1 + spans.iter().map(|s| s.text.matches('\n').count()).sum::<usize>(),
        }
    }
}

/// Replace control characters (other than newline) with caret notation and
/// expand tabs, so the result is safe to print verbatim.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\n' => out.push('\n'),
            '\r' => {}
            '\t' => out.push_str("    "),
            c if (c as u32) < 0x20 => {
                out.push('^');
                out.push(char::from_u32(c as u32 + 0x40).unwrap_or('?'));
            }
            '\u{7f}' => out.push_str("^?"),
            c if c.is_control() => out.push('\u{fffd}'),
            c => out.push(c),
        }
    }
    out
}

/// Stable identifier of an appended entry
pub type EntryId = u64;

/// A rendered line in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputEntry {
    pub id: EntryId,
    pub style: StyleClass,
    pub content: Content,
    /// Section anchor that `scroll` can jump to
    pub anchor: Option<String>,
}

/// Visible window over the log rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// First visible row
    pub top: usize,
    /// Number of visible rows
    pub height: usize,
    /// Whether new content keeps the view at the bottom
    pub pinned: bool,
}

/// Bounded, auto-scrolling output log
#[derive(Debug, Clone)]
pub struct OutputLog {
    entries: VecDeque<OutputEntry>,
    capacity: usize,
    next_id: EntryId,
    viewport: Viewport,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::with_capacity(OUTPUT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 0,
            viewport: Viewport {
                top: 0,
                height: 20,
                pinned: true,
            },
        }
    }

    /// Append plain text, escaped
    pub fn print_text(&mut self, text: impl AsRef<str>, style: StyleClass) -> EntryId {
        self.append(Content::plain(text), style)
    }

    /// Append pre-built rich content
    pub fn print_rich(&mut self, spans: Vec<Span>, style: StyleClass) -> EntryId {
        self.append(Content::Rich(spans), style)
    }

    /// Append an entry, prune beyond the bound and follow the bottom if pinned
    pub fn append(&mut self, content: Content, style: StyleClass) -> EntryId {
        self.push_entry(content, style, None)
    }

    /// Append an entry carrying a section anchor
    pub fn append_anchored(
        &mut self,
        content: Content,
        style: StyleClass,
        anchor: impl Into<String>,
    ) -> EntryId {
        self.push_entry(content, style, Some(anchor.into()))
    }

    fn push_entry(&mut self, content: Content, style: StyleClass, anchor: Option<String>) -> EntryId {
        let was_pinned = self.viewport.pinned;
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(OutputEntry {
            id,
            style,
            content,
            anchor,
        });
        self.prune();
        if was_pinned {
            self.scroll_to_bottom();
        }
        id
    }

    /// Replace the content of an entry; returns false if it was pruned
    pub fn set_content(&mut self, id: EntryId, content: Content) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        entry.content = content;
        if self.viewport.pinned {
            self.scroll_to_bottom();
        }
        true
    }

    fn prune(&mut self) {
        while self.entries.len() > self.capacity {
            if let Some(removed) = self.entries.pop_front() {
                if !self.viewport.pinned {
                    self.viewport.top = self.viewport.top.saturating_sub(removed.content.row_count());
                }
            }
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.viewport.top = 0;
        self.viewport.pinned = true;
    }

    pub fn entries(&self) -> impl Iterator<Item = &OutputEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&OutputEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total display rows across all entries
    pub fn row_count(&self) -> usize {
        self.entries.iter().map(|e| e.content.row_count()).sum()
    }

    /// Display rows with the style class of their entry
    pub fn rows(&self) -> Vec<(StyleClass, Vec<Span>)> {
        self.entries
            .iter()
            .flat_map(|e| e.content.rows().into_iter().map(move |row| (e.style, row)))
            .collect()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the visible window
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport.height = height.max(1);
        if self.viewport.pinned {
            self.scroll_to_bottom();
        } else {
            self.clamp_top();
            self.recompute_pin();
        }
    }

    fn max_top(&self) -> usize {
        self.row_count().saturating_sub(self.viewport.height)
    }

    fn clamp_top(&mut self) {
        self.viewport.top = self.viewport.top.min(self.max_top());
    }

    fn scroll_to_bottom(&mut self) {
        self.viewport.top = self.max_top();
    }

    /// Pinned when the window ends within the tolerance of the last row
    fn recompute_pin(&mut self) {
        let bottom = self.viewport.top + self.viewport.height;
        self.viewport.pinned = bottom + SCROLL_PIN_TOLERANCE >= self.row_count();
    }

    /// Manual scroll by a row delta; recomputes the pin state
    pub fn scroll_by(&mut self, delta: isize) {
        let top = self.viewport.top as isize + delta;
        self.scroll_to(top.max(0) as usize);
    }

    /// Manual scroll to an absolute row; recomputes the pin state
    pub fn scroll_to(&mut self, row: usize) {
        self.viewport.top = row;
        self.clamp_top();
        self.recompute_pin();
        tracing::trace!("viewport scrolled to {} (pinned: {})", self.viewport.top, self.viewport.pinned);
    }

    /// Scroll so the newest entry with `anchor` is at the top of the view
    pub fn scroll_to_anchor(&mut self, anchor: &str) -> bool {
        let mut row = 0;
        let mut found = None;
        for entry in &self.entries {
            if entry.anchor.as_deref() == Some(anchor) {
                found = Some(row);
            }
            row += entry.content.row_count();
        }
        match found {
            Some(row) => {
                self.scroll_to(row);
                true
            }
            None => false,
        }
    }

    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.entries.iter().any(|e| e.anchor.as_deref() == Some(anchor))
    }

    /// Jump to the top of the log
    pub fn scroll_top(&mut self) {
        self.scroll_to(0);
    }

    /// Jump to the bottom and re-pin
    pub fn scroll_bottom(&mut self) {
        self.scroll_to(usize::MAX);
    }
}

impl Default for OutputLog {
    fn default() -> Self {
        Self::new()
    }
}
