//! # I/O Abstraction Layer
//!
//! Trait seams between the controller and the terminal, so the REPL can be
//! driven by scripted key events and its drawing captured in tests.
//!
//! ```text
//! Production:  AppController ──▶ TerminalEventStream  ──▶ crossterm::event::poll/read
//!              TerminalRenderer ──▶ TerminalRenderStream ──▶ crossterm::queue!
//!
//! Testing:     AppController ──▶ MockEventStream      ──▶ VecDeque<Event>
//!              TerminalRenderer ──▶ MockRenderStream  ──▶ Vec<RenderCommand>
//! ```

use anyhow::Result;
use crossterm::event::Event;
use crossterm::style::{Attribute, Color};
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Terminal size as (columns, rows)
pub type TerminalSize = (u16, u16);

/// Source of key and resize events
pub trait EventStream: Send {
    /// Wait up to `timeout` for an event; true when one can be read
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event. Only call after `poll` returned true.
    fn read(&mut self) -> Result<Event>;
}

/// Drawing surface. Text goes through `Write`; everything else through
/// these methods, which may be buffered until `flush`.
pub trait RenderStream: Write + Send {
    fn clear_screen(&mut self) -> Result<()>;

    /// Clear from the cursor to the end of the row
    fn clear_line(&mut self) -> Result<()>;

    /// Move cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn set_foreground(&mut self, color: Color) -> Result<()>;

    fn set_background(&mut self, color: Color) -> Result<()>;

    fn set_attribute(&mut self, attribute: Attribute) -> Result<()>;

    /// Back to default colors and attributes
    fn reset_style(&mut self) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;
}
