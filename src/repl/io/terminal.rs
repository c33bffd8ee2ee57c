//! # Terminal I/O
//!
//! crossterm implementations of the I/O traits. Nothing else in the crate
//! talks to crossterm's terminal or event APIs directly.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::style::{
    Attribute, Color, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, queue};
use std::io::{self, Write};
use std::time::Duration;

/// Reads keys and resizes from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        event::poll(timeout).map_err(anyhow::Error::from)
    }

    fn read(&mut self) -> Result<Event> {
        event::read().map_err(anyhow::Error::from)
    }
}

/// Queues crossterm commands on a writer; output appears on `flush`
pub struct TerminalRenderStream<W: Write> {
    writer: W,
}

impl TerminalRenderStream<io::Stdout> {
    pub fn new() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderStream<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        queue!(self.writer, Clear(ClearType::All)).map_err(anyhow::Error::from)
    }

    fn clear_line(&mut self) -> Result<()> {
        queue!(self.writer, Clear(ClearType::UntilNewLine)).map_err(anyhow::Error::from)
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.writer, cursor::MoveTo(x, y)).map_err(anyhow::Error::from)
    }

    fn hide_cursor(&mut self) -> Result<()> {
        queue!(self.writer, cursor::Hide).map_err(anyhow::Error::from)
    }

    fn show_cursor(&mut self) -> Result<()> {
        queue!(self.writer, cursor::Show).map_err(anyhow::Error::from)
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        queue!(self.writer, SetForegroundColor(color)).map_err(anyhow::Error::from)
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        queue!(self.writer, SetBackgroundColor(color)).map_err(anyhow::Error::from)
    }

    fn set_attribute(&mut self, attribute: Attribute) -> Result<()> {
        queue!(self.writer, SetAttribute(attribute)).map_err(anyhow::Error::from)
    }

    fn reset_style(&mut self) -> Result<()> {
        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)
            .map_err(anyhow::Error::from)
    }

    fn get_size(&self) -> Result<TerminalSize> {
        terminal::size().map_err(anyhow::Error::from)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        queue!(self.writer, EnterAlternateScreen).map_err(anyhow::Error::from)?;
        self.writer.flush().map_err(anyhow::Error::from)
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        queue!(self.writer, LeaveAlternateScreen).map_err(anyhow::Error::from)?;
        self.writer.flush().map_err(anyhow::Error::from)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        terminal::enable_raw_mode().map_err(anyhow::Error::from)
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        terminal::disable_raw_mode().map_err(anyhow::Error::from)
    }
}
