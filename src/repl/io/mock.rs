//! # Mock I/O
//!
//! Scripted events in, recorded render commands out. Clones of a
//! `MockRenderStream` share their recording, so a test can keep one while
//! the controller owns the other.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Attribute, Color};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Pre-programmed events, handed out in order
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// One key press per character, then Enter
    pub fn type_line(&mut self, line: &str) {
        for ch in line.chars() {
            self.push_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
        self.push_key(KeyCode::Enter, KeyModifiers::NONE);
    }

    pub fn push_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.push_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    Foreground(Color),
    Background(Color),
    Attribute(Attribute),
    ResetStyle,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(String),
    Flush,
}

#[derive(Debug, Default)]
struct Recording {
    commands: Vec<RenderCommand>,
    text: String,
    raw_mode: bool,
    alternate_screen: bool,
}

/// Records every drawing operation
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    recording: Arc<Mutex<Recording>>,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            recording: Arc::new(Mutex::new(Recording::default())),
            terminal_size: size,
        }
    }

    fn recording(&self) -> MutexGuard<'_, Recording> {
        self.recording.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.recording().commands.push(command);
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.recording().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.recording().commands.contains(command)
    }

    /// Everything written since the last clear
    pub fn get_buffer_string(&self) -> String {
        self.recording().text.clone()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.recording().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.recording().alternate_screen
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf).into_owned();
        let mut recording = self.recording();
        recording.text.push_str(&text);
        recording.commands.push(RenderCommand::Write(text));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::ClearScreen);
        recording.text.clear();
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearLine);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        Ok(())
    }

    fn set_foreground(&mut self, color: Color) -> Result<()> {
        self.record(RenderCommand::Foreground(color));
        Ok(())
    }

    fn set_background(&mut self, color: Color) -> Result<()> {
        self.record(RenderCommand::Background(color));
        Ok(())
    }

    fn set_attribute(&mut self, attribute: Attribute) -> Result<()> {
        self.record(RenderCommand::Attribute(attribute));
        Ok(())
    }

    fn reset_style(&mut self) -> Result<()> {
        self.record(RenderCommand::ResetStyle);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::EnterAlternateScreen);
        recording.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::LeaveAlternateScreen);
        recording.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::EnableRawMode);
        recording.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut recording = self.recording();
        recording.commands.push(RenderCommand::DisableRawMode);
        recording.raw_mode = false;
        Ok(())
    }
}
