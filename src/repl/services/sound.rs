//! # UI Sound
//!
//! Short square-wave style ticks for typing and submitting. A terminal can
//! only ring its bell, so the production sink ignores pitch and emits BEL;
//! the tone parameters still travel with every cue.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A single audio cue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
    pub volume: f32,
}

impl Tone {
    pub const fn new(frequency_hz: u32, duration_ms: u64, volume: f32) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(duration_ms),
            volume,
        }
    }

    /// Typewriter tick; pitch cycles through three steps with the position
    pub fn typing(position: usize) -> Self {
        Self::new(220 + (position % 3) as u32 * 30, 5, 0.02)
    }

    /// Played when a line is submitted
    pub const SUBMIT: Tone = Tone::new(420, 20, 0.04);

    /// Played on any other keystroke
    pub const KEYSTROKE: Tone = Tone::new(300, 4, 0.014);
}

/// Destination of audio cues
pub trait ToneSink: Send {
    fn play(&mut self, tone: Tone);
}

/// Discards every cue
#[derive(Debug, Default)]
pub struct NullSink;

impl ToneSink for NullSink {
    fn play(&mut self, _tone: Tone) {}
}

/// Rings the terminal bell by writing BEL
pub struct TerminalBell {
    out: Box<dyn Write + Send>,
}

impl TerminalBell {
    /// Bell on the process stdout
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    pub fn with_writer(out: impl Write + Send + 'static) -> Self {
        Self { out: Box::new(out) }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TerminalBell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalBell").finish_non_exhaustive()
    }
}

impl ToneSink for TerminalBell {
    fn play(&mut self, tone: Tone) {
        tracing::trace!("bell for {} Hz", tone.frequency_hz);
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            tracing::trace!("bell not rung: {e}");
        }
    }
}

/// Keeps every cue; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    tones: Arc<Mutex<Vec<Tone>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tones(&self) -> Vec<Tone> {
        self.tones.lock().map(|t| t.clone()).unwrap_or_default()
    }
}

impl ToneSink for RecordingSink {
    fn play(&mut self, tone: Tone) {
        if let Ok(mut tones) = self.tones.lock() {
            tones.push(tone);
        }
    }
}

/// Mute switch in front of a sink
pub struct SoundBoard {
    sink: Box<dyn ToneSink>,
    muted: bool,
}

impl SoundBoard {
    pub fn new(sink: Box<dyn ToneSink>, muted: bool) -> Self {
        Self { sink, muted }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(NullSink), true)
    }

    pub fn tick(&mut self, tone: Tone) {
        if !self.muted {
            self.sink.play(tone);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag, returning the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }
}

impl std::fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBoard")
            .field("muted", &self.muted)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::{MockRenderStream, RenderCommand};

    #[test]
    fn typing_tone_should_cycle_through_three_pitches() {
        let pitches: Vec<u32> = (0..6).map(|i| Tone::typing(i).frequency_hz).collect();
        assert_eq!(pitches, vec![220, 250, 280, 220, 250, 280]);
    }

    #[test]
    fn muted_board_should_drop_tones() {
        let sink = RecordingSink::new();
        let mut board = SoundBoard::new(Box::new(sink.clone()), true);
        board.tick(Tone::SUBMIT);
        assert!(sink.tones().is_empty());

        assert!(!board.toggle_mute());
        board.tick(Tone::SUBMIT);
        assert_eq!(sink.tones(), vec![Tone::SUBMIT]);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn terminal_bell_should_write_bel_to_its_writer() {
        let screen = MockRenderStream::new();
        let mut bell = TerminalBell::with_writer(screen.clone());
        bell.play(Tone::KEYSTROKE);

        assert_eq!(screen.get_buffer_string(), "\x07");
        assert!(screen.has_command(&RenderCommand::Flush));
    }

    #[test]
    fn terminal_bell_should_survive_write_failures() {
        let mut board = SoundBoard::new(Box::new(TerminalBell::with_writer(BrokenPipe)), false);
        board.tick(Tone::SUBMIT);
        board.tick(Tone::typing(1));
        assert!(!board.is_muted());
    }
}
