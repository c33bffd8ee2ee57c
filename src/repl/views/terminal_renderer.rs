//! # Terminal Renderer
//!
//! Draws one frame of the REPL onto a [`RenderStream`]:
//!
//! ```text
//! row 0 .. h-3   output viewport (log rows, clipped to the width)
//! row h-2        status line: theme, sound, scroll position, focus
//! row h-1        prompt: "$ " input, dimmed autocomplete hint
//! ```
//!
//! Every frame is a full redraw; the log is small enough that partial
//! updates are not worth tracking.

use anyhow::Result;
use crossterm::style::{Attribute, Color};
use std::io::Write;
use unicode_width::UnicodeWidthChar;

use crate::repl::io::{RenderStream, TerminalSize};
use crate::repl::models::{Focus, InputLine, SpanKind, StyleClass, Theme};
use crate::repl::session::Session;

/// Rows below the output viewport
const CHROME_ROWS: u16 = 2;
const PROMPT: &str = "$ ";

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub ok: Color,
    pub err: Color,
    pub info: Color,
    pub prompt: Color,
    pub heading: Color,
    pub num: Color,
    pub dim: Color,
    pub link: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color::Reset,
                text: Color::Grey,
                ok: Color::Green,
                err: Color::Red,
                info: Color::Cyan,
                prompt: Color::Yellow,
                heading: Color::Magenta,
                num: Color::Yellow,
                dim: Color::DarkGrey,
                link: Color::Blue,
                status_fg: Color::Black,
                status_bg: Color::Grey,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                ok: Color::DarkGreen,
                err: Color::DarkRed,
                info: Color::DarkCyan,
                prompt: Color::DarkYellow,
                heading: Color::DarkMagenta,
                num: Color::DarkYellow,
                dim: Color::DarkGrey,
                link: Color::DarkBlue,
                status_fg: Color::White,
                status_bg: Color::DarkGrey,
            },
        }
    }

    fn class(&self, style: StyleClass) -> Color {
        match style {
            StyleClass::Ok => self.text,
            StyleClass::Err => self.err,
            StyleClass::Info => self.info,
            StyleClass::Prompt => self.prompt,
        }
    }

    fn span(&self, style: StyleClass, kind: &SpanKind) -> Color {
        match kind {
            SpanKind::Text => self.class(style),
            SpanKind::Ok => self.ok,
            SpanKind::Num => self.num,
            SpanKind::Heading => self.heading,
            SpanKind::Dim => self.dim,
            SpanKind::Link { .. } => self.link,
        }
    }
}

/// Everything one frame shows
pub struct Frame<'a> {
    pub session: &'a Session,
    pub input: &'a InputLine,
    /// Untyped remainder of the autocompleted command
    pub hint: Option<&'a str>,
    pub focus: Focus,
    /// False while the boot animation runs
    pub input_enabled: bool,
}

/// Longest prefix of `text` that fits in `max` columns, and its width
pub fn clip_to_width(text: &str, max: usize) -> (&str, usize) {
    let mut width = 0;
    for (idx, ch) in text.char_indices() {
        let w = ch.width().unwrap_or(0);
        if width + w > max {
            return (&text[..idx], width);
        }
        width += w;
    }
    (text, width)
}

/// OSC 8 hyperlink around `label`
pub fn hyperlink(href: &str, label: &str) -> String {
    format!("\x1b]8;;{href}\x1b\\{label}\x1b]8;;\x1b\\")
}

pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: TerminalSize,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    /// Raw mode, alternate screen, cleared
    pub fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        self.render_stream.flush()?;
        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> Result<()> {
        self.render_stream.reset_style()?;
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> TerminalSize {
        self.terminal_size
    }

    /// Rows available to the output log
    pub fn output_height(&self) -> usize {
        self.terminal_size.1.saturating_sub(CHROME_ROWS).max(1) as usize
    }

    pub fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let palette = Palette::for_theme(frame.session.theme.resolved());
        let (width, height) = self.terminal_size;

        self.render_stream.hide_cursor()?;
        if height > CHROME_ROWS {
            self.render_output(frame, &palette)?;
        }
        if height > 1 {
            self.render_status(frame, &palette, height - 2, width)?;
        }
        let cursor_col = self.render_prompt(frame, &palette, height.saturating_sub(1), width)?;

        self.render_stream.reset_style()?;
        if frame.input_enabled && frame.focus == Focus::Input {
            self.render_stream
                .move_cursor(cursor_col, height.saturating_sub(1))?;
            self.render_stream.show_cursor()?;
        }
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_output(&mut self, frame: &Frame<'_>, palette: &Palette) -> Result<()> {
        let width = self.terminal_size.0 as usize;
        let rows = frame.session.log.rows();
        let viewport = frame.session.log.viewport();
        let visible = rows.iter().skip(viewport.top).take(self.output_height());

        let mut drawn = 0;
        for (y, (style, spans)) in visible.enumerate() {
            self.begin_row(y as u16, palette)?;
            let mut remaining = width;
            for span in spans {
                if remaining == 0 {
                    break;
                }
                let (clipped, used) = clip_to_width(&span.text, remaining);
                remaining -= used;
                self.render_stream
                    .set_foreground(palette.span(*style, &span.kind))?;
                match &span.kind {
                    SpanKind::Heading => {
                        self.render_stream.set_attribute(Attribute::Bold)?;
                        write!(self.render_stream, "{clipped}")?;
                        self.render_stream.set_attribute(Attribute::NormalIntensity)?;
                    }
                    SpanKind::Link { href } => {
                        self.render_stream.set_attribute(Attribute::Underlined)?;
                        write!(self.render_stream, "{}", hyperlink(href, clipped))?;
                        self.render_stream.set_attribute(Attribute::NoUnderline)?;
                    }
                    _ => write!(self.render_stream, "{clipped}")?,
                }
            }
            drawn += 1;
        }

        for y in drawn..self.output_height() {
            self.begin_row(y as u16, palette)?;
        }
        Ok(())
    }

    fn begin_row(&mut self, y: u16, palette: &Palette) -> Result<()> {
        self.render_stream.move_cursor(0, y)?;
        self.render_stream.reset_style()?;
        self.render_stream.set_background(palette.background)?;
        self.render_stream.clear_line()?;
        Ok(())
    }

    fn render_status(
        &mut self,
        frame: &Frame<'_>,
        palette: &Palette,
        y: u16,
        width: u16,
    ) -> Result<()> {
        let session = frame.session;
        let viewport = session.log.viewport();
        let total = session.log.row_count();
        let scroll = if viewport.pinned {
            "end".to_string()
        } else {
            format!("{}/{}", viewport.top + 1, total)
        };
        let focus = match frame.focus {
            Focus::Input => "input",
            Focus::Output => "output",
        };
        let text = format!(
            " termfolio | theme: {} | sound: {} | scroll: {} | focus: {} ",
            session.theme.resolved(),
            if session.sound.is_muted() { "off" } else { "on" },
            scroll,
            focus,
        );

        let (clipped, used) = clip_to_width(&text, width as usize);
        self.render_stream.move_cursor(0, y)?;
        self.render_stream.reset_style()?;
        self.render_stream.set_background(palette.status_bg)?;
        self.render_stream.set_foreground(palette.status_fg)?;
        write!(
            self.render_stream,
            "{clipped}{:pad$}",
            "",
            pad = (width as usize).saturating_sub(used)
        )?;
        Ok(())
    }

    /// Draw the prompt row; returns the terminal column of the text cursor
    fn render_prompt(
        &mut self,
        frame: &Frame<'_>,
        palette: &Palette,
        y: u16,
        width: u16,
    ) -> Result<u16> {
        let available = (width as usize).saturating_sub(PROMPT.len() + 1);
        let chars: Vec<char> = frame.input.text().chars().collect();
        let cursor = frame.input.cursor().min(chars.len());

        // scroll horizontally so the cursor stays on screen
        let mut start = 0;
        while start < cursor && chars_width(&chars[start..cursor]) > available {
            start += 1;
        }
        let visible: String = chars[start..].iter().collect();
        let (shown, used) = clip_to_width(&visible, available);

        self.begin_row(y, palette)?;
        let prompt_color = if frame.input_enabled {
            palette.prompt
        } else {
            palette.dim
        };
        self.render_stream.set_foreground(prompt_color)?;
        write!(self.render_stream, "{PROMPT}")?;
        self.render_stream.set_foreground(palette.text)?;
        write!(self.render_stream, "{shown}")?;

        if let Some(hint) = frame.hint.filter(|_| frame.input_enabled) {
            let (hint, _) = clip_to_width(hint, available.saturating_sub(used));
            self.render_stream.set_foreground(palette.dim)?;
            write!(self.render_stream, "{hint}")?;
        }

        let col = PROMPT.len() + chars_width(&chars[start..cursor]);
        Ok(col.min(width.saturating_sub(1) as usize) as u16)
    }
}

fn chars_width(chars: &[char]) -> usize {
    chars.iter().map(|c| c.width().unwrap_or(0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::{MockRenderStream, RenderCommand};
    use crate::repl::models::Span;

    fn mock_renderer(size: TerminalSize) -> (TerminalRenderer<MockRenderStream>, MockRenderStream) {
        let stream = MockRenderStream::with_size(size);
        let observer = stream.clone();
        (TerminalRenderer::with_render_stream(stream).unwrap(), observer)
    }

    fn frame<'a>(session: &'a Session, input: &'a InputLine) -> Frame<'a> {
        Frame {
            session,
            input,
            hint: None,
            focus: Focus::Input,
            input_enabled: true,
        }
    }

    #[test]
    fn clip_should_respect_wide_characters() {
        assert_eq!(clip_to_width("hello", 3), ("hel", 3));
        assert_eq!(clip_to_width("日本語", 5), ("日本", 4));
        assert_eq!(clip_to_width("ok", 10), ("ok", 2));
    }

    #[test]
    fn output_height_should_leave_room_for_chrome() {
        let (renderer, _) = mock_renderer((80, 24));
        assert_eq!(renderer.output_height(), 22);
    }

    #[test]
    fn two_row_terminal_should_show_only_status_and_prompt() {
        let (mut renderer, observer) = mock_renderer((80, 2));
        let mut session = Session::in_memory();
        session.log.print_text("$ help", StyleClass::Prompt);
        let input = InputLine::new();

        renderer.render(&frame(&session, &input)).unwrap();

        let screen = observer.get_buffer_string();
        assert!(!screen.contains("$ help"));
        assert!(screen.contains(" termfolio | "));
        let rows: Vec<u16> = observer
            .get_commands()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::MoveCursor(0, y) => Some(*y),
                _ => None,
            })
            .collect();
        assert_eq!(rows, vec![0, 1]);
    }

    #[test]
    fn one_row_terminal_should_show_only_prompt() {
        let (mut renderer, observer) = mock_renderer((80, 1));
        let mut session = Session::in_memory();
        session.log.print_text("$ help", StyleClass::Prompt);
        let mut input = InputLine::new();
        input.set("ls");

        renderer.render(&frame(&session, &input)).unwrap();

        let screen = observer.get_buffer_string();
        assert!(!screen.contains("$ help"));
        assert!(!screen.contains("termfolio"));
        assert!(screen.contains("$ ls"));
    }

    #[test]
    fn render_should_draw_log_status_and_prompt() {
        let (mut renderer, observer) = mock_renderer((80, 10));
        let mut session = Session::in_memory();
        session.log.print_text("$ help", StyleClass::Prompt);
        let mut input = InputLine::new();
        input.set("whoami");

        renderer.render(&frame(&session, &input)).unwrap();

        let screen = observer.get_buffer_string();
        assert!(screen.contains("$ help"));
        assert!(screen.contains("theme: dark"));
        assert!(screen.contains("sound: off"));
        assert!(screen.contains("$ whoami"));
        assert!(observer.has_command(&RenderCommand::MoveCursor(8, 9)));
        assert!(observer.has_command(&RenderCommand::ShowCursor));
    }

    #[test]
    fn links_should_be_wrapped_in_osc8() {
        let (mut renderer, observer) = mock_renderer((80, 10));
        let mut session = Session::in_memory();
        session.log.print_rich(
            vec![Span::link("[resume]", "http://localhost:8000/cv.pdf")],
            StyleClass::Ok,
        );
        let input = InputLine::new();

        renderer.render(&frame(&session, &input)).unwrap();

        assert!(observer
            .get_buffer_string()
            .contains("\x1b]8;;http://localhost:8000/cv.pdf\x1b\\[resume]\x1b]8;;\x1b\\"));
    }

    #[test]
    fn long_rows_should_be_clipped_to_width() {
        let (mut renderer, observer) = mock_renderer((10, 5));
        let mut session = Session::in_memory();
        session.log.print_text("abcdefghijklmnop", StyleClass::Ok);
        let input = InputLine::new();

        renderer.render(&frame(&session, &input)).unwrap();

        let writes: Vec<String> = observer
            .get_commands()
            .into_iter()
            .filter_map(|c| match c {
                RenderCommand::Write(text) => Some(text),
                _ => None,
            })
            .collect();
        assert!(writes.contains(&"abcdefghij".to_string()));
        assert!(!observer.get_buffer_string().contains("abcdefghijk"));
    }

    #[test]
    fn hint_should_follow_input_and_hide_during_boot() {
        let (mut renderer, observer) = mock_renderer((80, 10));
        let session = Session::in_memory();
        let mut input = InputLine::new();
        input.set("wh");
        let mut f = frame(&session, &input);
        f.hint = Some("oami");

        renderer.render(&f).unwrap();
        assert!(observer.get_buffer_string().contains("oami"));

        let (mut renderer, observer) = mock_renderer((80, 10));
        f.input_enabled = false;
        renderer.render(&f).unwrap();
        assert!(!observer.get_buffer_string().contains("oami"));
        assert!(!observer.has_command(&RenderCommand::ShowCursor));
    }

    #[test]
    fn light_theme_should_paint_background() {
        let (mut renderer, observer) = mock_renderer((40, 6));
        let mut session = Session::in_memory();
        session.theme.set(
            crate::repl::models::ThemePreference::Light,
            session.store.as_mut(),
        );
        let input = InputLine::new();

        renderer.render(&frame(&session, &input)).unwrap();
        assert!(observer.has_command(&RenderCommand::Background(Color::White)));
    }

    #[test]
    fn initialize_and_cleanup_should_toggle_terminal_modes() {
        let (mut renderer, observer) = mock_renderer((80, 24));
        renderer.initialize().unwrap();
        assert!(observer.is_raw_mode());
        assert!(observer.is_alternate_screen());
        renderer.cleanup().unwrap();
        assert!(!observer.is_raw_mode());
        assert!(!observer.is_alternate_screen());
    }
}
