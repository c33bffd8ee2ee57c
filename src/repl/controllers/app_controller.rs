//! # REPL Application Controller
//!
//! Owns the session and the terminal, and runs the event loop:
//!
//! 1. boot animation with the prompt disabled (any key skips it)
//! 2. read a key, apply it to the prompt, history, viewport or dispatcher
//! 3. redraw
//!
//! A submitted line is awaited to completion, fetch included, before the
//! next event is read.

use crate::cmd_args::CommandLineArgs;
use crate::config;
use crate::repl::{
    dispatcher::{Repl, ReplOutcome},
    io::{EventStream, RenderStream},
    models::{Focus, InputLine, Portfolio, Theme},
    services::{AssetCache, FetchPolicy, FileStore, HttpService, SoundBoard, TerminalBell, Tone},
    session::Session,
    typewriter::{Pacer, Typewriter},
    views::{Frame, TerminalRenderer},
};
use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use reqwest::Url;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn is_quit_key(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

pub struct AppController<ES: EventStream, RS: RenderStream> {
    session: Session,
    repl: Repl,
    http: HttpService,
    typewriter: Typewriter,
    view_renderer: TerminalRenderer<RS>,
    event_stream: ES,
    input: InputLine,
    focus: Focus,
    boot_delay: Option<Duration>,
    precache: bool,
    input_enabled: bool,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Build everything from the command line
    pub fn with_io_streams(
        cmd_args: CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let store_path = config::expand_path(
            &cmd_args
                .store()
                .map(str::to_string)
                .unwrap_or_else(config::get_store_path),
        );
        tracing::debug!("Using store at {}", store_path.display());
        let store = FileStore::open(&store_path);

        let mut portfolio = match cmd_args.content() {
            Some(path) => Portfolio::from_file(&config::expand_path(path))?,
            None => Portfolio::default(),
        };
        if let Some(origin) = cmd_args.origin() {
            portfolio.site_url = origin.to_string();
        }
        let origin = Url::parse(&portfolio.site_url)
            .with_context(|| format!("invalid site origin '{}'", portfolio.site_url))?;

        let cache = AssetCache::new(config::cache_root_for(&store_path), config::CACHE_VERSION);
        let http = HttpService::new(FetchPolicy::new(origin))?.with_cache(cache);
        let sound = SoundBoard::new(Box::new(TerminalBell::new()), cmd_args.muted());
        let session = Session::new(Box::new(store), portfolio, sound, Theme::system());

        let boot_delay = cmd_args.boot_enabled().then(|| cmd_args.boot_delay());
        Ok(Self::new(session, http, event_stream, render_stream)?
            .with_boot(boot_delay)
            .with_precache(cmd_args.precache()))
    }

    /// Controller over an existing session; no boot animation
    pub fn new(session: Session, http: HttpService, event_stream: ES, render_stream: RS) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        let repl = Repl::with_builtins(http.policy().clone());
        let mut controller = Self {
            session,
            repl,
            http,
            typewriter: Typewriter::new(),
            view_renderer,
            event_stream,
            input: InputLine::new(),
            focus: Focus::Input,
            boot_delay: None,
            precache: false,
            input_enabled: true,
            should_quit: false,
        };
        controller.sync_viewport();
        Ok(controller)
    }

    /// Type the boot lines at this per-character delay before taking input
    pub fn with_boot(mut self, delay: Option<Duration>) -> Self {
        self.boot_delay = delay;
        self
    }

    pub fn with_precache(mut self, precache: bool) -> Self {
        self.precache = precache;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Event source, for scripting input
    pub fn event_stream_mut(&mut self) -> &mut ES {
        &mut self.event_stream
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run until quit, restoring the terminal on every exit path
    pub async fn run(&mut self) -> Result<()> {
        self.prepare_cache().await;
        self.view_renderer.initialize()?;
        self.sync_viewport();

        let result = self.event_loop().await;
        let cleanup = self.view_renderer.cleanup();
        result.and(cleanup)
    }

    async fn prepare_cache(&self) {
        if self.precache {
            let stored = self.http.install().await;
            tracing::info!("Installed {stored} assets");
        }
        if let Err(e) = self.http.activate_cache() {
            tracing::warn!("Could not purge old cache versions: {e:#}");
        }
    }

    async fn event_loop(&mut self) -> Result<()> {
        if let Some(delay) = self.boot_delay {
            self.boot(delay).await?;
        }
        self.render()?;

        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                self.drain_events().await?;
            }
        }
        Ok(())
    }

    /// Play the boot sequence with the prompt disabled
    pub async fn boot(&mut self, delay: Duration) -> Result<()> {
        self.input_enabled = false;
        let lines = self.session.portfolio.boot_lines.clone();
        let mut pacer = BootPacer {
            events: &mut self.event_stream,
            renderer: &mut self.view_renderer,
            input: &self.input,
            quit: false,
        };
        self.typewriter
            .boot(&mut self.session, &mut pacer, &lines, delay)
            .await?;
        self.should_quit |= pacer.quit;
        self.input_enabled = true;
        Ok(())
    }

    /// Handle every event that is ready now, then redraw
    pub async fn drain_events(&mut self) -> Result<()> {
        while !self.should_quit && self.event_stream.poll(Duration::ZERO)? {
            let event = self.event_stream.read()?;
            self.handle_event(event).await?;
        }
        if !self.should_quit {
            self.render()?;
        }
        Ok(())
    }

    pub async fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                tracing::trace!("Key event: {:?}", key);
                self.handle_key(key).await?;
            }
            Event::Resize(width, height) => {
                tracing::debug!("Terminal resized to {width}x{height}");
                self.view_renderer.update_size(width, height);
                self.sync_viewport();
            }
            _ => {}
        }
        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if is_quit_key(&key) {
            self.should_quit = true;
            return Ok(());
        }

        let page = self.view_renderer.output_height().saturating_sub(1).max(1) as isize;
        match (self.focus, key.code) {
            (_, KeyCode::PageUp) => {
                self.focus = Focus::Output;
                self.session.log.scroll_by(-page);
            }
            (_, KeyCode::PageDown) => {
                self.focus = Focus::Output;
                self.session.log.scroll_by(page);
            }
            (_, KeyCode::Esc) => self.focus = Focus::Input,
            (Focus::Output, KeyCode::Up) => self.session.log.scroll_by(-1),
            (Focus::Output, KeyCode::Down) => self.session.log.scroll_by(1),
            (Focus::Output, KeyCode::Home) => self.session.log.scroll_top(),
            (Focus::Output, KeyCode::End) => self.session.log.scroll_bottom(),
            (_, KeyCode::Enter) => self.submit().await,
            (Focus::Input, KeyCode::Up) => {
                if let Some(line) = self.session.history.recall_previous() {
                    self.input.set(line);
                }
            }
            (Focus::Input, KeyCode::Down) => {
                let line = self.session.history.recall_next().to_string();
                self.input.set(&line);
            }
            (Focus::Input, KeyCode::Tab) => {
                if let Some(line) = self.repl.tab_complete(&self.input.text(), &mut self.session) {
                    self.input.set(&line);
                }
            }
            (_, code) => {
                self.session.abort.raise();
                self.session.sound.tick(Tone::KEYSTROKE);
                self.edit(code);
            }
        }
        Ok(())
    }

    fn edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(ch) => {
                self.focus = Focus::Input;
                self.input.insert(ch);
            }
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
    }

    /// Enter: record, echo, run; deferred work is awaited before returning
    async fn submit(&mut self) {
        self.focus = Focus::Input;
        let line = self.input.take();
        let command = line.trim();
        if !command.is_empty() {
            self.session.record_history(command);
        }
        self.session.sound.tick(Tone::SUBMIT);

        let events = self.repl.dispatch(command, &mut self.session);
        if !events.is_empty() {
            // show the echo before waiting on the network
            if let Err(e) = self.render() {
                tracing::warn!("Render failed: {e:#}");
            }
        }
        if self.repl.apply(events, &mut self.session, &self.http).await == ReplOutcome::Quit {
            self.should_quit = true;
        }
    }

    fn sync_viewport(&mut self) {
        self.session
            .log
            .set_viewport_height(self.view_renderer.output_height());
    }

    fn render(&mut self) -> Result<()> {
        let text = self.input.text();
        let hint = match self.focus {
            Focus::Input => self.repl.hint(&text),
            Focus::Output => None,
        };
        let frame = Frame {
            session: &self.session,
            input: &self.input,
            hint,
            focus: self.focus,
            input_enabled: self.input_enabled,
        };
        self.view_renderer.render(&frame)
    }
}

/// Waits between typed characters by polling for keys, so a key press
/// skips the animation and the screen keeps up with each character
struct BootPacer<'a, ES: EventStream, RS: RenderStream> {
    events: &'a mut ES,
    renderer: &'a mut TerminalRenderer<RS>,
    input: &'a InputLine,
    quit: bool,
}

impl<ES: EventStream, RS: RenderStream> Pacer for BootPacer<'_, ES, RS> {
    async fn pause(&mut self, session: &mut Session, delay: Duration) -> Result<()> {
        self.renderer.render(&Frame {
            session: &*session,
            input: self.input,
            hint: None,
            focus: Focus::Input,
            input_enabled: false,
        })?;

        if !self.events.poll(delay)? {
            return Ok(());
        }
        match self.events.read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit_key(&key) {
                    self.quit = true;
                }
                session.abort.raise();
                session.sound.tick(Tone::KEYSTROKE);
            }
            Event::Resize(width, height) => {
                self.renderer.update_size(width, height);
                session
                    .log
                    .set_viewport_height(self.renderer.output_height());
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HISTORY_KEY;
    use crate::repl::io::{MockEventStream, MockRenderStream, RenderCommand};
    use crate::repl::models::StyleClass;

    type TestController = AppController<MockEventStream, MockRenderStream>;

    fn mock_controller(events: MockEventStream) -> (TestController, MockRenderStream) {
        let render = MockRenderStream::with_size((80, 12));
        let observer = render.clone();
        let origin = Url::parse("http://localhost:8000").unwrap();
        let http = HttpService::new(FetchPolicy::new(origin)).unwrap();
        let controller =
            AppController::new(Session::in_memory(), http, events, render).unwrap();
        (controller, observer)
    }

    fn texts(controller: &TestController) -> Vec<String> {
        controller
            .session()
            .log
            .entries()
            .map(|e| e.content.text())
            .collect()
    }

    #[tokio::test]
    async fn typed_command_should_dispatch_and_record_history() {
        let mut events = MockEventStream::empty();
        events.type_line("  ls ");
        let (mut controller, observer) = mock_controller(events);

        controller.drain_events().await.unwrap();

        assert_eq!(texts(&controller)[0], "$ ls");
        assert!(controller.input().is_empty());
        assert_eq!(
            controller.session().store.get(HISTORY_KEY).unwrap().as_deref(),
            Some(r#"["ls"]"#)
        );
        assert!(observer.get_buffer_string().contains("resume  projects"));
    }

    #[tokio::test]
    async fn blank_submit_should_not_touch_history_or_log() {
        let mut events = MockEventStream::empty();
        events.type_line("   ");
        let (mut controller, _) = mock_controller(events);

        controller.drain_events().await.unwrap();

        assert!(controller.session().history.is_empty());
        assert!(controller.session().log.is_empty());
    }

    #[tokio::test]
    async fn arrows_should_recall_history() {
        let mut events = MockEventStream::empty();
        events.type_line("help");
        events.type_line("ls");
        events.push_key(KeyCode::Up, KeyModifiers::NONE);
        events.push_key(KeyCode::Up, KeyModifiers::NONE);
        let (mut controller, _) = mock_controller(events);

        controller.drain_events().await.unwrap();
        assert_eq!(controller.input().text(), "help");

        let mut more = MockEventStream::empty();
        more.push_key(KeyCode::Down, KeyModifiers::NONE);
        more.push_key(KeyCode::Down, KeyModifiers::NONE);
        controller.event_stream = more;
        controller.drain_events().await.unwrap();
        assert_eq!(controller.input().text(), "");
    }

    #[tokio::test]
    async fn tab_should_complete_first_token() {
        let mut events = MockEventStream::empty();
        events.push_key(KeyCode::Char('w'), KeyModifiers::NONE);
        events.push_key(KeyCode::Char('h'), KeyModifiers::NONE);
        events.push_key(KeyCode::Tab, KeyModifiers::NONE);
        let (mut controller, _) = mock_controller(events);

        controller.drain_events().await.unwrap();
        assert_eq!(controller.input().text(), "whoami ");
    }

    #[tokio::test]
    async fn paging_should_focus_output_and_escape_should_return() {
        let mut events = MockEventStream::empty();
        for _ in 0..10 {
            events.type_line("help");
        }
        events.push_key(KeyCode::PageUp, KeyModifiers::NONE);
        let (mut controller, _) = mock_controller(events);

        controller.drain_events().await.unwrap();
        assert_eq!(controller.focus(), Focus::Output);
        assert!(!controller.session().log.viewport().pinned);

        controller
            .handle_event(Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .await
            .unwrap();
        assert_eq!(controller.focus(), Focus::Input);
    }

    #[tokio::test]
    async fn ctrl_c_and_exit_should_quit() {
        let mut events = MockEventStream::empty();
        events.push_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        events.type_line("ls");
        let (mut controller, _) = mock_controller(events);
        controller.drain_events().await.unwrap();
        assert!(controller.should_quit());
        assert!(controller.session().log.is_empty());

        let mut events = MockEventStream::empty();
        events.type_line("exit");
        let (mut controller, _) = mock_controller(events);
        controller.drain_events().await.unwrap();
        assert!(controller.should_quit());
        assert_eq!(controller.session().log.last().unwrap().content.text(), "bye");
    }

    #[tokio::test]
    async fn key_during_boot_should_finish_current_line_and_stop() {
        let mut events = MockEventStream::empty();
        events.push_key(KeyCode::Char('x'), KeyModifiers::NONE);
        let (mut controller, observer) = mock_controller(events);

        controller.boot(Duration::ZERO).await.unwrap();

        let log: Vec<_> = controller.session().log.entries().collect();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].style, StyleClass::Info);
        assert_eq!(
            log[0].content.text(),
            controller.session().portfolio.boot_lines[0]
        );
        assert!(controller.input().is_empty());
        assert!(!controller.should_quit());
        assert!(!observer.has_command(&RenderCommand::ShowCursor));
    }

    #[tokio::test]
    async fn boot_without_keys_should_type_every_line() {
        let (mut controller, _) = mock_controller(MockEventStream::empty());
        controller.boot(Duration::ZERO).await.unwrap();
        assert_eq!(
            texts(&controller),
            controller.session().portfolio.boot_lines
        );
    }

    #[tokio::test]
    async fn resize_should_update_viewport_height() {
        let (mut controller, _) = mock_controller(MockEventStream::empty());
        controller.handle_event(Event::Resize(100, 40)).await.unwrap();
        assert_eq!(controller.session().log.viewport().height, 38);
    }

    #[tokio::test]
    async fn run_should_restore_terminal_after_quit() {
        let mut events = MockEventStream::empty();
        events.type_line("whoami");
        events.push_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let (mut controller, observer) = mock_controller(events);

        controller.run().await.unwrap();

        assert!(texts(&controller).contains(&"$ whoami".to_string()));
        assert!(!observer.is_raw_mode());
        assert!(!observer.is_alternate_screen());
    }
}
