use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use cucumber::World;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::MockServer;

use termfolio::config::{cache_root_for, CACHE_VERSION, DEFAULT_ORIGIN};
use termfolio::io::{MockEventStream, MockRenderStream};
use termfolio::models::{Portfolio, StyleClass, Theme};
use termfolio::services::{AssetCache, FetchPolicy, FileStore, HttpService, SoundBoard};
use termfolio::{AppController, Session};

pub type TestController = AppController<MockEventStream, MockRenderStream>;

/// A terminal on a throwaway store, driven by scripted keys
#[derive(World)]
#[world(init = Self::new)]
pub struct TermfolioWorld {
    /// Holds the store file and cache for the scenario
    pub home: TempDir,
    pub controller: Option<TestController>,
    /// Shares the recording of the controller's render stream
    pub screen: MockRenderStream,
    pub mock_server: Option<MockServer>,
    pub terminal_size: (u16, u16),
}

impl std::fmt::Debug for TermfolioWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermfolioWorld")
            .field("home", &self.home.path())
            .field("started", &self.controller.is_some())
            .field("mock_server", &self.mock_server.as_ref().map(|s| s.uri()))
            .finish()
    }
}

impl TermfolioWorld {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("Failed to create temp dir"),
            controller: None,
            screen: MockRenderStream::new(),
            mock_server: None,
            terminal_size: (80, 24),
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.home.path().join("storage.json")
    }

    pub fn origin(&self) -> String {
        self.mock_server
            .as_ref()
            .map(|server| server.uri())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
    }

    /// Start (or restart) the terminal on the scenario's store
    pub fn start(&mut self) -> Result<()> {
        let store_path = self.store_path();
        let mut portfolio = Portfolio::default();
        portfolio.site_url = self.origin();

        let session = Session::new(
            Box::new(FileStore::open(&store_path)),
            portfolio,
            SoundBoard::silent(),
            Theme::Dark,
        );
        let policy = FetchPolicy::new(reqwest::Url::parse(&self.origin())?);
        let cache = AssetCache::new(cache_root_for(&store_path), CACHE_VERSION);
        let http = HttpService::new(policy)?.with_cache(cache);

        self.screen = MockRenderStream::with_size(self.terminal_size);
        let controller = AppController::new(
            session,
            http,
            MockEventStream::empty(),
            self.screen.clone(),
        )?;
        self.controller = Some(controller);
        Ok(())
    }

    pub fn controller(&mut self) -> &mut TestController {
        if self.controller.is_none() {
            self.start().expect("Failed to start terminal");
        }
        self.controller.as_mut().expect("terminal started")
    }

    pub fn session(&mut self) -> &Session {
        self.controller().session()
    }

    /// Type a line and press Enter, then let the controller handle it
    pub async fn submit(&mut self, line: &str) {
        let controller = self.controller();
        controller.event_stream_mut().type_line(line);
        controller
            .drain_events()
            .await
            .expect("Failed to handle events");
    }

    pub async fn press(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let controller = self.controller();
        controller.event_stream_mut().push_key(code, modifiers);
        controller
            .drain_events()
            .await
            .expect("Failed to handle events");
    }

    pub async fn boot(&mut self) {
        self.controller()
            .boot(Duration::ZERO)
            .await
            .expect("Boot failed");
    }

    pub fn output_lines(&mut self) -> Vec<String> {
        self.session()
            .log
            .entries()
            .map(|e| e.content.text())
            .collect()
    }

    pub fn last_entry(&mut self) -> (StyleClass, String) {
        let entry = self
            .session()
            .log
            .last()
            .expect("Output log is empty")
            .clone();
        (entry.style, entry.content.text())
    }

    pub fn screen_contains(&self, text: &str) -> bool {
        self.screen.get_buffer_string().contains(text)
    }
}

/// Parse a style class name as written in feature files
pub fn parse_style(name: &str) -> StyleClass {
    match name {
        "ok" => StyleClass::Ok,
        "err" => StyleClass::Err,
        "info" => StyleClass::Info,
        "prompt" => StyleClass::Prompt,
        other => panic!("Unknown style class '{other}'"),
    }
}

/// Parse a key name as written in feature files
pub fn parse_key(name: &str) -> (KeyCode, KeyModifiers) {
    match name {
        "Up" => (KeyCode::Up, KeyModifiers::NONE),
        "Down" => (KeyCode::Down, KeyModifiers::NONE),
        "Tab" => (KeyCode::Tab, KeyModifiers::NONE),
        "Escape" => (KeyCode::Esc, KeyModifiers::NONE),
        "Enter" => (KeyCode::Enter, KeyModifiers::NONE),
        "PageUp" => (KeyCode::PageUp, KeyModifiers::NONE),
        "PageDown" => (KeyCode::PageDown, KeyModifiers::NONE),
        "Backspace" => (KeyCode::Backspace, KeyModifiers::NONE),
        "Ctrl-C" => (KeyCode::Char('c'), KeyModifiers::CONTROL),
        single if single.chars().count() == 1 => (
            KeyCode::Char(single.chars().next().unwrap_or(' ')),
            KeyModifiers::NONE,
        ),
        other => panic!("Unknown key '{other}'"),
    }
}
