//! # Typewriter
//!
//! Char-by-char reveal of a log line with a tone per character. The abort
//! flag in the session is polled before every character; once raised, the
//! rest of the line is filled in at once.
//!
//! Waiting between characters is delegated to a [`Pacer`], so the
//! controller can keep reading keys (and redraw) while a line types out.

use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{BOOT_LINE_PAUSE, TYPING_JITTER_MS};
use crate::repl::models::{Content, StyleClass};
use crate::repl::services::Tone;
use crate::repl::session::Session;

/// Suspension point between two revealed characters
#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&mut self, session: &mut Session, delay: Duration) -> Result<()>;
}

/// Plain timer, nothing else happens while waiting
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    async fn pause(&mut self, _session: &mut Session, delay: Duration) -> Result<()> {
        tokio::time::sleep(delay).await;
        Ok(())
    }
}

/// How a line ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typed {
    Complete,
    Aborted,
}

pub struct Typewriter {
    rng: StdRng,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typewriter {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic jitter
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Append an empty entry and reveal `text` into it
    pub async fn type_line<P: Pacer>(
        &mut self,
        session: &mut Session,
        pacer: &mut P,
        text: &str,
        style: StyleClass,
        base_delay: Duration,
    ) -> Result<Typed> {
        let id = session.log.append(Content::plain(""), style);
        let mut revealed = String::with_capacity(text.len());

        for (position, ch) in text.chars().enumerate() {
            if session.abort.is_raised() {
                session.log.set_content(id, Content::plain(text));
                return Ok(Typed::Aborted);
            }
            revealed.push(ch);
            session.log.set_content(id, Content::plain(&revealed));
            session.sound.tick(Tone::typing(position));

            let jitter = Duration::from_millis(self.rng.gen_range(0..=TYPING_JITTER_MS));
            pacer.pause(session, base_delay + jitter).await?;
        }
        Ok(Typed::Complete)
    }

    /// Startup sequence: lines one at a time with a short pause after each.
    /// Clears the abort flag first; stops after the line that saw it raised.
    pub async fn boot<P: Pacer>(
        &mut self,
        session: &mut Session,
        pacer: &mut P,
        lines: &[String],
        base_delay: Duration,
    ) -> Result<Typed> {
        session.abort.clear();
        tracing::debug!("Boot sequence: {} lines", lines.len());
        for line in lines {
            self.type_line(session, pacer, line, StyleClass::Info, base_delay)
                .await?;
            pacer.pause(session, BOOT_LINE_PAUSE).await?;
            if session.abort.is_raised() {
                tracing::debug!("Boot sequence skipped");
                return Ok(Typed::Aborted);
            }
        }
        Ok(Typed::Complete)
    }
}
