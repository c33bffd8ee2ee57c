//! # REPL
//!
//! Models, services, commands and the dispatcher, plus the terminal
//! controller and renderer that drive them.

pub mod commands;
pub mod controllers;
pub mod dispatcher;
pub mod io;
pub mod models;
pub mod services;
pub mod session;
pub mod typewriter;
pub mod views;

pub use commands::{Command, CommandContext, CommandEvent, CommandRegistry};
pub use controllers::AppController;
pub use dispatcher::{Repl, ReplOutcome, ReplState};
pub use session::{AbortFlag, Session};
pub use typewriter::{Pacer, SleepPacer, Typed, Typewriter};
