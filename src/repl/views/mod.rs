//! # Views Module
//!
//! Turns the session into terminal output.

pub mod terminal_renderer;

pub use terminal_renderer::{Frame, Palette, TerminalRenderer};
