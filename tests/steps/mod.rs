//! Step definitions, grouped by feature domain:
//! - `terminal` - starting the terminal, keys, output and screen checks
//! - `history` - recall and persistence of submitted lines
//! - `fetch` - the guarded JSON fetch against a mock origin
//! - `settings` - theme and sound preferences
//! - `boot` - the typewriter boot sequence

pub mod boot;
pub mod fetch;
pub mod history;
pub mod settings;
pub mod terminal;
