//! # termfolio - Portfolio Terminal
//!
//! A full-screen terminal REPL that presents a personal portfolio: typed
//! commands, aliases, "did you mean" hints, persisted history, an abortable
//! typewriter boot sequence and a guarded JSON `fetch`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   keys    ┌───────────────┐  line   ┌────────────┐
//! │ EventStream │──────────▶│ AppController │────────▶│    Repl    │
//! └─────────────┘           │  - event loop │         │ - aliases  │
//!                           │  - boot       │◀────────│ - registry │
//! ┌─────────────┐   frame   │  - prompt     │ events  │ - suggest  │
//! │RenderStream │◀──────────│               │         └─────┬──────┘
//! └─────────────┘           └───────┬───────┘               │ &mut
//!                                   │ owns                  ▼
//!                                   └──────────────────▶ Session
//!                                        log, history, theme, sound,
//!                                        abort flag, store, content
//! ```

pub mod cmd_args;
pub mod config;
pub mod repl;

pub use repl::*;
