//! # Services Layer
//!
//! Resources the commands reach through the session: persistent storage,
//! audio cues, the outbound HTTP client and its asset cache.

pub mod cache;
pub mod http;
pub mod sound;
pub mod storage;

pub use cache::{AssetCache, ASSET_MANIFEST};
pub use http::{FetchError, FetchPolicy, HttpService};
pub use sound::{NullSink, RecordingSink, SoundBoard, TerminalBell, Tone, ToneSink};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
