//! livesync-core: DVR-aware live-edge synchronization engine.
//!
//! This crate contains the platform-free decision logic for keeping a live
//! video's playback position close to the live edge:
//!
//! - [`seek`] - Classifies playback-position jumps: user rewind (DVR mode)
//!   vs. incidental buffer adjustments vs. the engine's own corrective seeks
//! - [`controller`] - Tick-driven latency evaluation with a one-tick
//!   cooldown after each corrective seek
//! - [`engine`] - Session-scoped [`SyncEngine`] composing the two state
//!   machines behind a single control surface
//! - [`config`] - Persisted configuration shape and validated setters
//! - [`live`] - Live-content duration heuristic
//!
//! This crate has **zero DOM dependency** and no wall clock of its own: all
//! timestamps enter as caller-supplied milliseconds. It compiles and tests
//! on every target including wasm32, and is consumed by `livesync-web`
//! (the browser integration layer).

pub mod config;
pub mod controller;
pub mod engine;
pub mod live;
pub mod seek;

pub use config::{SyncConfig, DEFAULT_CHECK_INTERVAL_MS, DEFAULT_TARGET_BUFFER_SECS};
pub use controller::{LatencySample, SyncController, TickAction, SYNC_EXIT_SLACK_SECS};
pub use engine::{SyncEngine, SyncStatus};
pub use live::{duration_indicates_live, LIVE_MIN_DURATION_SECS};
pub use seek::{SeekClassifier, SeekVerdict, DVR_JUMP_THRESHOLD_SECS, SELF_SEEK_GRACE_MS};
