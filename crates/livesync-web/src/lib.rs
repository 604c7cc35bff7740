//! livesync-web: browser glue for the live-edge synchronization engine.
//!
//! This crate attaches the platform-free [`livesync_core::SyncEngine`] to a
//! page's `<video>` element via the browser's native media APIs:
//!
//! - [`element`] - Locates the active video surface among candidates
//! - [`probe`] - Buffered-latency probe, live predicate, seek executor
//! - [`storage`] - localStorage-backed configuration persistence
//! - [`session`] - DOM event wiring and the `setInterval` tick loop
//! - [`handle`] - `#[wasm_bindgen]` control surface for page scripts
//!
//! # Architecture
//!
//! ```text
//! Rust/WASM (this crate)              Browser
//! ┌───────────────────────┐          ┌──────────────────────────────┐
//! │ SyncSession           │◄────────►│ <video> element              │
//! │   SyncEngine (core)   │  events  │   timeupdate/seeking/seeked  │
//! │   interval tick       │  probes  │   buffered(), currentTime    │
//! │   LiveSyncHandle      │  seeks   │   localStorage               │
//! └───────────────────────┘          └──────────────────────────────┘
//! ```
//!
//! Everything here is wasm32-only; on native targets the crate compiles
//! empty so workspace-wide builds and tests stay green.

#[cfg(target_arch = "wasm32")]
pub mod element;
#[cfg(target_arch = "wasm32")]
pub mod handle;
#[cfg(target_arch = "wasm32")]
pub mod probe;
#[cfg(target_arch = "wasm32")]
pub mod session;
#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use handle::{start_live_sync, LiveSyncHandle};
#[cfg(target_arch = "wasm32")]
pub use session::{SyncSession, WebError};
