//! DOM event wiring and the periodic tick loop.
//!
//! A [`SyncSession`] owns one [`SyncEngine`] for the lifetime of the page
//! and drives it from two sources interleaved on the browser's single
//! event loop:
//!
//! - `timeupdate` / `seeking` / `seeked` listeners on the active video
//!   element (capture phase, so the page's own handlers cannot swallow
//!   them), feeding the engine's event inlets
//! - a `setInterval` timer running the latency evaluation
//!
//! The position-source ordering the engine relies on (seek-start before
//! seek-end, no position advance in between for the same surface) is
//! guaranteed by the browser's event dispatch; `timeupdate` events that
//! fire while `video.seeking()` is true are dropped here so an in-flight
//! seek never clobbers the pre-seek snapshot.

use std::cell::RefCell;
use std::rc::Rc;

use livesync_core::{SyncConfig, SyncEngine, SyncStatus, TickAction};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlVideoElement};

use crate::{element, probe};

/// Errors raised while attaching to the page. Once a session is running
/// there are no fatal conditions: every tick degrades to a no-op instead.
#[derive(Debug, Clone, PartialEq)]
pub enum WebError {
    /// No window object available (not running in a browser context)
    NoWindow,
    /// A DOM operation failed
    Dom(String),
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebError::NoWindow => write!(f, "No window object available"),
            WebError::Dom(msg) => write!(f, "DOM operation failed: {msg}"),
        }
    }
}

impl std::error::Error for WebError {}

/// Session state shared between the tick closure and the event listeners.
struct Inner {
    engine: SyncEngine,
    /// The video element currently being tracked, if any.
    video: Option<HtmlVideoElement>,
    /// Listeners attached to `video`; re-created when the surface changes.
    listeners: Option<VideoListeners>,
}

/// Background sync task attached to the page.
///
/// Dropping the session stops the timer and detaches all listeners.
pub struct SyncSession {
    inner: Rc<RefCell<Inner>>,
    /// Keeps the interval callback alive for the session lifetime.
    _tick: Closure<dyn FnMut()>,
    interval_id: i32,
}

impl SyncSession {
    /// Starts the background task with the given configuration.
    pub fn start(config: SyncConfig) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let interval_ms = config.check_interval_ms;

        let inner = Rc::new(RefCell::new(Inner {
            engine: SyncEngine::new(config),
            video: None,
            listeners: None,
        }));

        let tick = {
            let inner = Rc::clone(&inner);
            Closure::<dyn FnMut()>::new(move || run_tick(&inner))
        };

        let interval_id = window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                tick.as_ref().unchecked_ref(),
                interval_ms as i32,
            )
            .map_err(|err| WebError::Dom(format!("setInterval failed: {err:?}")))?;

        tracing::info!(interval_ms, "live-edge sync session started");

        Ok(Self {
            inner,
            _tick: tick,
            interval_id,
        })
    }

    /// Runs a control operation against the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut SyncEngine) -> R) -> R {
        f(&mut self.inner.borrow_mut().engine)
    }

    /// Builds a status snapshot with freshly probed latency and liveness.
    pub fn status(&self) -> SyncStatus {
        let inner = self.inner.borrow();
        let (latency, is_live) = match &inner.video {
            Some(video) => (
                probe::latency_sample(video).map(|s| s.latency()),
                probe::is_live(video),
            ),
            None => (None, false),
        };
        inner.engine.status(latency, is_live)
    }
}

impl Drop for SyncSession {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.interval_id);
        }
        if let Some(listeners) = self.inner.borrow_mut().listeners.take() {
            listeners.detach();
        }
    }
}

/// One timer tick: refresh the tracked surface and content identity, then
/// evaluate latency and execute any requested corrective seek.
fn run_tick(inner: &Rc<RefCell<Inner>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let active = element::find_active_video(&document);

    let mut guard = inner.borrow_mut();
    if !element::same_element(guard.video.as_ref(), active.as_ref()) {
        if let Some(old) = guard.listeners.take() {
            old.detach();
        }
        if let Some(video) = &active {
            guard.listeners = Some(VideoListeners::attach(inner, video));
        }
        guard.video = active;
    }

    let Some(video) = guard.video.clone() else {
        guard.engine.observe_content(None);
        return;
    };

    // Ordering contract: content identity refresh runs before the
    // DVR/latency evaluation.
    let identity = element::content_identity(&video);
    guard.engine.observe_content(identity.as_deref());

    let sample = probe::latency_sample(&video);
    let is_live = probe::is_live(&video);
    let action = guard.engine.tick(sample, is_live, now_ms());
    if let TickAction::Seek { target } = action {
        probe::seek_to(&video, target);
    }
}

/// Capture-phase listeners feeding the engine's position source inlets.
struct VideoListeners {
    video: HtmlVideoElement,
    on_timeupdate: Closure<dyn FnMut(Event)>,
    on_seeking: Closure<dyn FnMut(Event)>,
    on_seeked: Closure<dyn FnMut(Event)>,
}

/// Registered capture-phase so the page cannot intercept the events first.
const USE_CAPTURE: bool = true;

impl VideoListeners {
    fn attach(inner: &Rc<RefCell<Inner>>, video: &HtmlVideoElement) -> Self {
        let on_timeupdate = {
            let inner = Rc::clone(inner);
            let video = video.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                // Positions observed mid-seek must not clobber the
                // pre-seek snapshot.
                if video.seeking() {
                    return;
                }
                inner
                    .borrow_mut()
                    .engine
                    .handle_position_update(video.current_time());
            })
        };

        let on_seeking = {
            let inner = Rc::clone(inner);
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                inner.borrow_mut().engine.handle_seek_start();
            })
        };

        let on_seeked = {
            let inner = Rc::clone(inner);
            let video = video.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                inner
                    .borrow_mut()
                    .engine
                    .handle_seek_end(video.current_time(), now_ms());
            })
        };

        video
            .add_event_listener_with_callback_and_bool(
                "timeupdate",
                on_timeupdate.as_ref().unchecked_ref(),
                USE_CAPTURE,
            )
            .ok();
        video
            .add_event_listener_with_callback_and_bool(
                "seeking",
                on_seeking.as_ref().unchecked_ref(),
                USE_CAPTURE,
            )
            .ok();
        video
            .add_event_listener_with_callback_and_bool(
                "seeked",
                on_seeked.as_ref().unchecked_ref(),
                USE_CAPTURE,
            )
            .ok();

        Self {
            video: video.clone(),
            on_timeupdate,
            on_seeking,
            on_seeked,
        }
    }

    fn detach(&self) {
        self.video
            .remove_event_listener_with_callback_and_bool(
                "timeupdate",
                self.on_timeupdate.as_ref().unchecked_ref(),
                USE_CAPTURE,
            )
            .ok();
        self.video
            .remove_event_listener_with_callback_and_bool(
                "seeking",
                self.on_seeking.as_ref().unchecked_ref(),
                USE_CAPTURE,
            )
            .ok();
        self.video
            .remove_event_listener_with_callback_and_bool(
                "seeked",
                self.on_seeked.as_ref().unchecked_ref(),
                USE_CAPTURE,
            )
            .ok();
    }
}

/// Monotonic-ish wall time in milliseconds for grace-period bookkeeping.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}
