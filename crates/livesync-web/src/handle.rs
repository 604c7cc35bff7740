//! Page-script control surface.
//!
//! Exported through wasm-bindgen so the page (or a devtools console) can
//! drive the engine: enable/disable, target buffer, forced DVR exit,
//! debug logging, and a status query returning a plain JS object.

use wasm_bindgen::prelude::*;

use crate::session::SyncSession;
use crate::storage;

/// Handle over a running sync session.
///
/// Dropping the handle (letting it be garbage collected) stops the
/// session's timer and detaches its listeners.
#[wasm_bindgen]
pub struct LiveSyncHandle {
    session: SyncSession,
}

/// Starts the background sync task against the current page, loading the
/// persisted configuration (defaults on first run or malformed storage).
#[wasm_bindgen(js_name = startLiveSync)]
pub fn start_live_sync() -> Result<LiveSyncHandle, JsValue> {
    init_diagnostics();
    let config = storage::load_config();
    let session =
        SyncSession::start(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(LiveSyncHandle { session })
}

#[wasm_bindgen]
impl LiveSyncHandle {
    /// Enables synchronization; also forces DVR exit.
    pub fn enable(&self) {
        self.session.with_engine(|engine| engine.enable());
        self.persist();
    }

    /// Disables synchronization.
    pub fn disable(&self) {
        self.session.with_engine(|engine| engine.disable());
        self.persist();
    }

    /// Sets the target buffer in seconds. Negative or non-numeric input is
    /// rejected and nothing changes; returns whether the value was applied.
    #[wasm_bindgen(js_name = setBuffer)]
    pub fn set_buffer(&self, seconds: f64) -> bool {
        let applied = self
            .session
            .with_engine(|engine| engine.set_target_buffer(seconds));
        if applied {
            self.persist();
        }
        applied
    }

    /// Forces DVR exit unconditionally.
    #[wasm_bindgen(js_name = exitDvr)]
    pub fn exit_dvr(&self) {
        self.session.with_engine(|engine| engine.exit_dvr());
    }

    /// Flips debug logging and returns the new value.
    #[wasm_bindgen(js_name = toggleDebug)]
    pub fn toggle_debug(&self) -> bool {
        let value = self.session.with_engine(|engine| engine.toggle_debug());
        self.persist();
        value
    }

    /// Returns the current status as a plain JS object:
    /// `{enabled, dvrMode, targetBuffer, debugLogging, currentLatency, isLive}`.
    pub fn status(&self) -> JsValue {
        let status = self.session.status();
        serde_json::to_string(&status)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL)
    }
}

impl LiveSyncHandle {
    fn persist(&self) {
        self.session
            .with_engine(|engine| storage::save_config(engine.config()));
    }
}

/// Installs the panic hook and tracing subscriber exactly once.
fn init_diagnostics() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    });
}
