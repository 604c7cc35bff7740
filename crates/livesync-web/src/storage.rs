//! Configuration persistence over localStorage.
//!
//! The configuration lives as a single JSON document under a fixed key.
//! Every failure path (no storage, quota, malformed JSON) degrades to
//! defaults or a skipped write; persistence is never load-bearing.

use livesync_core::SyncConfig;
use web_sys::Storage;

const CONFIG_STORAGE_KEY: &str = "livesync.config";

/// Loads the persisted configuration, falling back to defaults when the
/// store is unavailable or the stored JSON does not parse.
pub fn load_config() -> SyncConfig {
    let Some(storage) = local_storage() else {
        return SyncConfig::default();
    };
    match storage.get_item(CONFIG_STORAGE_KEY) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|err| {
            tracing::warn!(%err, "stored config unreadable, using defaults");
            SyncConfig::default()
        }),
        _ => SyncConfig::default(),
    }
}

/// Persists the configuration. Write failures are logged and dropped.
pub fn save_config(config: &SyncConfig) {
    let Some(storage) = local_storage() else {
        return;
    };
    let Ok(json) = serde_json::to_string(config) else {
        return;
    };
    if storage.set_item(CONFIG_STORAGE_KEY, &json).is_err() {
        tracing::warn!("failed to persist config");
    }
}

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
