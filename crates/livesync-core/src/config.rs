//! Persisted configuration shape.
//!
//! The configuration is owned by an external store (the web layer persists
//! it as JSON in localStorage); the engine treats it as read-only input per
//! tick. Unknown or missing fields fall back to their defaults so a config
//! written by an older build still loads.

use serde::{Deserialize, Serialize};

/// Default distance to keep behind the live edge, in seconds.
pub const DEFAULT_TARGET_BUFFER_SECS: f64 = 5.0;

/// Default interval between latency evaluations, in milliseconds.
pub const DEFAULT_CHECK_INTERVAL_MS: u32 = 1000;

/// User-facing configuration, persisted across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    /// Master switch, consulted at the top of each tick.
    pub enabled: bool,
    /// Seconds to stay behind the live edge after a corrective seek.
    pub target_buffer: f64,
    /// Milliseconds between latency evaluations.
    pub check_interval_ms: u32,
    /// Emit per-tick decision logs.
    pub debug_logging: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_buffer: DEFAULT_TARGET_BUFFER_SECS,
            check_interval_ms: DEFAULT_CHECK_INTERVAL_MS,
            debug_logging: false,
        }
    }
}

impl SyncConfig {
    /// Sets the target buffer, rejecting NaN, infinite, or negative input.
    /// Returns whether the value was applied; rejection leaves the current
    /// value unchanged.
    pub fn set_target_buffer(&mut self, seconds: f64) -> bool {
        if !seconds.is_finite() || seconds < 0.0 {
            return false;
        }
        self.target_buffer = seconds;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert!(config.enabled);
        assert_eq!(config.target_buffer, DEFAULT_TARGET_BUFFER_SECS);
        assert_eq!(config.check_interval_ms, DEFAULT_CHECK_INTERVAL_MS);
        assert!(!config.debug_logging);
    }

    #[test]
    fn test_set_target_buffer_validation() {
        let mut config = SyncConfig::default();

        assert!(config.set_target_buffer(8.5));
        assert_eq!(config.target_buffer, 8.5);

        // Zero is a valid target (play right at the edge).
        assert!(config.set_target_buffer(0.0));
        assert_eq!(config.target_buffer, 0.0);

        assert!(!config.set_target_buffer(-1.0));
        assert!(!config.set_target_buffer(f64::NAN));
        assert!(!config.set_target_buffer(f64::INFINITY));
        assert_eq!(config.target_buffer, 0.0);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: SyncConfig = serde_json::from_str(r#"{"targetBuffer": 3.0}"#).unwrap();
        assert_eq!(config.target_buffer, 3.0);
        assert!(config.enabled);
        assert_eq!(config.check_interval_ms, DEFAULT_CHECK_INTERVAL_MS);
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SyncConfig::default();
        config.enabled = false;
        config.debug_logging = true;
        config.set_target_buffer(7.0);

        let json = serde_json::to_string(&config).unwrap();
        let restored: SyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, config);
    }
}
