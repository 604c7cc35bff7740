//! Session-scoped synchronization engine.
//!
//! [`SyncEngine`] composes the [`SeekClassifier`] and [`SyncController`]
//! behind a single control surface, owning all mutable session state
//! (DVR flag, cooldown, position samples, configuration, content
//! identity). External callers only read state via [`SyncEngine::status`]
//! or invoke the defined control operations; fields are never written
//! directly.
//!
//! # Invocation model
//!
//! Single-threaded, cooperative: a periodic timer drives [`tick`], and
//! position/seek events drive the event inlets. The host guarantees ticks
//! do not overlap and that seek-start precedes seek-end with no
//! interleaved position updates for the same surface. Within one tick,
//! [`observe_content`] must run before [`tick`] so a content change is
//! seen before deciding DVR exit.
//!
//! [`tick`]: SyncEngine::tick
//! [`observe_content`]: SyncEngine::observe_content

use serde::Serialize;

use crate::config::SyncConfig;
use crate::controller::{LatencySample, SyncController, TickAction};
use crate::seek::{SeekClassifier, SeekVerdict};

/// Snapshot of engine state for status queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    /// Whether synchronization is enabled.
    pub enabled: bool,
    /// Whether the viewer is considered behind the live edge.
    pub dvr_mode: bool,
    /// Configured seconds to keep behind the live edge.
    pub target_buffer: f64,
    /// Whether per-tick decision logs are emitted.
    pub debug_logging: bool,
    /// Current buffered latency in seconds, when measurable.
    pub current_latency: Option<f64>,
    /// Whether the current content is eligible for sync.
    pub is_live: bool,
}

/// One engine instance per page session; lives for the session lifetime.
#[derive(Debug)]
pub struct SyncEngine {
    config: SyncConfig,
    classifier: SeekClassifier,
    controller: SyncController,
    /// Identity of the currently tracked content, for change detection.
    content_id: Option<String>,
}

impl SyncEngine {
    /// Creates an engine with the given configuration and zeroed state.
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            classifier: SeekClassifier::new(),
            controller: SyncController::new(),
            content_id: None,
        }
    }

    /// Read access to the current configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Returns whether the viewer is considered behind the live edge.
    pub fn dvr_active(&self) -> bool {
        self.classifier.dvr_active()
    }

    // ------------------------------------------------------------------
    // Event inlets (position source)
    // ------------------------------------------------------------------

    /// Feed the latest stable playback position. Must not be called for
    /// positions observed mid-seek.
    pub fn handle_position_update(&mut self, current_time: f64) {
        self.classifier.on_position_update(current_time);
    }

    /// A seek has begun; snapshot the pre-seek position.
    pub fn handle_seek_start(&mut self) {
        self.classifier.on_seek_start();
    }

    /// A seek has completed at `new_current_time`.
    pub fn handle_seek_end(&mut self, new_current_time: f64, now_ms: f64) -> SeekVerdict {
        let verdict = self.classifier.on_seek_end(new_current_time, now_ms);
        if self.config.debug_logging {
            match verdict {
                SeekVerdict::SelfSeek => {
                    tracing::debug!("seek within sync grace period, ignored");
                }
                SeekVerdict::EnteredDvr { jump_back } => {
                    tracing::info!(jump_back, "viewer rewound, sync suspended");
                }
                SeekVerdict::Unchanged => {}
            }
        }
        verdict
    }

    // ------------------------------------------------------------------
    // Per-tick inlets
    // ------------------------------------------------------------------

    /// Observe the current content identity; a change resets DVR state and
    /// the last-known position. Must run before [`tick`] within the same
    /// evaluation so the change is seen before deciding DVR exit.
    ///
    /// [`tick`]: SyncEngine::tick
    pub fn observe_content(&mut self, id: Option<&str>) {
        if self.content_id.as_deref() == id {
            return;
        }
        if self.content_id.is_some() {
            tracing::info!("content changed, resetting DVR state");
        }
        self.content_id = id.map(str::to_owned);
        self.classifier.reset_for_new_content();
    }

    /// Evaluate one tick. Returns [`TickAction::Idle`] without evaluating
    /// when disabled or the content is not live.
    pub fn tick(
        &mut self,
        sample: Option<LatencySample>,
        is_live: bool,
        now_ms: f64,
    ) -> TickAction {
        if !self.config.enabled || !is_live {
            return TickAction::Idle;
        }
        let action = self.controller.tick(
            &mut self.classifier,
            sample,
            self.config.target_buffer,
            now_ms,
        );
        if self.config.debug_logging {
            let latency = sample.map(|s| s.latency());
            tracing::debug!(?action, ?latency, "tick evaluated");
        }
        action
    }

    // ------------------------------------------------------------------
    // Control surface
    // ------------------------------------------------------------------

    /// Enables synchronization and forces DVR exit.
    pub fn enable(&mut self) {
        self.config.enabled = true;
        self.classifier.exit_dvr();
        tracing::info!("sync enabled");
    }

    /// Disables synchronization. State is retained; ticks become no-ops.
    pub fn disable(&mut self) {
        self.config.enabled = false;
        tracing::info!("sync disabled");
    }

    /// Sets the target buffer; rejects NaN, infinite, or negative input
    /// silently. Returns whether the value was applied.
    pub fn set_target_buffer(&mut self, seconds: f64) -> bool {
        let applied = self.config.set_target_buffer(seconds);
        if applied {
            tracing::info!(seconds, "target buffer updated");
        }
        applied
    }

    /// Forces DVR exit unconditionally.
    pub fn exit_dvr(&mut self) {
        self.classifier.exit_dvr();
    }

    /// Flips debug logging and returns the new value.
    pub fn toggle_debug(&mut self) -> bool {
        self.config.debug_logging = !self.config.debug_logging;
        self.config.debug_logging
    }

    /// Builds a status snapshot. Latency and liveness are probed by the
    /// caller at query time; everything else is engine state.
    pub fn status(&self, current_latency: Option<f64>, is_live: bool) -> SyncStatus {
        SyncStatus {
            enabled: self.config.enabled,
            dvr_mode: self.classifier.dvr_active(),
            target_buffer: self.config.target_buffer,
            debug_logging: self.config.debug_logging,
            current_latency,
            is_live,
        }
    }
}
