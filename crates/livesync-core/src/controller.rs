//! Tick-driven latency evaluation and corrective seek decisions.
//!
//! Each tick the controller is handed the current buffered latency (or its
//! absence) and decides one of: do nothing, hold in DVR mode, exit DVR and
//! re-evaluate, withhold a seek while the previous one settles, or request
//! a corrective seek to just behind the live edge.
//!
//! The cooldown is intentionally single-shot rather than time-based: a
//! corrective seek produces its own position-update/seek cycle, and
//! suppressing exactly one subsequent evaluation is enough to let it
//! settle without the controller oscillating or double-correcting. Being
//! tick-counted, it can never go stale if check intervals vary.

use crate::seek::SeekClassifier;

/// Slack added to the target buffer when comparing latency. Latency at or
/// below `target_buffer + SYNC_EXIT_SLACK_SECS` counts as "close enough":
/// no seek is issued and DVR mode auto-exits.
pub const SYNC_EXIT_SLACK_SECS: f64 = 1.0;

/// Distance between the live edge and the playback position, measured
/// fresh each tick and never stored.
///
/// Construction enforces the probe contract: the edge must be strictly
/// ahead of the current position, anything else is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySample {
    edge_time: f64,
    current_time: f64,
}

impl LatencySample {
    /// Builds a sample, or `None` when the edge is not strictly ahead of
    /// the playback position (or either value is not a finite number).
    pub fn new(edge_time: f64, current_time: f64) -> Option<Self> {
        if edge_time.is_finite() && current_time.is_finite() && edge_time > current_time {
            Some(Self {
                edge_time,
                current_time,
            })
        } else {
            None
        }
    }

    /// The most recent buffered timestamp (live edge), in seconds.
    pub fn edge_time(&self) -> f64 {
        self.edge_time
    }

    /// The playback position, in seconds.
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Seconds behind the live edge. Always positive.
    pub fn latency(&self) -> f64 {
        self.edge_time - self.current_time
    }
}

/// Outcome of a single tick evaluation.
///
/// Requesting the seek is the controller's decision; executing it is the
/// caller's side effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickAction {
    /// No latency sample was available; nothing was evaluated or altered.
    Idle,
    /// DVR mode is active and latency is still high; sync stays suspended.
    DvrHold,
    /// Latency is within the target; any pending cooldown was cleared.
    InSync,
    /// Latency is high but the previous corrective seek is still settling.
    CooldownHold,
    /// Perform a corrective seek to `target` seconds.
    Seek {
        /// Seek destination: `edge_time - target_buffer`.
        target: f64,
    },
}

/// Latency evaluation state machine.
///
/// Owns only the cooldown flag; the DVR flag lives in the
/// [`SeekClassifier`], which the controller consults and may clear.
#[derive(Debug, Default)]
pub struct SyncController {
    /// Set immediately after a corrective seek, for exactly one
    /// subsequent evaluation.
    cooldown: bool,
}

impl SyncController {
    /// Creates a controller with no pending cooldown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the one-tick cooldown is pending.
    pub fn cooldown_active(&self) -> bool {
        self.cooldown
    }

    /// Evaluates one tick.
    ///
    /// When DVR mode is active and latency has fallen to
    /// `target_buffer + `[`SYNC_EXIT_SLACK_SECS`] or below, DVR mode is
    /// exited and the evaluation falls through to the sync check in the
    /// same tick, using the same latency.
    pub fn tick(
        &mut self,
        classifier: &mut SeekClassifier,
        sample: Option<LatencySample>,
        target_buffer: f64,
        now_ms: f64,
    ) -> TickAction {
        // No buffered data or edge not ahead: normal no-op, not an error.
        // Cooldown and DVR state stay untouched.
        let Some(sample) = sample else {
            return TickAction::Idle;
        };

        let latency = sample.latency();
        let threshold = target_buffer + SYNC_EXIT_SLACK_SECS;

        if classifier.dvr_active() {
            if latency > threshold {
                return TickAction::DvrHold;
            }
            // Auto-exit: the viewer (or the stream) caught back up.
            classifier.exit_dvr();
            tracing::debug!(latency, "latency back within target, leaving DVR mode");
        }

        if latency <= threshold {
            // Settled; consume any pending cooldown.
            self.cooldown = false;
            return TickAction::InSync;
        }

        if self.cooldown {
            // Let the previous corrective seek settle.
            self.cooldown = false;
            return TickAction::CooldownHold;
        }

        // Mark before seeking so the resulting seeked event is attributed
        // to us, not the viewer.
        classifier.mark_sync(now_ms);
        self.cooldown = true;
        let target = sample.edge_time() - target_buffer;
        tracing::debug!(latency, target, "latency above target, seeking toward live edge");
        TickAction::Seek { target }
    }
}
