//! Seek classification: intentional user rewind vs. incidental jump.
//!
//! Live players produce position jumps from three sources: the viewer
//! scrubbing the timeline, the player's internal buffer adjustments
//! (empirically sub-second), and this engine's own corrective seeks. Only
//! the first should suspend synchronization (DVR mode). The classifier
//! distinguishes them with two fixed heuristics:
//!
//! - A time grace period: a seek ending within [`SELF_SEEK_GRACE_MS`] of
//!   the last corrective seek is attributed to that seek and ignored.
//! - A magnitude threshold: only a backward jump strictly greater than
//!   [`DVR_JUMP_THRESHOLD_SECS`] counts as an intentional rewind.
//!
//! # Known limitation
//!
//! The grace period is approximate by nature: a coincidental user seek
//! within one second of an auto-sync is misclassified as self-inflicted.
//! There is no ground truth for intent, so this stays as-is.

/// Window after a corrective seek during which seek-end events are
/// attributed to that seek rather than the viewer.
pub const SELF_SEEK_GRACE_MS: f64 = 1000.0;

/// Minimum backward jump (seconds) treated as an intentional rewind.
/// Exactly this value does NOT trigger; the comparison is strict.
pub const DVR_JUMP_THRESHOLD_SECS: f64 = 5.0;

/// Outcome of evaluating a completed seek.
///
/// Observability only: callers may log it, but decisions flow through
/// [`SeekClassifier::dvr_active`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekVerdict {
    /// The seek landed inside the grace period after a corrective seek
    /// and was ignored.
    SelfSeek,
    /// The seek was a large backward jump; DVR mode is now active.
    EnteredDvr {
        /// How far back the viewer jumped, in seconds.
        jump_back: f64,
    },
    /// Forward seek, small backward seek, or zero jump. No state change.
    Unchanged,
}

/// Observes playback-position transitions and maintains the DVR flag.
///
/// All state is instance-owned; construct one per playback session. Event
/// ordering is a documented precondition of the position source: seek-start
/// always precedes seek-end for the same seek, and no position-advance
/// events fire between them for the same surface.
#[derive(Debug, Default)]
pub struct SeekClassifier {
    /// Most recent confirmed playback position before a seek begins.
    last_known_time: f64,
    /// Position snapshot captured at seek start. Only valid between a
    /// seek-start and the next seek-end; stale across unrelated seeks.
    seek_start_time: f64,
    /// Timestamp (ms) of the engine's last corrective seek. Zero = never.
    last_sync_ms: f64,
    /// Viewer is considered to be browsing behind the live edge.
    dvr_active: bool,
}

impl SeekClassifier {
    /// Creates a classifier with all state zeroed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the latest stable playback position.
    ///
    /// Must be invoked on every position tick that is *not* part of an
    /// in-flight seek, so the snapshot taken by [`on_seek_start`] reflects
    /// the true pre-seek position.
    ///
    /// [`on_seek_start`]: SeekClassifier::on_seek_start
    pub fn on_position_update(&mut self, current_time: f64) {
        self.last_known_time = current_time;
    }

    /// Snapshots the pre-seek position. Must run before the seek target
    /// becomes observable as the current position.
    pub fn on_seek_start(&mut self) {
        self.seek_start_time = self.last_known_time;
    }

    /// Evaluates a completed seek.
    ///
    /// Inside the grace period the seek is attributed to the engine's own
    /// corrective action and ignored entirely. Otherwise a backward jump
    /// strictly greater than [`DVR_JUMP_THRESHOLD_SECS`] activates DVR
    /// mode; anything else leaves state unchanged.
    pub fn on_seek_end(&mut self, new_current_time: f64, now_ms: f64) -> SeekVerdict {
        // Strict comparison: exactly SELF_SEEK_GRACE_MS since the last
        // sync is a new, evaluable seek.
        if now_ms - self.last_sync_ms < SELF_SEEK_GRACE_MS {
            return SeekVerdict::SelfSeek;
        }

        let jump_back = self.seek_start_time - new_current_time;
        if jump_back > DVR_JUMP_THRESHOLD_SECS {
            self.dvr_active = true;
            tracing::debug!(jump_back, "large rewind detected, entering DVR mode");
            SeekVerdict::EnteredDvr { jump_back }
        } else {
            SeekVerdict::Unchanged
        }
    }

    /// Records that the engine is about to perform a corrective seek, so
    /// the resulting seek-end event is classified as self-inflicted.
    pub fn mark_sync(&mut self, now_ms: f64) {
        self.last_sync_ms = now_ms;
    }

    /// Returns whether the viewer is considered behind the live edge.
    pub fn dvr_active(&self) -> bool {
        self.dvr_active
    }

    /// Clears DVR mode.
    pub fn exit_dvr(&mut self) {
        self.dvr_active = false;
    }

    /// Resets DVR state and the position sample when the tracked content
    /// identity changes (new video loaded).
    pub fn reset_for_new_content(&mut self) {
        self.dvr_active = false;
        self.last_known_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario: rewind of 30s well outside the grace period activates DVR.
    #[test]
    fn test_large_rewind_enters_dvr() {
        let mut classifier = SeekClassifier::new();
        classifier.on_position_update(100.0);
        classifier.on_seek_start();

        let verdict = classifier.on_seek_end(70.0, 5000.0);
        assert_eq!(verdict, SeekVerdict::EnteredDvr { jump_back: 30.0 });
        assert!(classifier.dvr_active());
    }

    /// Scenario: jump of exactly 5.0s is NOT a rewind (boundary exclusive).
    #[test]
    fn test_threshold_boundary_is_exclusive() {
        let mut classifier = SeekClassifier::new();
        classifier.on_position_update(100.0);
        classifier.on_seek_start();

        let verdict = classifier.on_seek_end(95.0, 5000.0);
        assert_eq!(verdict, SeekVerdict::Unchanged);
        assert!(!classifier.dvr_active());
    }

    #[test]
    fn test_small_and_forward_jumps_ignored() {
        let mut classifier = SeekClassifier::new();
        classifier.on_position_update(100.0);

        // Small backward seek
        classifier.on_seek_start();
        assert_eq!(classifier.on_seek_end(97.5, 5000.0), SeekVerdict::Unchanged);
        assert!(!classifier.dvr_active());

        // Forward seek
        classifier.on_position_update(97.5);
        classifier.on_seek_start();
        assert_eq!(classifier.on_seek_end(150.0, 6000.0), SeekVerdict::Unchanged);
        assert!(!classifier.dvr_active());

        // Zero jump
        classifier.on_position_update(150.0);
        classifier.on_seek_start();
        assert_eq!(classifier.on_seek_end(150.0, 7000.0), SeekVerdict::Unchanged);
        assert!(!classifier.dvr_active());
    }

    /// A seek ending within the grace period is a no-op regardless of size.
    #[test]
    fn test_grace_period_absorbs_self_seek() {
        let mut classifier = SeekClassifier::new();
        classifier.on_position_update(100.0);
        classifier.mark_sync(4500.0);
        classifier.on_seek_start();

        let verdict = classifier.on_seek_end(10.0, 5000.0); // 500ms after sync
        assert_eq!(verdict, SeekVerdict::SelfSeek);
        assert!(!classifier.dvr_active());
    }

    /// Exactly 1000ms since the sync is a new, evaluable seek.
    #[test]
    fn test_grace_period_boundary_is_exclusive() {
        let mut classifier = SeekClassifier::new();
        classifier.on_position_update(100.0);
        classifier.mark_sync(4000.0);
        classifier.on_seek_start();

        let verdict = classifier.on_seek_end(70.0, 5000.0); // exactly 1000ms later
        assert_eq!(verdict, SeekVerdict::EnteredDvr { jump_back: 30.0 });
        assert!(classifier.dvr_active());
    }

    #[test]
    fn test_content_change_resets_state() {
        let mut classifier = SeekClassifier::new();
        classifier.on_position_update(100.0);
        classifier.on_seek_start();
        classifier.on_seek_end(70.0, 5000.0);
        assert!(classifier.dvr_active());

        classifier.reset_for_new_content();
        assert!(!classifier.dvr_active());

        // last_known_time was cleared: a seek right after the reset has no
        // stale pre-seek position to compare against.
        classifier.on_seek_start();
        assert_eq!(classifier.on_seek_end(0.0, 9000.0), SeekVerdict::Unchanged);
    }
}
