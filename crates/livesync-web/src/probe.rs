//! Media element probes and the seek executor.
//!
//! Thin, stateless adapters between the DOM media API and the core
//! engine's input types. The latency probe reads the end of the last
//! buffered range as the live edge; sparse buffering (multiple ranges)
//! still uses the furthest range, which is where a live stream appends.

use livesync_core::{duration_indicates_live, LatencySample};
use web_sys::HtmlVideoElement;

/// Measures the current buffered latency, or `None` when there is no
/// buffered data or the buffered edge is not strictly ahead of the
/// playback position.
pub fn latency_sample(video: &HtmlVideoElement) -> Option<LatencySample> {
    let buffered = video.buffered();
    let ranges = buffered.length();
    if ranges == 0 {
        return None;
    }
    let edge = buffered.end(ranges - 1).ok()?;
    LatencySample::new(edge, video.current_time())
}

/// Returns whether the element's content is eligible for sync.
pub fn is_live(video: &HtmlVideoElement) -> bool {
    duration_indicates_live(video.duration())
}

/// Sets the playback position. The only side effect a tick produces on
/// the environment.
pub fn seek_to(video: &HtmlVideoElement, target: f64) {
    video.set_current_time(target);
}
