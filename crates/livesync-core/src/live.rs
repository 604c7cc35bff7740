//! Live-content duration heuristic.
//!
//! Browsers report `Infinity` for the duration of an open-ended live
//! stream, but some platforms instead report a very large finite duration
//! for live events with DVR windows. Anything longer than six hours is
//! treated as live; ordinary VOD content rarely exceeds that.

/// Finite durations strictly greater than this (seconds) indicate live
/// content. Six hours.
pub const LIVE_MIN_DURATION_SECS: f64 = 21600.0;

/// Returns whether a reported media duration indicates live content.
///
/// NaN (duration unknown / no media) is not live; `Infinity` is live;
/// finite durations are live only when strictly greater than
/// [`LIVE_MIN_DURATION_SECS`].
pub fn duration_indicates_live(duration: f64) -> bool {
    if duration.is_nan() {
        return false;
    }
    duration > LIVE_MIN_DURATION_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scenario: 21600 is not live, 21601 is, Infinity is, NaN is not.
    #[test]
    fn test_duration_boundaries() {
        assert!(!duration_indicates_live(21600.0));
        assert!(duration_indicates_live(21601.0));
        assert!(duration_indicates_live(f64::INFINITY));
        assert!(!duration_indicates_live(f64::NAN));
    }

    #[test]
    fn test_short_vod_is_not_live() {
        assert!(!duration_indicates_live(0.0));
        assert!(!duration_indicates_live(5400.0));
        assert!(!duration_indicates_live(f64::NEG_INFINITY));
    }
}
