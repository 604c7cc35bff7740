//! Active video surface discovery.
//!
//! Pages can carry several `<video>` elements (previews, ads, the main
//! player). The active surface is re-resolved on every tick: among the
//! elements that have media data, the one with the largest intrinsic
//! frame area wins. Content identity is the element's resolved source
//! URL, which changes when a new video is loaded into the same element.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlVideoElement};

/// HAVE_METADATA: dimensions and duration are known.
const READY_STATE_HAVE_METADATA: u16 = 1;

/// Finds the most plausible playback surface on the page, or `None` when
/// no video element has media data yet.
pub fn find_active_video(document: &Document) -> Option<HtmlVideoElement> {
    let candidates = document.get_elements_by_tag_name("video");
    let mut best: Option<(u32, HtmlVideoElement)> = None;

    for index in 0..candidates.length() {
        let Some(element) = candidates.item(index) else {
            continue;
        };
        let Ok(video) = element.dyn_into::<HtmlVideoElement>() else {
            continue;
        };
        if video.ready_state() < READY_STATE_HAVE_METADATA {
            continue;
        }

        let area = video.video_width() * video.video_height();
        let better = best.as_ref().map(|(best_area, _)| area > *best_area);
        if better.unwrap_or(true) {
            best = Some((area, video));
        }
    }

    best.map(|(_, video)| video)
}

/// Stable identifier for the loaded content, or `None` when the element
/// has no resolved source.
pub fn content_identity(video: &HtmlVideoElement) -> Option<String> {
    let src = video.current_src();
    if src.is_empty() {
        None
    } else {
        Some(src)
    }
}

/// Whether two optional element references point at the same DOM node.
/// Equality on web-sys handles is JS `===`, i.e. object identity.
pub fn same_element(a: Option<&HtmlVideoElement>, b: Option<&HtmlVideoElement>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        (None, None) => true,
        _ => false,
    }
}
