//! Boundary cleanup of provider response text.
//!
//! Chat models tend to wrap answers in markdown code fences with a language
//! tag. The markers are trimmed from the start and end of the text only;
//! this is a prefix/suffix trim, not a content-wide replace, so a legitimate
//! leading or trailing character sequence that coincides with a marker is
//! removed as well.

/// Marker substrings trimmed from response boundaries.
pub const RESPONSE_MARKERS: &[&str] = &["```", "json", "python"];

/// Trim marker substrings from both boundaries of `text`, repeating across
/// the marker list until no marker remains at either end. Interior
/// occurrences are never touched.
pub fn trim_markers<'a>(text: &'a str, markers: &[&str]) -> &'a str {
    let mut rest = text;
    loop {
        let mut trimmed = false;
        for marker in markers {
            if marker.is_empty() {
                continue;
            }
            while let Some(stripped) = rest.strip_prefix(marker) {
                rest = stripped;
                trimmed = true;
            }
            while let Some(stripped) = rest.strip_suffix(marker) {
                rest = stripped;
                trimmed = true;
            }
        }
        if !trimmed {
            break;
        }
    }
    rest
}

/// Trim the default response markers from both boundaries.
pub fn clean_response(text: &str) -> &str {
    trim_markers(text, RESPONSE_MARKERS)
}
