pub const HEADER_SCROLL_THRESHOLD: f64 = 100.0;
pub const ANCHOR_HEADER_OFFSET: f64 = 100.0;
pub const DEFAULT_PARALLAX_SPEED: f64 = 0.3;

/// Whether the header should carry its `scrolled` class. The threshold
/// itself still counts as the top of the page.
pub fn header_is_scrolled(scroll_y: f64) -> bool {
    scroll_y > HEADER_SCROLL_THRESHOLD
}

/// Document-space scroll target that leaves the anchored element just below
/// the fixed header.
pub fn anchor_scroll_top(element_viewport_top: f64, scroll_y: f64) -> f64 {
    element_viewport_top + scroll_y - ANCHOR_HEADER_OFFSET
}

/// In-page fragment an anchor points at, or `None` for a bare `#` or a
/// non-fragment href.
pub fn fragment_selector(href: &str) -> Option<&str> {
    let trimmed = href.trim();
    if trimmed.len() > 1 && trimmed.starts_with('#') {
        Some(trimmed)
    } else {
        None
    }
}

/// Fraction of the scrollable range already covered, in `[0, 1]`. A page
/// that cannot scroll reports zero.
pub fn progress_fraction(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let range = scroll_height - viewport_height;
    if !range.is_finite() || range <= 0.0 {
        return 0.0;
    }

    (scroll_y / range).clamp(0.0, 1.0)
}

pub fn progress_width(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

pub fn parse_parallax_speed(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(DEFAULT_PARALLAX_SPEED)
}

pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
    format!("translateY({:.2}px)", scroll_y * speed)
}
