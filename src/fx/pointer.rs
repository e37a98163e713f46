pub const CURSOR_EASING: f64 = 0.15;
pub const MAGNETIC_STRENGTH: f64 = 0.3;
pub const TILT_MAX_DEGREES: f64 = 10.0;

/// Bounding box in viewport coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Click position relative to the element the ripple is appended to.
pub fn ripple_offset(client_x: f64, client_y: f64, bounds: Bounds) -> (f64, f64) {
    (client_x - bounds.left, client_y - bounds.top)
}

pub fn ripple_style(offset: (f64, f64)) -> (String, String) {
    (format!("{:.2}px", offset.0), format!("{:.2}px", offset.1))
}

/// Dot that chases the pointer with exponential smoothing, one step per
/// animation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorFollower {
    pub x: f64,
    pub y: f64,
    target_x: f64,
    target_y: f64,
    seen_pointer: bool,
}

impl CursorFollower {
    /// Records a pointer sample. Returns `true` for the first sample, which
    /// also snaps the dot so it does not sweep in from the corner.
    pub fn point_at(&mut self, x: f64, y: f64) -> bool {
        self.target_x = x;
        self.target_y = y;

        if self.seen_pointer {
            return false;
        }

        self.seen_pointer = true;
        self.x = x;
        self.y = y;
        true
    }

    pub fn step(&mut self) -> (f64, f64) {
        self.x += (self.target_x - self.x) * CURSOR_EASING;
        self.y += (self.target_y - self.y) * CURSOR_EASING;
        (self.x, self.y)
    }

    pub fn has_pointer(&self) -> bool {
        self.seen_pointer
    }

    pub fn transform(&self) -> String {
        format!("translate3d({:.2}px, {:.2}px, 0)", self.x, self.y)
    }
}

/// Pull toward the pointer, proportional to its distance from the centre.
pub fn magnetic_offset(client_x: f64, client_y: f64, bounds: Bounds) -> (f64, f64) {
    let (center_x, center_y) = bounds.center();
    (
        (client_x - center_x) * MAGNETIC_STRENGTH,
        (client_y - center_y) * MAGNETIC_STRENGTH,
    )
}

pub fn magnetic_transform(offset: (f64, f64)) -> String {
    format!("translate({:.2}px, {:.2}px)", offset.0, offset.1)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tilt {
    /// Rotation about the horizontal axis, from vertical pointer position.
    pub x_degrees: f64,
    /// Rotation about the vertical axis, from horizontal pointer position.
    pub y_degrees: f64,
}

impl Tilt {
    pub fn level() -> Self {
        Self::default()
    }

    pub fn from_pointer(client_x: f64, client_y: f64, bounds: Bounds) -> Self {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Self::level();
        }

        let fraction_x = ((client_x - bounds.left) / bounds.width).clamp(0.0, 1.0);
        let fraction_y = ((client_y - bounds.top) / bounds.height).clamp(0.0, 1.0);

        Self {
            x_degrees: -(fraction_y - 0.5) * 2.0 * TILT_MAX_DEGREES,
            y_degrees: (fraction_x - 0.5) * 2.0 * TILT_MAX_DEGREES,
        }
    }

    pub fn css_values(self) -> (String, String) {
        (
            format!("{:.2}deg", self.x_degrees),
            format!("{:.2}deg", self.y_degrees),
        )
    }
}
