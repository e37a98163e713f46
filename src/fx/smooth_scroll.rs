use serde::Serialize;

/// Constructor options for the Lenis instance. The easing curve is a
/// function and is attached separately on the JS side.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LenisOptions {
    pub duration: f64,
    pub orientation: &'static str,
    pub gesture_orientation: &'static str,
    pub smooth_wheel: bool,
    pub wheel_multiplier: f64,
    pub touch_multiplier: f64,
}

impl Default for LenisOptions {
    fn default() -> Self {
        Self {
            duration: 0.4,
            orientation: "vertical",
            gesture_orientation: "vertical",
            smooth_wheel: true,
            wheel_multiplier: 1.8,
            touch_multiplier: 2.5,
        }
    }
}

impl LenisOptions {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Quartic ease-out: fast start, long settle.
pub fn ease_out_quart(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}
