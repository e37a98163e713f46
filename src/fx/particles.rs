pub const PARTICLE_COUNT: usize = 15;
pub const PARTICLE_CLASS: &str = "particle";
const MAX_DELAY_SECONDS: f64 = 5.0;
const MIN_DURATION_SECONDS: f64 = 10.0;
const DURATION_SPREAD_SECONDS: f64 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub left_percent: f64,
    pub top_percent: f64,
    pub delay_seconds: f64,
    pub duration_seconds: f64,
}

impl Particle {
    /// Inline style pairs; CSS keyframes animate the particle from there.
    pub fn style(&self) -> [(&'static str, String); 4] {
        [
            ("left", format!("{:.2}%", self.left_percent)),
            ("top", format!("{:.2}%", self.top_percent)),
            ("animation-delay", format!("{:.2}s", self.delay_seconds)),
            ("animation-duration", format!("{:.2}s", self.duration_seconds)),
        ]
    }
}

/// Lays out `count` particles from a `[0, 1)` sampler such as
/// `Math.random`.
pub fn scatter(count: usize, mut sample: impl FnMut() -> f64) -> Vec<Particle> {
    let mut unit = move || sample().clamp(0.0, 1.0);

    (0..count)
        .map(|_| Particle {
            left_percent: unit() * 100.0,
            top_percent: unit() * 100.0,
            delay_seconds: unit() * MAX_DELAY_SECONDS,
            duration_seconds: MIN_DURATION_SECONDS + unit() * DURATION_SPREAD_SECONDS,
        })
        .collect()
}
