use js_sys::{Reflect, JSON};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsValue};

use super::dom::{FrameLoop, Teardown};
use crate::fx::smooth_scroll::{ease_out_quart, LenisOptions};

#[wasm_bindgen]
extern "C" {
    /// Global from the Lenis UMD bundle loaded by `index.html`.
    type Lenis;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &JsValue) -> Result<Lenis, JsValue>;

    #[wasm_bindgen(method)]
    fn raf(this: &Lenis, time: f64);

    #[wasm_bindgen(method)]
    fn destroy(this: &Lenis);
}

struct Engine {
    lenis: Lenis,
    _easing: Closure<dyn Fn(f64) -> f64>,
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.lenis.destroy();
    }
}

fn build_options(easing: &Closure<dyn Fn(f64) -> f64>) -> Option<JsValue> {
    let options = JSON::parse(&LenisOptions::default().to_json()).ok()?;
    Reflect::set(&options, &JsValue::from_str("easing"), easing.as_ref()).ok()?;
    Some(options)
}

fn create_engine() -> Option<Engine> {
    let easing = Closure::<dyn Fn(f64) -> f64>::new(ease_out_quart);
    let options = build_options(&easing)?;

    match Lenis::new(&options) {
        Ok(lenis) => Some(Engine {
            lenis,
            _easing: easing,
        }),
        Err(error) => {
            log::warn!("smooth scrolling disabled, Lenis unavailable: {error:?}");
            None
        }
    }
}

/// Hands every animation frame to Lenis for the lifetime of the returned
/// teardown.
pub fn install() -> Teardown {
    let mut teardown = Teardown::default();
    let Some(engine) = create_engine() else {
        return teardown;
    };

    teardown.run_loop(FrameLoop::start(move |time| engine.lenis.raf(time)));
    teardown
}
