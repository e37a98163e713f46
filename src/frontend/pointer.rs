use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent};

use super::dom::{self, FrameLoop, Teardown};
use crate::fx::pointer::{
    magnetic_offset, magnetic_transform, ripple_offset, ripple_style, CursorFollower, Tilt,
};

const RIPPLE_TARGET_SELECTOR: &str = ".btn, .nav a, .card, .interest-item, .certificate-item";
const RIPPLE_CLASS: &str = "ripple";
const RIPPLE_LIFETIME_MS: u32 = 600;

const CURSOR_SELECTOR: &str = ".cursor-dot";
const CURSOR_HOVER_SELECTOR: &str = "a, button, .btn, .card, .magnetic";
const CURSOR_VISIBLE_CLASS: &str = "is-visible";
const CURSOR_HOVER_CLASS: &str = "is-hover";

const MAGNETIC_SELECTOR: &str = ".magnetic";
const TILT_SELECTOR: &str = ".tilt-card";

fn client_position(event: &Event) -> Option<(f64, f64)> {
    let event = event.dyn_ref::<MouseEvent>()?;
    Some((f64::from(event.client_x()), f64::from(event.client_y())))
}

fn spawn_ripple(host: &HtmlElement, client_x: f64, client_y: f64) {
    let Some(ripple) = dom::document()
        .and_then(|d| d.create_element("span").ok())
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    let (left, top) = ripple_style(ripple_offset(client_x, client_y, dom::bounds(host)));
    ripple.set_class_name(RIPPLE_CLASS);
    dom::set_style(&ripple, "left", &left);
    dom::set_style(&ripple, "top", &top);

    if host.append_child(&ripple).is_err() {
        return;
    }
    Timeout::new(RIPPLE_LIFETIME_MS, move || ripple.remove()).forget();
}

/// Material-style click feedback: one short-lived span per click, placed
/// where the pointer landed.
pub fn install_ripples() -> Teardown {
    let mut teardown = Teardown::default();

    for host in dom::query_all(RIPPLE_TARGET_SELECTOR) {
        let target = host.clone();
        teardown.listen(EventListener::new(&host, "click", move |event| {
            if let Some((x, y)) = client_position(event) {
                spawn_ripple(&target, x, y);
            }
        }));
    }

    teardown
}

fn is_over_interactive(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(CURSOR_HOVER_SELECTOR).ok().flatten())
        .is_some()
}

/// A dot that trails the pointer, eased once per animation frame.
pub fn install_cursor_trail() -> Teardown {
    let mut teardown = Teardown::default();
    if dom::media_matches("(hover: none)") {
        return teardown;
    }
    let (Some(dot), Some(document)) = (dom::query(CURSOR_SELECTOR), dom::document()) else {
        return teardown;
    };

    let follower = Rc::new(RefCell::new(CursorFollower::default()));

    {
        let follower = Rc::clone(&follower);
        let dot = dot.clone();
        teardown.listen(EventListener::new(&document, "mousemove", move |event| {
            if let Some((x, y)) = client_position(event) {
                follower.borrow_mut().point_at(x, y);
                dom::set_class(&dot, CURSOR_VISIBLE_CLASS, true);
            }
        }));
    }

    {
        let dot = dot.clone();
        teardown.listen(EventListener::new(&document, "mouseover", move |event| {
            dom::set_class(&dot, CURSOR_HOVER_CLASS, is_over_interactive(event));
        }));
    }

    if let Some(root) = document.document_element() {
        let dot = dot.clone();
        teardown.listen(EventListener::new(&root, "mouseleave", move |_| {
            dom::set_class(&dot, CURSOR_VISIBLE_CLASS, false);
        }));
    }

    teardown.run_loop(FrameLoop::start(move |_| {
        let mut follower = follower.borrow_mut();
        if !follower.has_pointer() {
            return;
        }
        follower.step();
        dom::set_style(&dot, "transform", &follower.transform());
    }));
    teardown
}

/// Buttons that lean toward the pointer and spring back when it leaves.
pub fn install_magnetic_buttons() -> Teardown {
    let mut teardown = Teardown::default();

    for button in dom::query_all(MAGNETIC_SELECTOR) {
        let target = button.clone();
        teardown.listen(EventListener::new(&button, "mousemove", move |event| {
            if let Some((x, y)) = client_position(event) {
                let offset = magnetic_offset(x, y, dom::bounds(&target));
                dom::set_style(&target, "transform", &magnetic_transform(offset));
            }
        }));

        let target = button.clone();
        teardown.listen(EventListener::new(&button, "mouseleave", move |_| {
            dom::set_style(&target, "transform", &magnetic_transform((0.0, 0.0)));
        }));
    }

    teardown
}

fn write_tilt(card: &HtmlElement, tilt: Tilt) {
    let (x, y) = tilt.css_values();
    dom::set_style(card, "--tilt-x", &x);
    dom::set_style(card, "--tilt-y", &y);
}

/// Cards rotate in 3D following the pointer; CSS reads `--tilt-x`/`--tilt-y`.
pub fn install_tilt_cards() -> Teardown {
    let mut teardown = Teardown::default();

    for card in dom::query_all(TILT_SELECTOR) {
        let target = card.clone();
        teardown.listen(EventListener::new(&card, "mousemove", move |event| {
            if let Some((x, y)) = client_position(event) {
                write_tilt(&target, Tilt::from_pointer(x, y, dom::bounds(&target)));
            }
        }));

        let target = card.clone();
        teardown.listen(EventListener::new(&card, "mouseleave", move |_| {
            write_tilt(&target, Tilt::level());
        }));
    }

    teardown
}
