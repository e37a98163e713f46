use gloo_events::EventListener;
use web_sys::{window, HtmlElement};

use super::dom::{self, Teardown};
use crate::fx::{
    particles::{scatter, PARTICLE_CLASS, PARTICLE_COUNT},
    scroll::{parallax_transform, parse_parallax_speed, progress_fraction, progress_width},
};

const PARTICLE_HOST_SELECTOR: &str = ".particles";
const PROGRESS_SELECTOR: &str = ".scroll-progress";
const PARALLAX_SELECTOR: &str = "[data-parallax]";
const PARALLAX_SPEED_ATTRIBUTE: &str = "data-speed";

/// Drops a handful of CSS-animated particles into the hero backdrop. They
/// are removed again on teardown.
pub fn install_particles() -> Teardown {
    let mut teardown = Teardown::default();
    let (Some(host), Some(document)) = (dom::query(PARTICLE_HOST_SELECTOR), dom::document())
    else {
        return teardown;
    };

    for particle in scatter(PARTICLE_COUNT, js_sys::Math::random) {
        let Ok(node) = document.create_element("span") else {
            continue;
        };
        node.set_class_name(PARTICLE_CLASS);
        let style = particle
            .style()
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = node.set_attribute("style", &style);

        if host.append_child(&node).is_ok() {
            teardown.own_node(node);
        }
    }

    teardown
}

fn sync_progress(bar: &HtmlElement) {
    let fraction = progress_fraction(dom::scroll_y(), dom::scroll_height(), dom::viewport_height());
    dom::set_style(bar, "width", &progress_width(fraction));
}

/// Reading-progress bar across the top of the page.
pub fn install_progress_bar() -> Teardown {
    let mut teardown = Teardown::default();
    let (Some(bar), Some(win)) = (dom::query(PROGRESS_SELECTOR), window()) else {
        return teardown;
    };

    sync_progress(&bar);
    teardown.listen(EventListener::new(&win, "scroll", move |_| sync_progress(&bar)));
    teardown
}

fn sync_parallax(layers: &[(HtmlElement, f64)]) {
    let scroll_y = dom::scroll_y();
    for (layer, speed) in layers {
        dom::set_style(layer, "transform", &parallax_transform(scroll_y, *speed));
    }
}

/// Layers marked `data-parallax` drift at their own `data-speed`.
pub fn install_parallax() -> Teardown {
    let mut teardown = Teardown::default();
    let Some(win) = window() else {
        return teardown;
    };

    let layers: Vec<(HtmlElement, f64)> = dom::query_all(PARALLAX_SELECTOR)
        .into_iter()
        .map(|layer| {
            let speed = layer.get_attribute(PARALLAX_SPEED_ATTRIBUTE);
            let speed = parse_parallax_speed(speed.as_deref());
            (layer, speed)
        })
        .collect();
    if layers.is_empty() {
        return teardown;
    }

    sync_parallax(&layers);
    teardown.listen(EventListener::new(&win, "scroll", move |_| sync_parallax(&layers)));
    teardown
}
