use std::{cell::RefCell, rc::Rc};

use gloo_timers::callback::Timeout;
use web_sys::{Element, HtmlElement};

use super::dom::{self, Observer, Teardown};
use crate::fx::reveal::{SkillBar, COLLAPSED_WIDTH, SKILL_BAR_DELAY_MS, SKILL_BAR_THRESHOLD};

const SKILL_LEVEL_SELECTOR: &str = ".skill-level";
const TARGET_WIDTH_ATTRIBUTE: &str = "data-width";

/// Collapses every skill bar and grows each one back to its authored width
/// the first time it scrolls into view.
pub fn install() -> Teardown {
    let mut teardown = Teardown::default();
    let elements = dom::query_all(SKILL_LEVEL_SELECTOR);
    if elements.is_empty() {
        return teardown;
    }

    let bars: Vec<(HtmlElement, SkillBar)> = elements
        .into_iter()
        .map(|element| {
            let authored = element
                .style()
                .get_property_value("width")
                .unwrap_or_default();
            let bar = SkillBar::new(&authored);
            let _ = element.set_attribute(TARGET_WIDTH_ATTRIBUTE, bar.target_width());
            dom::set_style(&element, "width", COLLAPSED_WIDTH);
            (element, bar)
        })
        .collect();
    let bars = Rc::new(RefCell::new(bars));

    let tracked = Rc::clone(&bars);
    let Some(observer) = Observer::new(SKILL_BAR_THRESHOLD, move |entry, observer| {
        let target = entry.target();
        let mut bars = tracked.borrow_mut();
        let Some((element, bar)) = bars
            .iter_mut()
            .find(|(element, _)| AsRef::<Element>::as_ref(element) == &target)
        else {
            return;
        };

        let Some(width) = bar.on_intersection(entry.is_intersecting()) else {
            return;
        };
        observer.unobserve(&target);

        let element = element.clone();
        let width = width.to_string();
        Timeout::new(SKILL_BAR_DELAY_MS, move || {
            dom::set_style(&element, "width", &width);
        })
        .forget();
    }) else {
        return teardown;
    };

    for (element, _) in bars.borrow().iter() {
        observer.observe(element);
    }
    teardown.observe(observer);
    teardown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::dom::fixture;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::wasm_bindgen_test;

    const BARS: &str = r#"
        <div class="skill-level" id="skill-rust" style="width: 85%; height: 10px"></div>
        <div class="skill-level" id="skill-unset" style="height: 10px"></div>
    "#;

    fn width(element: &HtmlElement) -> Option<String> {
        element.style().get_property_value("width").ok()
    }

    #[wasm_bindgen_test]
    fn bars_collapse_and_remember_authored_width() {
        let host = fixture::mount(BARS);
        let teardown = install();
        let rust: HtmlElement = fixture::find(&host, "#skill-rust");
        let unset: HtmlElement = fixture::find(&host, "#skill-unset");

        assert_eq!(rust.get_attribute(TARGET_WIDTH_ATTRIBUTE).as_deref(), Some("85%"));
        assert_eq!(width(&rust).as_deref(), Some(COLLAPSED_WIDTH));
        assert_eq!(unset.get_attribute(TARGET_WIDTH_ATTRIBUTE).as_deref(), Some("0%"));
        assert_eq!(width(&unset).as_deref(), Some(COLLAPSED_WIDTH));

        drop(teardown);
        host.remove();
    }

    #[wasm_bindgen_test]
    async fn visible_bar_grows_after_delay() {
        let host = fixture::mount(BARS);
        let teardown = install();
        let rust: HtmlElement = fixture::find(&host, "#skill-rust");

        TimeoutFuture::new(SKILL_BAR_DELAY_MS * 3).await;
        assert_eq!(width(&rust).as_deref(), Some("85%"));

        drop(teardown);
        host.remove();
    }
}
