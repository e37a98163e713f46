use super::dom::{self, Observer, Teardown};
use crate::fx::reveal::{reveal_action, RevealAction, SCROLL_REVEAL_THRESHOLD};

const REVEAL_SELECTOR: &str = ".reveal, .reveal-stagger";
const VISIBLE_CLASS: &str = "active";

pub fn install() -> Teardown {
    let mut teardown = Teardown::default();
    let elements = dom::query_all(REVEAL_SELECTOR);
    if elements.is_empty() {
        return teardown;
    }

    let Some(observer) = Observer::new(SCROLL_REVEAL_THRESHOLD, |entry, _| {
        let visible = reveal_action(entry.is_intersecting()) == RevealAction::Show;
        dom::set_class(&entry.target(), VISIBLE_CLASS, visible);
    }) else {
        return teardown;
    };

    for element in &elements {
        observer.observe(element);
    }
    teardown.observe(observer);
    teardown
}
