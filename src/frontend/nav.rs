use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use web_sys::{window, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use super::dom::{self, Teardown};
use crate::fx::scroll::{anchor_scroll_top, fragment_selector, header_is_scrolled};

const HEADER_SELECTOR: &str = ".header";
const NAV_SELECTOR: &str = ".nav";
const MENU_TOGGLE_SELECTOR: &str = ".menu-toggle";
const IN_PAGE_ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
const SCROLLED_CLASS: &str = "scrolled";
const OPEN_CLASS: &str = "active";

/// Mobile navigation: the menu trigger and the panel it opens.
pub struct Menu {
    trigger: Option<HtmlElement>,
    nav: Option<HtmlElement>,
}

impl Menu {
    pub fn capture() -> Rc<Self> {
        Rc::new(Self {
            trigger: dom::query(MENU_TOGGLE_SELECTOR),
            nav: dom::query(NAV_SELECTOR),
        })
    }

    pub fn toggle(&self) {
        for element in [&self.trigger, &self.nav].into_iter().flatten() {
            let _ = element.class_list().toggle(OPEN_CLASS);
        }
    }

    pub fn is_open(&self) -> bool {
        self.nav
            .as_ref()
            .is_some_and(|nav| nav.class_list().contains(OPEN_CLASS))
    }

    pub fn close(&self) {
        if self.is_open() {
            self.toggle();
        }
    }
}

fn sync_header(header: &Element) {
    dom::set_class(header, SCROLLED_CLASS, header_is_scrolled(dom::scroll_y()));
}

/// Keeps the header's `scrolled` class in step with the scroll offset.
pub fn install_scroll_reactor() -> Teardown {
    let mut teardown = Teardown::default();
    let (Some(header), Some(win)) = (dom::query(HEADER_SELECTOR), window()) else {
        return teardown;
    };

    sync_header(&header);
    teardown.listen(EventListener::new(&win, "scroll", move |_| {
        sync_header(&header);
    }));
    teardown
}

pub fn install_menu_toggle(menu: &Rc<Menu>) -> Teardown {
    let mut teardown = Teardown::default();
    let Some(trigger) = menu.trigger.clone() else {
        return teardown;
    };

    let menu = Rc::clone(menu);
    teardown.listen(EventListener::new(&trigger, "click", move |_| {
        menu.toggle();
    }));
    teardown
}

fn scroll_to_fragment(href: &str) -> bool {
    let Some(selector) = fragment_selector(href) else {
        return false;
    };
    // Ids that are not valid selectors make querySelector throw; treat as missing.
    let Some(target) = dom::document().and_then(|d| d.query_selector(selector).ok().flatten())
    else {
        return false;
    };
    let Some(win) = window() else {
        return false;
    };

    let options = ScrollToOptions::new();
    options.set_top(anchor_scroll_top(dom::bounds(&target).top, dom::scroll_y()));
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
    true
}

/// In-page links scroll smoothly to their target, leaving room for the
/// fixed header, and close the mobile menu.
pub fn install_anchor_scroller(menu: &Rc<Menu>) -> Teardown {
    let mut teardown = Teardown::default();

    for anchor in dom::query_all(IN_PAGE_ANCHOR_SELECTOR) {
        let menu = Rc::clone(menu);
        let link = anchor.clone();
        teardown.listen(EventListener::new_with_options(
            &anchor,
            "click",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();

                let Some(href) = link.get_attribute("href") else {
                    return;
                };

                if scroll_to_fragment(&href) {
                    menu.close();
                }
            },
        ));
    }

    teardown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::dom::fixture;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn opened_menu(host: &HtmlElement) -> Rc<Menu> {
        let menu = Rc::new(Menu {
            trigger: None,
            nav: Some(fixture::find(host, ".test-nav")),
        });
        menu.toggle();
        assert!(menu.is_open());
        menu
    }

    #[wasm_bindgen_test]
    fn unresolvable_fragments_do_not_scroll() {
        assert!(!scroll_to_fragment("#nowhere-on-this-page"));
        assert!(!scroll_to_fragment("#1-not-a-valid-selector"));
        assert!(!scroll_to_fragment("#"));
        assert!(!scroll_to_fragment(""));
    }

    #[wasm_bindgen_test]
    fn link_to_missing_section_keeps_menu_open() {
        let host = fixture::mount(
            r##"<nav class="test-nav"></nav><a id="dangling-link" href="#no-such-section">x</a>"##,
        );
        let menu = opened_menu(&host);
        let teardown = install_anchor_scroller(&menu);

        fixture::find::<HtmlElement>(&host, "#dangling-link").click();
        assert!(menu.is_open());

        drop(teardown);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn link_to_existing_section_closes_menu() {
        let host = fixture::mount(
            r##"<nav class="test-nav"></nav>
                <a id="live-link" href="#anchored-section">x</a>
                <section id="anchored-section"></section>"##,
        );
        let menu = opened_menu(&host);
        let teardown = install_anchor_scroller(&menu);

        assert!(scroll_to_fragment("#anchored-section"));
        fixture::find::<HtmlElement>(&host, "#live-link").click();
        assert!(!menu.is_open());

        drop(teardown);
        host.remove();
    }

    #[wasm_bindgen_test]
    fn header_class_tracks_current_offset() {
        let host = fixture::mount(r#"<header class="test-header scrolled"></header>"#);
        let header: Element = fixture::find(&host, ".test-header");

        // The test page does not scroll, so the class must come off.
        sync_header(&header);
        assert!(!header.class_list().contains(SCROLLED_CLASS));

        host.remove();
    }
}
