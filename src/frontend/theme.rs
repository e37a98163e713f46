use std::{cell::RefCell, rc::Rc};

use gloo_events::EventListener;
use web_sys::{Element, HtmlElement};

use super::dom::{self, Teardown};
use crate::fx::theme::{
    initial_theme, toggle_and_persist, PreferenceStore, Theme, THEME_ATTRIBUTE, THEME_KEY,
};

const TOGGLE_SELECTOR: &str = "#theme-toggle";
const ICON_SELECTOR: &str = "i";

/// Local storage when the browser allows it, otherwise the preference only
/// lives for this page.
#[derive(Default)]
struct BrowserStore {
    fallback: Option<String>,
}

impl PreferenceStore for BrowserStore {
    fn load(&self) -> Option<String> {
        dom::local_storage()
            .and_then(|storage| storage.get_item(THEME_KEY).ok().flatten())
            .or_else(|| self.fallback.clone())
    }

    fn save(&mut self, value: &str) {
        let persisted = dom::local_storage()
            .map(|storage| storage.set_item(THEME_KEY, value).is_ok())
            .unwrap_or(false);

        if !persisted {
            self.fallback = Some(value.to_string());
        }
    }
}

fn root() -> Option<Element> {
    dom::document()?.document_element()
}

fn current_theme() -> Theme {
    let value = root().and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    Theme::from_attribute(value.as_deref())
}

fn apply_theme(theme: Theme, icon: Option<&Element>) {
    if let Some(root) = root() {
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
    update_icon(theme, icon);
}

fn update_icon(theme: Theme, icon: Option<&Element>) {
    if let Some(icon) = icon {
        icon.set_class_name(theme.icon_class());
    }
}

fn describe_toggle(button: &HtmlElement, theme: Theme) {
    let _ = button.set_attribute("aria-label", &theme.toggle_label());
    let _ = button.set_attribute("aria-pressed", &(theme == Theme::Dark).to_string());
}

/// Applies the stored (or OS) theme and wires the toggle button.
pub fn install() -> Teardown {
    let mut teardown = Teardown::default();
    let store = BrowserStore::default();
    let button = dom::query(TOGGLE_SELECTOR);
    let icon = button
        .as_ref()
        .and_then(|button| button.query_selector(ICON_SELECTOR).ok().flatten());

    let stored = store.load();
    if let Some(theme) = initial_theme(
        stored.as_deref(),
        dom::media_matches("(prefers-color-scheme: dark)"),
    ) {
        apply_theme(theme, icon.as_ref());
    }

    let Some(button) = button else {
        return teardown;
    };
    describe_toggle(&button, current_theme());

    let store = Rc::new(RefCell::new(store));
    let target = button.clone();
    teardown.listen(EventListener::new(&button, "click", move |_| {
        let next = toggle_and_persist(current_theme(), &mut *store.borrow_mut());
        apply_theme(next, icon.as_ref());
        describe_toggle(&target, next);
        log::debug!("theme switched to {}", next.as_str());
    }));
    teardown
}
