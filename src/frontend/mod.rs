//! Browser side: binds each page effect to the pre-rendered markup.
//!
//! Every `install*` function returns a [`dom::Teardown`]; the combined set
//! lives in a thread-local slot until `pagehide` drops it.

mod ambient;
mod contact;
mod dom;
mod nav;
mod pointer;
mod reveal;
mod skills;
mod smooth_scroll;
mod theme;

use std::cell::RefCell;

use gloo_events::EventListener;
use log::Level;
use web_sys::window;

use dom::Teardown;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

thread_local! {
    static INSTALLED: RefCell<Option<Effects>> = const { RefCell::new(None) };
}

/// All installed effects. Dropping it unbinds the page.
struct Effects {
    teardown: Teardown,
}

impl Effects {
    fn install() -> Self {
        let reduced_motion = dom::prefers_reduced_motion();
        let menu = nav::Menu::capture();
        let mut teardown = Teardown::default();

        if !reduced_motion {
            teardown.merge(smooth_scroll::install());
        }
        teardown.merge(nav::install_scroll_reactor());
        teardown.merge(nav::install_menu_toggle(&menu));
        teardown.merge(nav::install_anchor_scroller(&menu));
        teardown.merge(skills::install());
        teardown.merge(reveal::install());
        teardown.merge(contact::install());
        teardown.merge(theme::install());
        teardown.merge(pointer::install_ripples());
        teardown.merge(ambient::install_progress_bar());

        if !reduced_motion {
            teardown.merge(pointer::install_cursor_trail());
            teardown.merge(pointer::install_magnetic_buttons());
            teardown.merge(pointer::install_tilt_cards());
            teardown.merge(ambient::install_particles());
            teardown.merge(ambient::install_parallax());
        }

        log::debug!(
            "page effects installed: {} listeners, reduced motion {}",
            teardown.listener_count(),
            reduced_motion
        );
        Self { teardown }
    }
}

fn install_once() {
    INSTALLED.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = Some(Effects::install());
        }
    });
}

fn uninstall() {
    let effects = INSTALLED.with(|slot| slot.borrow_mut().take());
    if let Some(effects) = effects {
        log::debug!("tearing down {} listeners", effects.teardown.listener_count());
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Info);

    let Some(win) = window() else {
        return;
    };

    // Teardown on pagehide; a page restored from the back/forward cache
    // binds again on pageshow.
    EventListener::new(&win, "pagehide", |_| uninstall()).forget();
    EventListener::new(&win, "pageshow", |_| install_once()).forget();

    let still_loading = dom::document().is_some_and(|d| d.ready_state() == "loading");
    if still_loading {
        EventListener::once(&win, "DOMContentLoaded", |_| install_once()).forget();
    } else {
        install_once();
    }
}
