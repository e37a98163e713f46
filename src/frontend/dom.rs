use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Storage,
};

use crate::fx::pointer::Bounds;

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

pub fn media_matches(query: &str) -> bool {
    window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn query(selector: &str) -> Option<HtmlElement> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

pub fn query_all(selector: &str) -> Vec<HtmlElement> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn scroll_y() -> f64 {
    window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0)
}

pub fn viewport_height() -> f64 {
    window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_height() -> f64 {
    document()
        .and_then(|d| d.document_element())
        .map(|root| f64::from(root.scroll_height()))
        .unwrap_or(0.0)
}

pub fn bounds(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    let classes = element.class_list();
    let _ = if enabled {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
}

/// An intersection observer together with the closure it calls back into.
/// Dropping it disconnects the observer.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Observer {
    pub fn new(
        threshold: f64,
        mut on_entry: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
    ) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        on_entry(&entry, &observer);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .ok()?;

        Some(Self {
            observer,
            _callback: callback,
        })
    }

    pub fn observe(&self, element: &Element) {
        self.observer.observe(element);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Self-rescheduling animation-frame loop. Dropping it cancels the pending
/// frame and stops the chain.
pub struct FrameLoop {
    slot: Rc<RefCell<Option<AnimationFrame>>>,
    active: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(tick: impl FnMut(f64) + 'static) -> Self {
        let slot = Rc::new(RefCell::new(None));
        let active = Rc::new(Cell::new(true));
        schedule_frame(
            Rc::clone(&slot),
            Rc::clone(&active),
            Rc::new(RefCell::new(tick)),
        );
        Self { slot, active }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.active.set(false);
        // Clearing the slot cancels the frame and breaks the slot/closure cycle.
        self.slot.borrow_mut().take();
    }
}

fn schedule_frame<F>(
    slot: Rc<RefCell<Option<AnimationFrame>>>,
    active: Rc<Cell<bool>>,
    tick: Rc<RefCell<F>>,
) where
    F: FnMut(f64) + 'static,
{
    let next_slot = Rc::clone(&slot);
    let handle = request_animation_frame(move |timestamp| {
        next_slot.borrow_mut().take();
        (&mut *tick.borrow_mut())(timestamp);
        // A loop torn down from inside its own tick must not re-arm.
        if active.get() {
            schedule_frame(next_slot, active, tick);
        }
    });
    *slot.borrow_mut() = Some(handle);
}

/// Everything one setup function acquired. Dropping it removes listeners,
/// disconnects observers, stops frame loops and detaches created nodes.
#[derive(Default)]
pub struct Teardown {
    listeners: Vec<EventListener>,
    observers: Vec<Observer>,
    loops: Vec<FrameLoop>,
    nodes: Vec<Element>,
}

impl Teardown {
    pub fn listen(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn observe(&mut self, observer: Observer) {
        self.observers.push(observer);
    }

    pub fn run_loop(&mut self, frame_loop: FrameLoop) {
        self.loops.push(frame_loop);
    }

    pub fn own_node(&mut self, node: Element) {
        self.nodes.push(node);
    }

    pub fn merge(&mut self, mut other: Teardown) {
        self.listeners.append(&mut other.listeners);
        self.observers.append(&mut other.observers);
        self.loops.append(&mut other.loops);
        self.nodes.append(&mut other.nodes);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.loops.clear();
        self.observers.clear();
        self.listeners.clear();
        for node in self.nodes.drain(..) {
            node.remove();
        }
    }
}

#[cfg(test)]
pub mod fixture {
    use wasm_bindgen::JsCast;
    use web_sys::HtmlElement;

    /// Renders `markup` into a fresh `<div>` at the top of `<body>`. The
    /// caller removes it when done.
    pub fn mount(markup: &str) -> HtmlElement {
        let document = super::document().expect("test page has a document");
        let host = document
            .create_element("div")
            .expect("create fixture host")
            .dyn_into::<HtmlElement>()
            .expect("div is an HtmlElement");
        host.set_inner_html(markup);

        let body = document.body().expect("test page has a body");
        body.insert_before(&host, body.first_child().as_ref())
            .expect("mount fixture");
        host
    }

    pub fn find<T: JsCast>(host: &HtmlElement, selector: &str) -> T {
        host.query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<T>().ok())
            .unwrap_or_else(|| panic!("fixture is missing {selector}"))
    }
}
