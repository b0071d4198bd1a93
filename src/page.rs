//! Typed DOM bindings
//!
//! Every element lookup, timer, listener and visibility observer used by the
//! page goes through here. A missing element is `None`, never an error; JS
//! call failures become [`PageError`].

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::reveal::OneShot;

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("{context} failed: {message}")]
    Js {
        context: &'static str,
        message: String,
    },
}

pub type PageResult<T> = Result<T, PageError>;

/// Wrap a thrown JS value with what we were doing
pub fn js_err(context: &'static str) -> impl FnOnce(JsValue) -> PageError {
    move |error| {
        let message = error
            .as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&error)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| format!("{:?}", error));
        PageError::Js { context, message }
    }
}

/// Visibility observer settings
#[derive(Debug, Clone, Copy, Default)]
pub struct ObserveOptions {
    pub root_margin: Option<&'static str>,
    pub threshold: Option<f64>,
}

impl ObserveOptions {
    fn to_init(self) -> IntersectionObserverInit {
        let init = IntersectionObserverInit::new();
        if let Some(margin) = self.root_margin {
            init.set_root_margin(margin);
        }
        if let Some(threshold) = self.threshold {
            init.set_threshold(&JsValue::from_f64(threshold));
        }
        init
    }
}

/// Handle to the browser window and document
#[derive(Debug, Clone)]
pub struct Page {
    window: Window,
    document: Document,
}

impl Page {
    pub fn new() -> PageResult<Self> {
        let window = web_sys::window().ok_or(PageError::NoWindow)?;
        let document = window.document().ok_or(PageError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Element by id, cast to the expected type
    pub fn by_id<T: JsCast>(&self, id: &str) -> Option<T> {
        let Some(element) = self.document.get_element_by_id(id) else {
            log::debug!("#{} not found", id);
            return None;
        };
        match element.dyn_into::<T>() {
            Ok(el) => Some(el),
            Err(_) => {
                log::debug!("#{} has unexpected element type", id);
                None
            }
        }
    }

    /// Element by id
    pub fn element(&self, id: &str) -> Option<Element> {
        self.by_id::<Element>(id)
    }

    /// All elements matching a selector, in document order
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            log::warn!("Bad selector: {}", selector);
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    /// Run `f` once after `delay_ms`. Returns the timeout id.
    pub fn set_timeout(&self, delay_ms: u32, f: impl FnOnce() + 'static) -> PageResult<i32> {
        let closure = Closure::once(f);
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(js_err("setTimeout"))?;
        closure.forget();
        Ok(id)
    }

    pub fn clear_timeout(&self, id: i32) {
        self.window.clear_timeout_with_handle(id);
    }

    /// Run `f` on the next display frame
    pub fn request_animation_frame(&self, f: impl FnOnce(f64) + 'static) -> PageResult<i32> {
        let closure = Closure::once(f);
        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(js_err("requestAnimationFrame"))?;
        closure.forget();
        Ok(id)
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

/// Attach a listener for the lifetime of the page
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> PageResult<()> {
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err("addEventListener"))?;
    closure.forget();
    Ok(())
}

/// Attach a passive listener (never calls `preventDefault`)
pub fn listen_passive(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) -> PageResult<()> {
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    let closure = Closure::<dyn FnMut(_)>::new(handler);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err("addEventListener"))?;
    closure.forget();
    Ok(())
}

/// Observe `targets` and call `callback` with every entry that becomes visible
pub fn observe(
    targets: &[Element],
    options: ObserveOptions,
    mut callback: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
) -> PageResult<IntersectionObserver> {
    let closure = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    callback(&entry, &observer);
                }
            }
        },
    );
    let observer = IntersectionObserver::new_with_options(
        closure.as_ref().unchecked_ref(),
        &options.to_init(),
    )
    .map_err(js_err("IntersectionObserver"))?;
    closure.forget();
    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}

/// Observe `targets` and run `action` once per target on first visibility,
/// then stop watching that target
pub fn observe_once(
    targets: &[Element],
    options: ObserveOptions,
    mut action: impl FnMut(Element) + 'static,
) -> PageResult<IntersectionObserver> {
    let watched = targets.to_vec();
    let mut once = OneShot::new();
    observe(targets, options, move |entry, observer| {
        let target = entry.target();
        observer.unobserve(&target);
        // A batch can report the same target more than once
        let Some(index) = watched.iter().position(|el| *el == target) else {
            return;
        };
        if once.fire(index) {
            action(target);
        }
    })
}

/// Add or remove a class
pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let result = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
    if let Err(err) = result {
        log::warn!("classList update failed for {}: {:?}", class, err);
    }
}
