
pub mod chart;
pub mod globe;
pub mod marquee;
pub mod mini_chart;
pub mod modal;
pub mod orbit;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod scramble_text;
pub mod snowfall;
pub mod tilt_card;
pub mod travel_map;
pub mod world_map;

use gloo_timers::callback::Timeout;
use js_sys::Reflect;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};
use yew::NodeRef;

use crate::error::MountError;
use crate::telemetry::{log_event, LogLevel};

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Reads `data-*` tuning attributes from the `#<id>` settings element in `index.html`.
pub fn settings(id: &str) -> impl Fn(&str) -> Option<String> {
    let element = document().and_then(|d| d.get_element_by_id(id));
    move |name| element.as_ref()?.get_attribute(name)
}

pub fn seeded_rng() -> SmallRng {
    let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
    SmallRng::seed_from_u64(seed ^ js_sys::Date::now() as u64)
}

pub fn attached(node: &NodeRef, name: &'static str) -> Result<HtmlElement, MountError> {
    node.cast::<HtmlElement>().ok_or(MountError::MissingNode(name))
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn global(name: &'static str) -> Result<JsValue, MountError> {
    let Some(win) = window() else {
        return Err(MountError::MissingLibrary(name));
    };
    let value = Reflect::get(&win, &JsValue::from_str(name))?;
    if value.is_undefined() || value.is_null() {
        return Err(MountError::MissingLibrary(name));
    }
    Ok(value)
}

pub fn js_object(value: &serde_json::Value) -> Result<JsValue, MountError> {
    Ok(js_sys::JSON::parse(&value.to_string())?)
}

/// Calls `target[name](...args)`.
pub fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> Result<JsValue, MountError> {
    let method = Reflect::get(target, &JsValue::from_str(name))?;
    let Some(method) = method.dyn_ref::<js_sys::Function>() else {
        return Err(MountError::Script(format!("`{name}` is not a function")));
    };
    let args: js_sys::Array = args.iter().copied().collect();
    Ok(method.apply(target, &args)?)
}

pub fn report_mounted(widget: &str) {
    log_event(LogLevel::Info, "widget_mounted", json!({ "widget": widget }));
}

pub fn report_failure(widget: &str, error: &MountError) {
    let (level, event) = match error {
        MountError::MissingNode(_) => (LogLevel::Warn, "widget_mount_skipped"),
        MountError::MissingLibrary(_) => (LogLevel::Debug, "library_pending"),
        MountError::Unsupported(_) | MountError::Script(_) => (LogLevel::Warn, "widget_fallback"),
    };
    log_event(
        level,
        event,
        json!({
            "widget": widget,
            "reason": error.as_str(),
            "detail": error.to_string(),
        }),
    );
}

pub struct Visibility {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Visibility {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Runs `on_visible` once, when at least `threshold` of `element` is on screen.
///
/// Without `IntersectionObserver` support the element counts as visible straight away.
pub fn observe_once(
    element: &Element,
    threshold: f64,
    on_visible: impl FnOnce() + 'static,
) -> Result<Option<Visibility>, MountError> {
    if global("IntersectionObserver").is_err() {
        on_visible();
        return Ok(None);
    }

    let mut pending = Some(on_visible);
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let visible = entries.iter().any(|entry| {
                entry
                    .dyn_into::<IntersectionObserverEntry>()
                    .map(|entry| entry.is_intersecting())
                    .unwrap_or(false)
            });
            if !visible {
                return;
            }
            observer.disconnect();
            if let Some(on_visible) = pending.take() {
                on_visible();
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    observer.observe(element);
    Ok(Some(Visibility {
        observer,
        _callback: callback,
    }))
}

// Dropping the poll cancels the next attempt.
#[derive(Clone, Default)]
pub struct LibraryPoll {
    pending: Rc<RefCell<Option<Timeout>>>,
}

impl LibraryPoll {
    pub fn run<T: 'static>(
        &self,
        widget: &'static str,
        retry_ms: u32,
        attempt: impl Fn() -> Result<T, MountError> + 'static,
        on_ready: impl FnOnce(T) + 'static,
        on_failed: impl FnOnce(MountError) + 'static,
    ) {
        poll(
            Rc::downgrade(&self.pending),
            widget,
            retry_ms,
            Rc::new(attempt),
            on_ready,
            on_failed,
        );
    }

    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

fn poll<T: 'static>(
    pending: std::rc::Weak<RefCell<Option<Timeout>>>,
    widget: &'static str,
    retry_ms: u32,
    attempt: Rc<dyn Fn() -> Result<T, MountError>>,
    on_ready: impl FnOnce(T) + 'static,
    on_failed: impl FnOnce(MountError) + 'static,
) {
    match attempt() {
        Ok(value) => {
            report_mounted(widget);
            on_ready(value);
        }
        Err(error) if error.is_retryable() => {
            report_failure(widget, &error);
            let Some(slot) = pending.upgrade() else {
                return;
            };
            let next = pending.clone();
            let timeout = Timeout::new(retry_ms, move || {
                poll(next, widget, retry_ms, attempt, on_ready, on_failed);
            });
            *slot.borrow_mut() = Some(timeout);
        }
        Err(error) => {
            report_failure(widget, &error);
            on_failed(error);
        }
    }
}
