//! Thin `web-sys` helpers shared by the behavior bindings.
//!
//! SYSTEM CONTEXT
//! ==============
//! Bindings read the document once at boot and then only write presentation
//! classes and inline styles. Everything here is glue: lookups that turn a
//! missing element into `None` or a `SiteError`, and listener installation
//! for closures that live as long as the page.

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, NodeList, Window};

use crate::error::{Result, SiteError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(SiteError::NoDocument)
}

/// First match for `selector`, or `None` when absent or the selector is invalid.
pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

/// First match for `selector` below `root`.
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// First match for `selector`; a required element that is missing is an error.
pub fn require(doc: &Document, selector: &'static str) -> Result<Element> {
    query(doc, selector).ok_or(SiteError::MissingElement(selector))
}

pub fn require_id(doc: &Document, id: &'static str) -> Result<Element> {
    doc.get_element_by_id(id).ok_or(SiteError::MissingElement(id))
}

pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    doc.query_selector_all(selector).map_or_else(|_| Vec::new(), |list| elements(&list))
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector).map_or_else(|_| Vec::new(), |list| elements(&list))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Add or remove `class` so its presence equals `on`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let list = el.class_list();
    let result = if on { list.add_1(class) } else { list.remove_1(class) };
    if let Err(err) = result {
        log::warn!("class {class} not applied: {}", crate::error::describe_js(&err));
    }
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        if let Err(err) = html.style().set_property(property, value) {
            log::warn!("style {property} not applied: {}", crate::error::describe_js(&err));
        }
    }
}

/// Show with `display: inline-block` or hide with `display: none`.
pub fn set_inline_visible(el: &Element, visible: bool) {
    set_style(el, "display", if visible { "inline-block" } else { "none" });
}

/// Attach `handler` for the page's lifetime.
///
/// # Errors
///
/// Returns `SiteError::Js` if the browser rejects the listener.
pub fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Like [`listen`], registered as passive so scrolling never waits on it.
///
/// # Errors
///
/// Returns `SiteError::Js` if the browser rejects the listener.
pub fn listen_passive(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        cb.as_ref().unchecked_ref(),
        &options,
    )?;
    cb.forget();
    Ok(())
}

/// Log a listener installation failure without aborting boot.
pub fn warn_on_err(what: &str, result: Result<()>) {
    if let Err(err) = result {
        log::warn!("{what}: {err}");
    }
}

/// Current vertical scroll offset; `0.0` if the browser refuses to report it.
pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Rendered height of `el`, `0.0` for non-HTML elements.
pub fn offset_height(el: &Element) -> f64 {
    el.dyn_ref::<HtmlElement>().map_or(0.0, |html| f64::from(html.offset_height()))
}
