//! Scroll parallax for the decorative background blobs.
//!
//! DESIGN
//! ======
//! Each blob keeps its CSS keyframe animation on its own `transform`. The
//! scroll offset is applied to a `.parallax-layer` wrapper around the blob,
//! so the two transforms compose through nesting and neither side ever
//! reads back or overwrites the other. Markup that already wraps a blob in
//! a `.parallax-layer` is used as-is; otherwise the wrapper is created at
//! boot, covering the blob's original containing block.
//!
//! A created wrapper is absolutely positioned unless the blob is computed
//! `position: fixed`; then the wrapper is fixed too, so the blob stays
//! anchored to the viewport rather than to the wrapper.

#[cfg(test)]
#[path = "parallax_test.rs"]
mod parallax_test;

use web_sys::{Document, Element, Window};

use crate::consts;
use crate::dom;
use crate::error::Result;

/// Inline style for wrappers created at boot, minus `position`.
const WRAPPER_STYLE: &str = "inset:0;pointer-events:none;will-change:transform";

/// Inline style for a wrapper around a blob whose computed position is
/// `blob_position`.
pub fn wrapper_style(blob_position: Option<&str>) -> String {
    let position = match blob_position.map(str::trim) {
        Some("fixed") => "fixed",
        _ => "absolute",
    };
    format!("position:{position};{WRAPPER_STYLE}")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxLayer {
    pub factor: f64,
}

impl ParallaxLayer {
    /// Vertical offset in pixels at `scroll_y`.
    pub fn offset(self, scroll_y: f64) -> f64 {
        scroll_y * self.factor
    }

    /// CSS transform for the wrapper at `scroll_y`.
    pub fn transform(self, scroll_y: f64) -> String {
        format!("translate3d(0, {:.2}px, 0)", self.offset(scroll_y))
    }
}

// =============================================================================
// BINDING
// =============================================================================

pub struct ParallaxBinding {
    layers: Vec<(ParallaxLayer, Element)>,
}

impl ParallaxBinding {
    /// Find each blob and make sure it sits inside its own wrapper.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Js` if a wrapper cannot be created or inserted.
    pub fn new(doc: &Document, factors: [f64; 3]) -> Result<Self> {
        let window = dom::window()?;
        let mut layers = Vec::new();
        for (selector, factor) in consts::BLOBS.iter().zip(factors) {
            let Some(blob) = dom::query(doc, selector) else {
                log::debug!("{selector} absent; no parallax for it");
                continue;
            };
            layers.push((ParallaxLayer { factor }, wrapper_for(&window, doc, &blob)?));
        }
        Ok(Self { layers })
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn update(&self, scroll_y: f64) {
        for (layer, wrapper) in &self.layers {
            dom::set_style(wrapper, "transform", &layer.transform(scroll_y));
        }
    }
}

fn computed_position(window: &Window, blob: &Element) -> Option<String> {
    match window.get_computed_style(blob) {
        Ok(Some(style)) => style.get_property_value("position").ok(),
        Ok(None) => None,
        Err(err) => {
            log::debug!("computed style unavailable: {}", crate::error::describe_js(&err));
            None
        }
    }
}

fn wrapper_for(window: &Window, doc: &Document, blob: &Element) -> Result<Element> {
    if let Some(parent) = blob.parent_element() {
        if parent.class_list().contains(consts::PARALLAX_LAYER) {
            return Ok(parent);
        }
    }
    let wrapper = doc.create_element("div")?;
    wrapper.set_class_name(consts::PARALLAX_LAYER);
    wrapper.set_attribute("aria-hidden", "true")?;
    let style = wrapper_style(computed_position(window, blob).as_deref());
    wrapper.set_attribute("style", &style)?;
    if let Some(parent) = blob.parent_node() {
        parent.insert_before(&wrapper, Some(blob))?;
    }
    wrapper.append_child(blob)?;
    Ok(wrapper)
}
