//! Scroll-reactive header: `scrolled` strictly above a fixed offset.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use std::cell::Cell;

use web_sys::Element;

use crate::consts;
use crate::dom;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderState {
    scrolled: bool,
}

impl HeaderState {
    pub fn at(scroll_y: f64, threshold: f64) -> Self {
        Self { scrolled: scroll_y > threshold }
    }

    pub const fn scrolled(self) -> bool {
        self.scrolled
    }
}

// =============================================================================
// BINDING
// =============================================================================

/// Header element plus the last rendered state, so unchanged scroll
/// positions cause no DOM writes.
pub struct HeaderBinding {
    header: Element,
    threshold: f64,
    last: Cell<Option<HeaderState>>,
}

impl HeaderBinding {
    pub fn new(header: Element, threshold: f64) -> Self {
        Self { header, threshold, last: Cell::new(None) }
    }

    /// Rendered height, used as the fixed-header offset by scroll targets.
    pub fn height(&self) -> f64 {
        dom::offset_height(&self.header)
    }

    pub fn update(&self, scroll_y: f64) {
        let next = HeaderState::at(scroll_y, self.threshold);
        if self.last.replace(Some(next)) != Some(next) {
            dom::set_class(&self.header, consts::SCROLLED, next.scrolled());
        }
    }
}
