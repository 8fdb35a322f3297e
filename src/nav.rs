//! Mobile navigation menu.
//!
//! One boolean drives three presentation flags: `nav-active` on the link
//! container, `toggle` on the hamburger control, and `no-scroll` on the body.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use std::cell::Cell;
use std::rc::Rc;

use web_sys::{Document, Element};

use crate::consts;
use crate::dom;
use crate::error::{Result, SiteError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavView {
    pub menu_open: bool,
    pub control_open: bool,
    pub scroll_locked: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MobileNavState {
    open: bool,
}

impl MobileNavState {
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// A nav link was chosen. Returns `true` if this closed an open menu.
    pub fn close_for_link(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        was_open
    }

    pub const fn view(self) -> NavView {
        NavView { menu_open: self.open, control_open: self.open, scroll_locked: self.open }
    }
}

// =============================================================================
// BINDING
// =============================================================================

struct NavDom {
    container: Element,
    hamburger: Element,
    body: Element,
}

impl NavDom {
    fn render(&self, view: NavView) {
        dom::set_class(&self.container, consts::NAV_ACTIVE, view.menu_open);
        dom::set_class(&self.hamburger, consts::TOGGLE, view.control_open);
        dom::set_class(&self.body, consts::NO_SCROLL, view.scroll_locked);
    }
}

/// Wire the hamburger control and close-on-select for every nav link.
///
/// # Errors
///
/// Returns `SiteError::MissingElement` when the nav container, hamburger,
/// or body is absent.
pub fn install(doc: &Document) -> Result<()> {
    let nav_dom = Rc::new(NavDom {
        container: dom::require(doc, consts::NAV_CONTAINER)?,
        hamburger: dom::require(doc, consts::HAMBURGER)?,
        body: doc.body().ok_or(SiteError::MissingElement("body"))?.into(),
    });
    let state = Rc::new(Cell::new(MobileNavState::default()));

    {
        let hamburger = nav_dom.hamburger.clone();
        let nav_dom = Rc::clone(&nav_dom);
        let state = Rc::clone(&state);
        dom::listen(hamburger.as_ref(), "click", move |_| {
            let mut next = state.get();
            next.toggle();
            state.set(next);
            nav_dom.render(next.view());
        })?;
    }

    for link in dom::query_all(doc, consts::NAV_LINKS) {
        let nav_dom = Rc::clone(&nav_dom);
        let state = Rc::clone(&state);
        dom::listen(link.as_ref(), "click", move |_| {
            let mut next = state.get();
            if next.close_for_link() {
                state.set(next);
                nav_dom.render(next.view());
            }
        })?;
    }

    Ok(())
}
