//! In-page smooth scrolling and active nav-link tracking.
//!
//! Anchor clicks scroll so the target lands just below the fixed header.
//! On every scroll update the first section (document order) whose adjusted
//! range contains the offset becomes current and its nav link gets `active`.
//! Above the first section the hero link is active instead.

#[cfg(test)]
#[path = "scrollspy_test.rs"]
mod scrollspy_test;

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::config::SiteConfig;
use crate::consts;
use crate::dom;
use crate::error::Result;
use crate::header::HeaderBinding;

/// Measured geometry of a `main section[id]`, in page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActiveLink {
    Section(String),
    Hero,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollSpy {
    /// Lead added on top of the header height before a section counts.
    pub activation_offset: f64,
    /// Hero cutoff when the page has no sections.
    pub hero_fallback: f64,
}

impl ScrollSpy {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            activation_offset: config.section_activation_offset,
            hero_fallback: config.hero_fallback_scroll,
        }
    }

    /// Which nav link should be active at `scroll_y`.
    pub fn active(&self, scroll_y: f64, header_height: f64, sections: &[SectionBox]) -> ActiveLink {
        let lead = header_height + self.activation_offset;
        let current = sections.iter().find(|s| {
            let top = s.top - lead;
            scroll_y >= top && scroll_y < top + s.height
        });
        if let Some(section) = current {
            return ActiveLink::Section(section.id.clone());
        }
        let cutoff = sections.first().map_or(self.hero_fallback, |s| s.top - lead);
        if scroll_y < cutoff { ActiveLink::Hero } else { ActiveLink::None }
    }
}

/// Fragment id of an in-page href: `#about` → `about`. Bare `#` and
/// non-fragment hrefs have none.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Whether a nav link with `href` should carry `active` for `active`.
///
/// The hero link is matched separately by the binding, mirroring how the
/// hero fallback only applies when no section is current.
pub fn link_matches(href: Option<&str>, active: &ActiveLink) -> bool {
    match (href.and_then(fragment_id), active) {
        (Some(id), ActiveLink::Section(current)) => id == current,
        _ => false,
    }
}

/// Page offset to scroll to so `element_top` (viewport-relative) sits
/// `buffer` below a header of `header_height`.
pub fn scroll_target(element_top: f64, page_offset: f64, header_height: f64, buffer: f64) -> f64 {
    element_top + page_offset - header_height - buffer
}

// =============================================================================
// BINDING
// =============================================================================

pub struct ScrollSpyBinding {
    spy: ScrollSpy,
    sections: Vec<Element>,
    links: Vec<Element>,
    hero: Option<Element>,
}

impl ScrollSpyBinding {
    pub fn new(doc: &Document, config: &SiteConfig) -> Self {
        let sections = dom::query_all(doc, consts::SECTIONS);
        if sections.is_empty() {
            log::debug!("no sections; only hero highlighting applies");
        }
        Self {
            spy: ScrollSpy::from_config(config),
            sections,
            links: dom::query_all(doc, consts::NAV_LINKS),
            hero: dom::query(doc, consts::HERO_LINK),
        }
    }

    fn measure(&self) -> Vec<SectionBox> {
        self.sections
            .iter()
            .filter_map(|el| {
                let html = el.dyn_ref::<HtmlElement>()?;
                Some(SectionBox {
                    id: el.id(),
                    top: f64::from(html.offset_top()),
                    height: f64::from(html.offset_height()),
                })
            })
            .collect()
    }

    pub fn update(&self, scroll_y: f64, header_height: f64) {
        let active = self.spy.active(scroll_y, header_height, &self.measure());
        for link in &self.links {
            let on = link_matches(link.get_attribute("href").as_deref(), &active);
            dom::set_class(link, consts::ACTIVE, on);
        }
        if active == ActiveLink::Hero {
            if let Some(hero) = &self.hero {
                dom::set_class(hero, consts::ACTIVE, true);
            }
        }
    }
}

/// Intercept every in-page anchor and scroll smoothly to its target.
///
/// # Errors
///
/// Returns `SiteError::Js` if a click listener cannot be installed.
pub fn install_smooth_scroll(doc: &Document, header: &Rc<HeaderBinding>, buffer: f64) -> Result<()> {
    let window = dom::window()?;
    for anchor in dom::query_all(doc, consts::IN_PAGE_ANCHORS) {
        let doc = doc.clone();
        let window = window.clone();
        let header = Rc::clone(header);
        let href = anchor.get_attribute("href").unwrap_or_default();
        dom::listen(anchor.as_ref(), "click", move |ev| {
            ev.prevent_default();
            let Some(target) = fragment_id(&href).and_then(|id| doc.get_element_by_id(id)) else {
                return;
            };
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                dom::scroll_y(&window),
                header.height(),
                buffer,
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}
