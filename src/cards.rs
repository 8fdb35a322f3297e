//! Flip cards for team member bios.
//!
//! Click or Enter/Space while focused toggles `flipped`. Cards without a
//! `tabindex` are made focusable so the keyboard path is reachable.

#[cfg(test)]
#[path = "cards_test.rs"]
mod cards_test;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use crate::consts;
use crate::dom;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardState {
    flipped: bool,
}

impl CardState {
    pub const fn flipped(self) -> bool {
        self.flipped
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        Self { flipped: !self.flipped }
    }

    /// State after a keypress while the card holds focus.
    #[must_use]
    pub fn after_key(self, key: &str) -> Self {
        if is_flip_key(key) { self.toggled() } else { self }
    }
}

/// Keys that flip a focused card.
pub fn is_flip_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

/// A card needs `tabindex="0"` only when the markup did not set one.
pub fn needs_tabindex(existing: Option<&str>) -> bool {
    existing.is_none()
}

// =============================================================================
// BINDING
// =============================================================================

fn bind_card(card: &Element) -> Result<()> {
    if needs_tabindex(card.get_attribute("tabindex").as_deref()) {
        card.set_attribute("tabindex", "0")?;
    }
    let state = Rc::new(Cell::new(CardState::default()));

    {
        let state = Rc::clone(&state);
        let target = card.clone();
        dom::listen(card.as_ref(), "click", move |_| {
            let next = state.get().toggled();
            state.set(next);
            dom::set_class(&target, consts::FLIPPED, next.flipped());
        })?;
    }

    let target = card.clone();
    dom::listen(card.as_ref(), "keypress", move |ev| {
        let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let current = state.get();
        let next = current.after_key(&ev.key());
        if next != current {
            state.set(next);
            dom::set_class(&target, consts::FLIPPED, next.flipped());
        }
    })?;
    Ok(())
}

/// Wire every `.team-member` card; no cards is a silent no-op.
///
/// # Errors
///
/// Returns `SiteError::Js` if a listener or attribute cannot be installed.
pub fn install(doc: &Document) -> Result<()> {
    let cards = dom::query_all(doc, consts::TEAM_MEMBERS);
    if cards.is_empty() {
        log::debug!("no team cards; flip disabled");
    }
    for card in &cards {
        bind_card(card)?;
    }
    Ok(())
}
