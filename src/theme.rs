//! Light/dark theme preference.
//!
//! Resolution order at boot: the stored `theme` entry in `localStorage`,
//! else the system `prefers-color-scheme` query. Toggling flips the theme,
//! re-renders the root flag and icons, and persists the explicit choice.
//! While no explicit choice exists the page follows system changes live;
//! toggling back to the system theme on such a page clears the stored key.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort: an unavailable or full storage area is
//! logged and otherwise ignored, so the toggle still works for the session.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MediaQueryListEvent, Storage};

use crate::consts;
use crate::dom;
use crate::error::{Result, SiteError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored value. Anything other than `light`/`dark` is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

/// Where the active theme came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeSource {
    /// The user picked it (now or in an earlier visit).
    Stored,
    /// Derived from the system color-scheme preference.
    System,
}

/// Visual state derived from the theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeView {
    pub dark_mode: bool,
    pub sun_visible: bool,
    pub moon_visible: bool,
}

/// Storage effect of a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Persist {
    Write(Theme),
    /// Back on the system-derived theme with nothing stored at load.
    Clear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeState {
    theme: Theme,
    source: ThemeSource,
    system: Theme,
    stored_at_load: bool,
}

impl ThemeState {
    pub fn new(stored: Option<&str>, system_dark: bool) -> Self {
        let system = Theme::from_dark(system_dark);
        match stored.and_then(Theme::parse) {
            Some(theme) => Self { theme, source: ThemeSource::Stored, system, stored_at_load: true },
            None => Self { theme: system, source: ThemeSource::System, system, stored_at_load: false },
        }
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn source(&self) -> ThemeSource {
        self.source
    }

    /// Flip the theme and report what storage should hold afterwards.
    ///
    /// Without a preference stored at load, landing back on the system theme
    /// clears the explicit choice and resumes following system changes.
    pub fn toggle(&mut self) -> Persist {
        self.theme = self.theme.toggled();
        if !self.stored_at_load && self.theme == self.system {
            self.source = ThemeSource::System;
            return Persist::Clear;
        }
        self.source = ThemeSource::Stored;
        Persist::Write(self.theme)
    }

    /// Follow a system preference change unless the user chose explicitly.
    /// Returns `true` when the theme changed.
    pub fn system_changed(&mut self, dark: bool) -> bool {
        self.system = Theme::from_dark(dark);
        if self.source == ThemeSource::Stored {
            return false;
        }
        let changed = self.system != self.theme;
        self.theme = self.system;
        changed
    }

    pub const fn view(&self) -> ThemeView {
        let dark = matches!(self.theme, Theme::Dark);
        ThemeView { dark_mode: dark, sun_visible: dark, moon_visible: !dark }
    }
}

// =============================================================================
// BINDING
// =============================================================================

struct ThemeDom {
    root: Element,
    sun: Option<Element>,
    moon: Option<Element>,
    storage: Option<Storage>,
    key: String,
}

impl ThemeDom {
    fn render(&self, view: ThemeView) {
        dom::set_class(&self.root, consts::DARK_MODE, view.dark_mode);
        if let Some(sun) = &self.sun {
            dom::set_inline_visible(sun, view.sun_visible);
        }
        if let Some(moon) = &self.moon {
            dom::set_inline_visible(moon, view.moon_visible);
        }
    }

    fn persist(&self, effect: Persist) {
        let Some(storage) = &self.storage else {
            log::warn!("localStorage unavailable; theme not persisted");
            return;
        };
        let result = match effect {
            Persist::Write(theme) => storage.set_item(&self.key, theme.as_str()),
            Persist::Clear => storage.remove_item(&self.key),
        };
        if let Err(err) = result {
            log::warn!("theme not persisted: {}", crate::error::describe_js(&err));
        }
    }
}

/// Resolve and apply the initial theme, then wire the toggle control.
///
/// # Errors
///
/// Returns `SiteError::MissingElement` when the toggle control is absent.
pub fn install(doc: &Document, storage_key: &str) -> Result<()> {
    let window = dom::window()?;
    let toggle = dom::require_id(doc, consts::THEME_TOGGLE_ID)?;
    let root: Element = match doc.body() {
        Some(body) => body.into(),
        None => doc.document_element().ok_or(SiteError::MissingElement("body"))?,
    };

    let storage = window.local_storage().ok().flatten();
    let stored = storage
        .as_ref()
        .and_then(|s| s.get_item(storage_key).ok().flatten());
    let media = window.match_media(consts::PREFERS_DARK).ok().flatten();
    let system_dark = media.as_ref().is_some_and(web_sys::MediaQueryList::matches);

    let sun = dom::query_in(&toggle, consts::SUN_ICON);
    let moon = dom::query_in(&toggle, consts::MOON_ICON);
    if sun.is_none() || moon.is_none() {
        log::debug!("theme toggle lacks a sun or moon icon; icon swap partial");
    }
    let theme_dom = Rc::new(ThemeDom {
        sun,
        moon,
        root,
        storage,
        key: storage_key.to_owned(),
    });
    let state = Rc::new(RefCell::new(ThemeState::new(stored.as_deref(), system_dark)));
    theme_dom.render(state.borrow().view());
    log::debug!("theme {} ({:?})", state.borrow().theme().as_str(), state.borrow().source());

    {
        let state = Rc::clone(&state);
        let theme_dom = Rc::clone(&theme_dom);
        dom::listen(toggle.as_ref(), "click", move |_| {
            let effect = state.borrow_mut().toggle();
            theme_dom.render(state.borrow().view());
            theme_dom.persist(effect);
        })?;
    }

    if let Some(media) = media {
        let state = Rc::clone(&state);
        let theme_dom = Rc::clone(&theme_dom);
        dom::warn_on_err(
            "system theme listener",
            dom::listen(media.as_ref(), "change", move |ev| {
                let Some(ev) = ev.dyn_ref::<MediaQueryListEvent>() else {
                    return;
                };
                if state.borrow_mut().system_changed(ev.matches()) {
                    theme_dom.render(state.borrow().view());
                }
            }),
        );
    }

    Ok(())
}
