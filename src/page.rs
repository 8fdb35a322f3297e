//! Page boot sequence and shared scroll handling.
//!
//! ARCHITECTURE
//! ============
//! `boot` installs each behavior in document order. Required chrome (theme
//! toggle, header, nav) aborts boot when missing; everything else degrades
//! to a no-op. Header, scroll spy, and parallax share one passive scroll
//! listener whose work is coalesced to a single update per animation frame.
//!
//! A page boots at most once. [`BootGate`] records the owner: the automatic
//! start queues a default boot, a configured start may replace it until boot
//! begins, and every later claim is refused.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::Window;

use crate::config::SiteConfig;
use crate::consts;
use crate::dom;
use crate::error::{Result, SiteError};
use crate::header::HeaderBinding;
use crate::parallax::ParallaxBinding;
use crate::scrollspy::{self, ScrollSpyBinding};
use crate::{cards, contact, footer, nav, reveal, theme};

/// Which entry point owns the single boot of this page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootOwner {
    Default,
    Configured,
}

/// One-shot claim on booting the page.
#[derive(Debug, Default)]
pub struct BootGate {
    owner: Cell<Option<BootOwner>>,
    started: Cell<bool>,
}

impl BootGate {
    /// Claim boot for a configured start.
    ///
    /// Succeeds while boot has not started yet, taking over a default boot
    /// that is still waiting for the document.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::AlreadyBooted` once boot has run or a configured
    /// boot is already queued.
    pub fn claim_configured(&self) -> Result<()> {
        if self.started.get() || self.owner.get() == Some(BootOwner::Configured) {
            return Err(SiteError::AlreadyBooted);
        }
        self.owner.set(Some(BootOwner::Configured));
        Ok(())
    }

    /// Register the default boot unless a configured one got there first.
    pub fn queue_default(&self) {
        if self.owner.get().is_none() {
            self.owner.set(Some(BootOwner::Default));
        }
    }

    /// Called when `who` is ready to boot; `true` when it still owns the gate.
    pub fn begin(&self, who: BootOwner) -> bool {
        if self.started.get() || self.owner.get() != Some(who) {
            return false;
        }
        self.started.set(true);
        true
    }
}

/// Everything that re-renders from the scroll position.
struct ScrollEffects {
    window: Window,
    header: Rc<HeaderBinding>,
    spy: ScrollSpyBinding,
    parallax: ParallaxBinding,
    frame_pending: Cell<bool>,
}

impl ScrollEffects {
    fn update(&self) {
        let scroll_y = dom::scroll_y(&self.window);
        self.header.update(scroll_y);
        self.spy.update(scroll_y, self.header.height());
        self.parallax.update(scroll_y);
    }
}

/// Run `update` on the next animation frame unless one is already queued.
fn install_scroll_effects(effects: Rc<ScrollEffects>) -> Result<()> {
    let frame = {
        let effects = Rc::clone(&effects);
        Closure::wrap(Box::new(move |_ts: f64| {
            effects.frame_pending.set(false);
            effects.update();
        }) as Box<dyn FnMut(f64)>)
    };
    let frame_fn: js_sys::Function = frame.as_ref().unchecked_ref::<js_sys::Function>().clone();
    frame.forget();

    let schedule = Rc::new(move || {
        if effects.frame_pending.replace(true) {
            return;
        }
        if effects.window.request_animation_frame(&frame_fn).is_err() {
            effects.frame_pending.set(false);
            effects.update();
        }
    });

    let window = dom::window()?;
    {
        let schedule = Rc::clone(&schedule);
        dom::listen_passive(window.as_ref(), "scroll", move |_| schedule())?;
    }
    // Section geometry moves with the viewport width.
    dom::warn_on_err("resize listener", dom::listen_passive(window.as_ref(), "resize", move |_| schedule()));
    Ok(())
}

/// Install every page behavior.
///
/// # Errors
///
/// Returns the first failure among required elements or listener
/// installation; behaviors installed before it stay active.
pub fn boot(config: &SiteConfig) -> Result<()> {
    let window = dom::window()?;
    let doc = dom::document()?;
    log::debug!("boot: {config:?}");

    footer::install(&doc);
    theme::install(&doc, &config.storage_key)?;

    let header = Rc::new(HeaderBinding::new(
        dom::require(&doc, consts::HEADER)?,
        config.header_scroll_threshold,
    ));
    nav::install(&doc)?;
    reveal::install(&doc, config)?;
    scrollspy::install_smooth_scroll(&doc, &header, config.scroll_buffer)?;

    let parallax = ParallaxBinding::new(&doc, config.parallax_factors)?;
    if parallax.is_empty() {
        log::debug!("no background blobs; parallax disabled");
    }
    let effects = Rc::new(ScrollEffects {
        window,
        header,
        spy: ScrollSpyBinding::new(&doc, config),
        parallax,
        frame_pending: Cell::new(false),
    });
    effects.update();
    install_scroll_effects(effects)?;

    contact::install(&doc)?;
    cards::install(&doc)?;

    log::info!("page behaviors ready");
    Ok(())
}
