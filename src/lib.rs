//! # folio
//!
//! Client-side behavior for the studio's static marketing site, compiled to
//! WebAssembly and loaded by the page as an ES module. The markup and the
//! stylesheet are owned elsewhere; this crate only reads the DOM and writes
//! presentation classes and inline styles.
//!
//! Each behavior keeps a pure state core (unit-tested natively) next to a
//! thin `web-sys` binding that renders that state.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Light/dark preference, storage, and icon swap |
//! | [`header`] | `scrolled` header state |
//! | [`nav`] | Mobile navigation menu |
//! | [`reveal`] | One-shot and staggered entrance animations |
//! | [`scrollspy`] | Smooth anchor scrolling and active nav link |
//! | [`contact`] | Contact form submission |
//! | [`cards`] | Team member flip cards |
//! | [`parallax`] | Background blob parallax |
//! | [`footer`] | Copyright year |
//! | [`page`] | Boot sequence and shared scroll handling |
//! | [`config`] | Tunable thresholds and offsets |
//! | [`consts`] | Selectors and presentation class names |
//! | [`dom`] | `web-sys` glue |
//! | [`error`] | Boot errors |

pub mod cards;
pub mod config;
pub mod consts;
pub mod contact;
pub mod dom;
pub mod error;
pub mod footer;
pub mod header;
pub mod nav;
pub mod page;
pub mod parallax;
pub mod reveal;
pub mod scrollspy;
pub mod theme;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::config::SiteConfig;
use crate::page::{BootGate, BootOwner};

thread_local! {
    static BOOT: BootGate = BootGate::default();
}

fn init_logging() {
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if let Err(err) = console_log::init_with_level(level) {
        // Another module on the page already owns the logger.
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }
}

fn run(owner: BootOwner, config: &SiteConfig) {
    if !BOOT.with(|gate| gate.begin(owner)) {
        log::debug!("{owner:?} boot superseded");
        return;
    }
    if let Err(err) = page::boot(config) {
        log::error!("page boot halted: {err}");
    }
}

/// Call `f` once the document has been parsed.
fn when_ready(f: impl FnOnce() + 'static) {
    let Ok(doc) = dom::document() else {
        log::error!("no document; page behaviors not installed");
        return;
    };
    if doc.ready_state() != "loading" {
        f();
        return;
    }
    let pending = RefCell::new(Some(f));
    dom::warn_on_err(
        "DOMContentLoaded listener",
        dom::listen(doc.as_ref(), "DOMContentLoaded", move |_| {
            if let Some(f) = pending.borrow_mut().take() {
                f();
            }
        }),
    );
}

fn manual_boot_requested() -> bool {
    dom::document()
        .ok()
        .and_then(|doc| doc.body())
        .is_some_and(|body| body.has_attribute(consts::MANUAL_BOOT_ATTR))
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging();
    BOOT.with(BootGate::queue_default);
    when_ready(|| {
        if manual_boot_requested() {
            log::debug!("manual boot requested; waiting for startWithConfig");
            return;
        }
        run(BootOwner::Default, &SiteConfig::default());
    });
}

/// Boot with configuration overrides (a JSON object with camelCase keys).
/// Pair with `data-folio-manual` on `<body>` to suppress the default boot.
///
/// # Errors
///
/// Rejects malformed JSON or unknown keys before touching the page, and
/// refuses a second boot. A default boot still waiting for the document is
/// replaced by this one.
#[wasm_bindgen(js_name = startWithConfig)]
pub fn start_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = SiteConfig::from_json(config_json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    BOOT.with(BootGate::claim_configured).map_err(|err| JsValue::from_str(&err.to_string()))?;
    when_ready(move || run(BootOwner::Configured, &config));
    Ok(())
}
