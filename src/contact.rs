//! Contact form submission over `fetch`.
//!
//! DESIGN
//! ======
//! The submit handler holds a [`BusyGuard`] for the whole attempt. Acquiring
//! it disables the submit control and swaps in the busy label; dropping it
//! restores both. Every exit path, including a failed request, drops the
//! guard exactly once, after the user has been told the outcome.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here propagates: a network failure, a rejected submission, and an
//! unreadable error body all end in an alert plus restored control state.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use gloo_net::http::{Method, RequestBuilder};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, HtmlButtonElement, HtmlFormElement, UrlSearchParams, Window};

use crate::consts;
use crate::dom;
use crate::error::Result;

// =============================================================================
// TYPES
// =============================================================================

/// What came back from the form endpoint. The body is only read for
/// non-success statuses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactResponse {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

/// The request never completed.
#[derive(Debug, thiserror::Error)]
#[error("request failed: {0}")]
pub struct TransportError(pub String);

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
struct FieldError {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx from the endpoint.
    Sent,
    /// Non-success with a readable `errors` list.
    Rejected(String),
    /// Non-success without a usable error list.
    Failed,
    /// The request itself failed.
    Unreachable,
}

impl SubmitOutcome {
    pub fn classify(result: std::result::Result<ContactResponse, TransportError>) -> Self {
        match result {
            Ok(resp) if resp.ok => Self::Sent,
            Ok(resp) => rejection_message(&resp.body).map_or(Self::Failed, Self::Rejected),
            Err(_) => Self::Unreachable,
        }
    }

    /// Text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Sent => consts::MSG_SENT,
            Self::Rejected(msg) => msg,
            Self::Failed => consts::MSG_REJECTED,
            Self::Unreachable => consts::MSG_UNREACHABLE,
        }
    }

    pub const fn resets_form(&self) -> bool {
        matches!(self, Self::Sent)
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Rejected(_) => "rejected",
            Self::Failed => "failed",
            Self::Unreachable => "unreachable",
        }
    }
}

/// Join `errors[*].message` with `", "`. `None` when the body is not JSON,
/// has no `errors` list, or the list carries no messages.
pub fn rejection_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let messages = parsed
        .errors?
        .into_iter()
        .filter_map(|e| e.message)
        .collect::<Vec<_>>();
    if messages.is_empty() {
        return None;
    }
    Some(messages.join(", "))
}

/// HTTP method for the form's `method` attribute; anything but `get` posts.
pub fn request_method(attr: Option<&str>) -> Method {
    match attr.map(str::trim) {
        Some(m) if m.eq_ignore_ascii_case("get") => Method::GET,
        _ => Method::POST,
    }
}

/// Append an encoded query to `action`.
pub fn with_query(action: &str, query: &str) -> String {
    if query.is_empty() {
        return action.to_owned();
    }
    let sep = if action.contains('?') { '&' } else { '?' };
    format!("{action}{sep}{query}")
}

// =============================================================================
// SCOPED BUSY STATE
// =============================================================================

/// The parts of the form a submission touches.
pub trait FormSurface {
    fn is_busy(&self) -> bool;
    /// Disable the submit control and show the busy label; returns the label
    /// to restore later.
    fn begin_busy(&self) -> String;
    fn end_busy(&self, original_label: &str);
    fn alert(&self, message: &str);
    /// Clear the fields and any floating-label inline styles.
    fn reset(&self);
}

/// Busy state for one submission attempt, released on drop.
pub struct BusyGuard<'a, S: FormSurface + ?Sized> {
    surface: &'a S,
    original_label: String,
}

impl<'a, S: FormSurface + ?Sized> BusyGuard<'a, S> {
    /// `None` when an attempt is already in flight.
    pub fn acquire(surface: &'a S) -> Option<Self> {
        if surface.is_busy() {
            return None;
        }
        let original_label = surface.begin_busy();
        Some(Self { surface, original_label })
    }
}

impl<S: FormSurface + ?Sized> Drop for BusyGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.end_busy(&self.original_label);
    }
}

/// Run one submission: busy, await `send`, alert, reset on success, restore.
///
/// Returns `None` without touching the surface when a previous attempt is
/// still in flight.
pub async fn submit<S, F>(surface: &S, send: F) -> Option<SubmitOutcome>
where
    S: FormSurface + ?Sized,
    F: Future<Output = std::result::Result<ContactResponse, TransportError>>,
{
    let _busy = BusyGuard::acquire(surface)?;
    let outcome = SubmitOutcome::classify(send.await);
    surface.alert(outcome.message());
    if outcome.resets_form() {
        surface.reset();
    }
    Some(outcome)
}

// =============================================================================
// BINDING
// =============================================================================

struct ContactDom {
    window: Window,
    form: HtmlFormElement,
    button: Option<HtmlButtonElement>,
    busy: Cell<bool>,
}

impl FormSurface for ContactDom {
    fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn begin_busy(&self) -> String {
        self.busy.set(true);
        let Some(button) = &self.button else {
            return String::new();
        };
        let original = button.inner_html();
        button.set_inner_html(consts::SENDING_LABEL);
        button.set_disabled(true);
        original
    }

    fn end_busy(&self, original_label: &str) {
        if let Some(button) = &self.button {
            button.set_inner_html(original_label);
            button.set_disabled(false);
        }
        self.busy.set(false);
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {}", crate::error::describe_js(&err));
        }
    }

    fn reset(&self) {
        self.form.reset();
        for label in dom::query_all_in(&self.form, consts::FLOATING_LABELS) {
            for property in ["top", "font-size", "color"] {
                dom::set_style(&label, property, "");
            }
        }
    }
}

/// Build the request for the form's current fields and send it.
async fn send_form(
    action: String,
    method: Method,
    fields: FormData,
) -> std::result::Result<ContactResponse, TransportError> {
    let builder = |url: &str| RequestBuilder::new(url).method(method.clone()).header("Accept", "application/json");
    let built = if method == Method::GET {
        let query = UrlSearchParams::new_with_str_sequence_sequence(&fields)
            .map(|params| String::from(params.to_string()))
            .map_err(|err| TransportError(crate::error::describe_js(&err)))?;
        builder(&with_query(&action, &query)).build()
    } else {
        builder(&action).body(fields)
    };
    let request = built.map_err(|err| TransportError(err.to_string()))?;

    let resp = request.send().await.map_err(|err| TransportError(err.to_string()))?;
    let ok = resp.ok();
    let body = if ok { String::new() } else { resp.text().await.unwrap_or_default() };
    Ok(ContactResponse { ok, status: resp.status(), body })
}

/// Wire the contact form; no form is a silent no-op.
///
/// # Errors
///
/// Returns `SiteError::Js` if the submit listener cannot be installed.
pub fn install(doc: &Document) -> Result<()> {
    let Some(form) = doc
        .get_element_by_id(consts::CONTACT_FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        log::debug!("no contact form; submission handler disabled");
        return Ok(());
    };
    let button = dom::query_in(&form, consts::SUBMIT_BUTTON).and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let surface = Rc::new(ContactDom { window: dom::window()?, form, button, busy: Cell::new(false) });

    let target = surface.form.clone();
    dom::listen(target.as_ref(), "submit", move |ev| {
        ev.prevent_default();
        if surface.is_busy() {
            return;
        }
        let fields = match FormData::new_with_form(&surface.form) {
            Ok(fields) => fields,
            Err(err) => {
                log::warn!("form data unavailable: {}", crate::error::describe_js(&err));
                return;
            }
        };
        let method = request_method(surface.form.get_attribute("method").as_deref());
        let action = surface.form.action();
        let surface = Rc::clone(&surface);
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(outcome) = submit(&*surface, send_form(action, method, fields)).await {
                log::info!("contact form {}", outcome.kind());
            }
        });
    })?;
    Ok(())
}
