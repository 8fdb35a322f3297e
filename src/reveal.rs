//! One-shot entrance animations driven by viewport visibility.
//!
//! DESIGN
//! ======
//! Every marked element gets a handle. A single element reveals itself the
//! first time it becomes visible. Staggered elements are clustered into
//! groups; only the group's first member is observed, and when it shows up
//! every member is revealed in the same callback with a transition delay of
//! `index * step`. Reveals never revert and each handle reveals at most once.
//!
//! Groups are keyed by an explicit `data-stagger-group` name or, failing
//! that, by the identity of the parent element. Structurally identical
//! sibling containers therefore never merge.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Node};

use crate::config::SiteConfig;
use crate::consts;
use crate::dom;
use crate::error::Result;

/// Index of a tracked element, assigned in registration order.
pub type Handle = usize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupKey {
    /// Value of the explicit group attribute.
    Named(String),
    /// Slot of the owning parent element in the binding's ownership list.
    Parent(usize),
}

/// One element to reveal, with its stagger delay when part of a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub handle: Handle,
    pub delay_ms: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    Single,
    Member { group: usize },
}

#[derive(Debug)]
struct Group {
    key: GroupKey,
    members: Vec<Handle>,
    fired: bool,
}

#[derive(Debug)]
pub struct RevealTracker {
    step_seconds: f64,
    roles: Vec<Role>,
    revealed: Vec<bool>,
    groups: Vec<Group>,
}

impl RevealTracker {
    pub fn new(step_seconds: f64) -> Self {
        Self { step_seconds, roles: Vec::new(), revealed: Vec::new(), groups: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_revealed(&self, handle: Handle) -> bool {
        self.revealed.get(handle).copied().unwrap_or(false)
    }

    pub fn add_single(&mut self) -> Handle {
        self.push(Role::Single)
    }

    /// Register a staggered element. Returns its handle and whether it leads
    /// (is the first member of) its group; only leads are observed.
    pub fn add_to_group(&mut self, key: GroupKey) -> (Handle, bool) {
        let group = match self.groups.iter().position(|g| g.key == key) {
            Some(index) => index,
            None => {
                self.groups.push(Group { key, members: Vec::new(), fired: false });
                self.groups.len() - 1
            }
        };
        let handle = self.push(Role::Member { group });
        let members = &mut self.groups[group].members;
        members.push(handle);
        (handle, members.len() == 1)
    }

    /// Visibility notification for `handle`.
    ///
    /// A single element yields itself; a group lead yields every member of
    /// its group in order. Already revealed handles and non-lead members
    /// yield nothing.
    pub fn on_visible(&mut self, handle: Handle) -> Vec<Reveal> {
        match self.roles.get(handle).copied() {
            Some(Role::Single) => {
                if self.revealed[handle] {
                    return Vec::new();
                }
                self.revealed[handle] = true;
                vec![Reveal { handle, delay_ms: None }]
            }
            Some(Role::Member { group }) => self.fire_group(group, handle),
            None => Vec::new(),
        }
    }

    /// Reveal everything still hidden, used when visibility observation is
    /// unavailable in the browser.
    pub fn reveal_all(&mut self) -> Vec<Reveal> {
        let mut out = Vec::new();
        for handle in 0..self.roles.len() {
            let lead = match self.roles[handle] {
                Role::Single => handle,
                Role::Member { group } => self.groups[group].members[0],
            };
            if lead == handle {
                out.extend(self.on_visible(handle));
            }
        }
        out
    }

    fn push(&mut self, role: Role) -> Handle {
        self.roles.push(role);
        self.revealed.push(false);
        self.roles.len() - 1
    }

    fn fire_group(&mut self, group: usize, trigger: Handle) -> Vec<Reveal> {
        let Some(entry) = self.groups.get_mut(group) else {
            return Vec::new();
        };
        if entry.fired || entry.members.first() != Some(&trigger) {
            return Vec::new();
        }
        entry.fired = true;
        let step = self.step_seconds;
        let mut out = Vec::with_capacity(entry.members.len());
        for (index, &handle) in entry.members.iter().enumerate() {
            if self.revealed[handle] {
                continue;
            }
            self.revealed[handle] = true;
            out.push(Reveal { handle, delay_ms: Some(stagger_delay_ms(index, step)) });
        }
        out
    }
}

/// Transition delay for the `index`-th member of a group, in milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn stagger_delay_ms(index: usize, step_seconds: f64) -> u32 {
    (index as f64 * step_seconds * 1000.0).round().max(0.0) as u32
}

// =============================================================================
// BINDING
// =============================================================================

/// Slot of `el`'s parent in `owners`, appending it on first sight.
fn parent_slot(owners: &mut Vec<Node>, el: &Element) -> usize {
    let Some(parent) = el.parent_node() else {
        owners.push(el.clone().into());
        return owners.len() - 1;
    };
    if let Some(slot) = owners.iter().position(|owner| owner.is_same_node(Some(&parent))) {
        return slot;
    }
    owners.push(parent);
    owners.len() - 1
}

fn group_key(owners: &mut Vec<Node>, el: &Element) -> GroupKey {
    match el.get_attribute(consts::STAGGER_GROUP_ATTR) {
        Some(name) if !name.trim().is_empty() => GroupKey::Named(name.trim().to_owned()),
        _ => GroupKey::Parent(parent_slot(owners, el)),
    }
}

fn read_handle(el: &Element) -> Option<Handle> {
    el.get_attribute(consts::REVEAL_HANDLE_ATTR)?.parse().ok()
}

struct RevealDom {
    tracker: RefCell<RevealTracker>,
    elements: Vec<Element>,
}

impl RevealDom {
    fn render(&self, reveals: &[Reveal]) {
        for reveal in reveals {
            let Some(el) = self.elements.get(reveal.handle) else {
                continue;
            };
            if let Some(ms) = reveal.delay_ms {
                dom::set_style(el, "transition-delay", &format!("{ms}ms"));
            }
            dom::set_class(el, consts::FADE_IN, true);
        }
    }

    fn observer(self: &Rc<Self>, threshold: f64) -> Result<IntersectionObserver> {
        let this = Rc::clone(self);
        let cb = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                let Some(handle) = read_handle(&target) else {
                    continue;
                };
                let reveals = this.tracker.borrow_mut().on_visible(handle);
                this.render(&reveals);
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin("0px");
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &options)?;
        cb.forget();
        Ok(observer)
    }
}

/// Register marked elements and start observing them.
///
/// # Errors
///
/// Returns `SiteError::Js` if a handle attribute cannot be written.
pub fn install(doc: &Document, config: &SiteConfig) -> Result<()> {
    let staggered = dom::query_all(doc, consts::REVEAL_STAGGERED);
    let singles = dom::query_all(doc, consts::REVEAL_SINGLE);
    if staggered.is_empty() && singles.is_empty() {
        log::debug!("no animated elements; reveal disabled");
        return Ok(());
    }

    let mut tracker = RevealTracker::new(config.stagger_step_seconds);
    let mut elements = Vec::with_capacity(staggered.len() + singles.len());
    let mut owners = Vec::new();
    let mut leads = Vec::new();
    let mut single_targets = Vec::new();

    for el in staggered {
        let (handle, lead) = tracker.add_to_group(group_key(&mut owners, &el));
        el.set_attribute(consts::REVEAL_HANDLE_ATTR, &handle.to_string())?;
        if lead {
            leads.push(el.clone());
        }
        elements.push(el);
    }
    for el in singles {
        // Already claimed by a stagger group.
        if el.has_attribute(consts::REVEAL_HANDLE_ATTR) {
            continue;
        }
        let handle = tracker.add_single();
        el.set_attribute(consts::REVEAL_HANDLE_ATTR, &handle.to_string())?;
        single_targets.push(el.clone());
        elements.push(el);
    }
    log::debug!("reveal: {} elements, {} stagger groups", tracker.len(), tracker.group_count());

    let reveal_dom = Rc::new(RevealDom { tracker: RefCell::new(tracker), elements });
    let observers = reveal_dom
        .observer(config.reveal_threshold)
        .and_then(|single| Ok((single, reveal_dom.observer(config.stagger_threshold)?)));
    match observers {
        Ok((single, group)) => {
            for el in &single_targets {
                single.observe(el);
            }
            for el in &leads {
                group.observe(el);
            }
        }
        Err(err) => {
            log::warn!("visibility observation unavailable ({err}); revealing immediately");
            let reveals = reveal_dom.tracker.borrow_mut().reveal_all();
            reveal_dom.render(&reveals);
        }
    }
    Ok(())
}
