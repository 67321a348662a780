//! Page: DOM, viewport, clock, observers and the dispatch loop.
//!
//! [`PageState`] is everything a handler may read or mutate. [`Page`] owns a
//! `PageState` next to the [`EventDispatcher`] so handlers can be invoked
//! with `&mut PageState` while the dispatcher stays borrowed separately.

use slotmap::SlotMap;

use crate::config::FxConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::effects;
use crate::error::FxError;
use crate::event::handler::EventDispatcher;
use crate::event::message::{Envelope, PageEvent};
use crate::geometry::{Region, Size};
use crate::observer::{IntersectionObserver, ObserverId};
use crate::timer::{Task, TimerId, TimerQueue};
use crate::viewport::{ScrollBehavior, Viewport};

/// Upper bound on follow-up events drained per dispatch. Protects against a
/// handler that keeps re-triggering itself.
const MAX_CASCADE: usize = 1024;

/// A file download started by following an `a[download]` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub href: String,
    pub filename: String,
}

// ---------------------------------------------------------------------------
// PageState
// ---------------------------------------------------------------------------

/// Mutable page state shared by all handlers.
#[derive(Debug)]
pub struct PageState {
    /// The element tree.
    pub dom: Dom,
    /// The window viewport.
    pub viewport: Viewport,
    /// Deferred tasks.
    pub timers: TimerQueue,
    /// Registered intersection observers.
    pub observers: SlotMap<ObserverId, IntersectionObserver>,
    /// Downloads started so far.
    pub downloads: Vec<Download>,
    /// Forms that were submitted to the network (default action not prevented).
    pub navigations: Vec<NodeId>,
    /// Follow-up events raised by handlers, drained by [`Page`].
    pending: Vec<PageEvent>,
}

impl PageState {
    /// Wrap a DOM with a default-sized viewport.
    pub fn new(dom: Dom) -> Self {
        Self::with_viewport(dom, Size::new(1280, 800))
    }

    /// Wrap a DOM with a viewport of the given size.
    pub fn with_viewport(dom: Dom, size: Size) -> Self {
        let mut viewport = Viewport::new(size);
        viewport.set_document_height(dom.document_height());
        Self {
            dom,
            viewport,
            timers: TimerQueue::new(),
            observers: SlotMap::with_key(),
            downloads: Vec::new(),
            navigations: Vec::new(),
            pending: Vec::new(),
        }
    }

    // ── Geometry ─────────────────────────────────────────────────────

    /// Viewport-relative box of `node` (`getBoundingClientRect`).
    pub fn bounding_rect(&self, node: NodeId) -> Option<Region> {
        self.dom.get(node).map(|data| self.viewport.bounding_rect(data.layout))
    }

    /// Scroll the window. Raises a scroll event if the offset changed.
    pub fn scroll_to(&mut self, y: i32, behavior: ScrollBehavior) -> bool {
        let moved = self.viewport.scroll_to(y, behavior);
        if moved {
            self.pending.push(PageEvent::Scroll { y: self.viewport.scroll_y() });
        }
        moved
    }

    /// Scroll so `node`'s top aligns with the viewport's top. Missing nodes
    /// are ignored.
    pub fn scroll_into_view(&mut self, node: NodeId, behavior: ScrollBehavior) -> bool {
        match self.dom.get(node) {
            Some(data) => {
                let top = data.layout.top();
                self.scroll_to(top, behavior)
            }
            None => false,
        }
    }

    // ── Presentation ─────────────────────────────────────────────────

    /// Add a class to `node`. Returns `true` only if it changed.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> bool {
        self.dom.get_mut(node).is_some_and(|data| data.add_class(class))
    }

    /// Remove a class from `node`. Returns `true` only if it changed.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> bool {
        self.dom.get_mut(node).is_some_and(|data| data.remove_class(class))
    }

    /// Toggle a class on `node`.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) {
        if let Some(data) = self.dom.get_mut(node) {
            data.toggle_class(class);
        }
    }

    /// Set an inline style on `node`. Returns `true` only if it changed.
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> bool {
        self.dom
            .get_mut(node)
            .is_some_and(|data| data.set_style(property, value))
    }

    /// Replace the text of `node`.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(data) = self.dom.get_mut(node) {
            data.set_text(text);
        }
    }

    /// Trimmed value of the form control with the given id, or `""` when it
    /// doesn't exist.
    pub fn field_value(&self, id: &str) -> String {
        self.dom
            .query_by_id(id)
            .and_then(|node| self.dom.get(node))
            .map(|data| data.value.trim().to_owned())
            .unwrap_or_default()
    }

    /// `form.reset()`: clear every control inside `form`.
    pub fn reset_form(&mut self, form: NodeId) {
        for node in self.dom.walk_depth_first(form) {
            if let Some(data) = self.dom.get_mut(node) {
                if data.is_form_control() {
                    data.value.clear();
                }
            }
        }
    }

    /// Append a new element under `parent`.
    pub fn append(&mut self, parent: NodeId, data: NodeData) -> Option<NodeId> {
        self.dom.append_child(parent, data)
    }

    /// Follow a link the way a click would. Only `download` links have an
    /// observable effect here.
    pub fn follow_link(&mut self, node: NodeId) {
        let Some(data) = self.dom.get(node) else { return };
        if let (Some(href), Some(filename)) = (data.attr("href"), data.attr("download")) {
            let download = Download {
                href: href.to_owned(),
                filename: filename.to_owned(),
            };
            tracing::info!(href = %download.href, filename = %download.filename, "download started");
            self.downloads.push(download);
        }
    }

    // ── Timers & observers ───────────────────────────────────────────

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    /// `setTimeout` equivalent.
    pub fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerId {
        self.timers.schedule(delay_ms, task)
    }

    /// Register a new intersection observer.
    pub fn create_observer(&mut self, threshold: f64) -> ObserverId {
        self.observers.insert(IntersectionObserver::new(threshold))
    }

    /// Observe `node` with `observer`. Unknown observers are ignored.
    pub fn observe(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(obs) = self.observers.get_mut(observer) {
            obs.observe(node);
        }
    }

    /// Stop observing `node`.
    pub fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        if let Some(obs) = self.observers.get_mut(observer) {
            obs.unobserve(node);
        }
    }

    /// Collect intersection records for every observer with changes.
    fn intersection_events(&mut self) -> Vec<PageEvent> {
        let visible = self.viewport.visible_region();
        let dom = &self.dom;
        self.observers
            .iter_mut()
            .filter_map(|(observer, obs)| {
                let entries = obs.take_records(dom, visible);
                (!entries.is_empty()).then_some(PageEvent::Intersection { observer, entries })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A page with its handlers installed on `DOMContentLoaded`.
#[derive(Debug)]
pub struct Page {
    /// Page state visible to handlers.
    pub state: PageState,
    /// Handler registry and event queue.
    pub dispatcher: EventDispatcher,
    /// Effect configuration.
    pub config: FxConfig,
    installed: bool,
}

impl Page {
    /// Create a page over `dom` with a default viewport.
    pub fn new(dom: Dom, config: FxConfig) -> Self {
        Self::from_state(PageState::new(dom), config)
    }

    /// Create a page from a prepared state.
    pub fn from_state(state: PageState, config: FxConfig) -> Self {
        Self {
            state,
            dispatcher: EventDispatcher::new(),
            config,
            installed: false,
        }
    }

    /// Whether `DOMContentLoaded` has run and the effects are attached.
    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// Fire `DOMContentLoaded` then `load`.
    pub fn load(&mut self) -> Result<(), FxError> {
        self.dispatch(PageEvent::DomContentLoaded)?;
        self.dispatch(PageEvent::Load)?;
        Ok(())
    }

    /// Deliver `event` and every follow-up event it causes.
    ///
    /// Returns the envelope of `event` itself, so callers can see whether
    /// its default action was prevented.
    pub fn dispatch(&mut self, event: PageEvent) -> Result<Envelope, FxError> {
        let first = self.deliver(event)?;

        let mut budget = MAX_CASCADE;
        while let Some(next) = self.dispatcher.pop() {
            if budget == 0 {
                tracing::warn!(dropped = self.dispatcher.pending_count() + 1, "event cascade limit reached");
                while self.dispatcher.pop().is_some() {}
                break;
            }
            budget -= 1;
            self.deliver(next)?;
        }
        Ok(first)
    }

    fn deliver(&mut self, event: PageEvent) -> Result<Envelope, FxError> {
        let _span = tracing::trace_span!("dispatch", kind = event.kind().name()).entered();

        match &event {
            PageEvent::DomContentLoaded if !self.installed => {
                self.installed = true;
                effects::install(&mut self.dispatcher, &mut self.state, &self.config)?;
            }
            PageEvent::Scroll { y } => {
                self.state.viewport.scroll_to(*y, ScrollBehavior::Auto);
            }
            PageEvent::Resize { size } => {
                self.state.viewport.resize(*size);
            }
            _ => {}
        }

        let mut envelope = Envelope::new(event);
        for (id, current_target) in self.dispatcher.route(&self.state.dom, &envelope.event) {
            envelope.current_target = current_target;
            self.dispatcher.invoke(id, &mut self.state, &mut envelope);
        }
        envelope.current_target = None;

        if !envelope.default_prevented() {
            self.default_action(&envelope.event);
        }

        for follow_up in self.state.pending.drain(..) {
            self.dispatcher.push(follow_up);
        }
        if envelope.event.is_trigger() {
            for records in self.state.intersection_events() {
                self.dispatcher.push(records);
            }
        }
        Ok(envelope)
    }

    fn default_action(&mut self, event: &PageEvent) {
        match *event {
            PageEvent::Click { target, .. } => {
                let Some(data) = self.state.dom.get(target) else { return };
                if data.tag != "a" {
                    return;
                }
                if data.attr("download").is_some() {
                    self.state.follow_link(target);
                } else if let Some(fragment) = data.attr("href").and_then(|h| h.strip_prefix('#')) {
                    if let Some(section) = self.state.dom.query_by_id(fragment) {
                        self.state.scroll_into_view(section, ScrollBehavior::Auto);
                    }
                }
            }
            PageEvent::Submit { form } => {
                tracing::debug!("form submitted without a handler cancelling it");
                self.state.navigations.push(form);
            }
            _ => {}
        }
    }

    // ── Time ─────────────────────────────────────────────────────────

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.state.now()
    }

    /// Advance the clock by `ms`, running every task that comes due.
    pub fn advance(&mut self, ms: u64) {
        let target = self.state.now().saturating_add(ms);
        self.advance_to(target);
    }

    /// Advance the clock to absolute time `target` (no-op if in the past).
    pub fn advance_to(&mut self, target: u64) {
        while let Some(task) = self.state.timers.pop_due(target) {
            tracing::trace!(now = self.state.now(), ?task, "timer fired");
            task.apply(&mut self.state.dom);
        }
        self.state.timers.set_now(target);
    }

    // ── Convenience ──────────────────────────────────────────────────

    /// Scroll the window to `y` as the user would.
    pub fn scroll_to(&mut self, y: i32) -> Result<(), FxError> {
        self.dispatch(PageEvent::Scroll { y })?;
        Ok(())
    }

    /// Resize the window.
    pub fn resize(&mut self, size: Size) -> Result<(), FxError> {
        self.dispatch(PageEvent::Resize { size })?;
        Ok(())
    }

    /// Change a node's layout and refresh the document height.
    pub fn set_layout(&mut self, node: NodeId, layout: Region) {
        if let Some(data) = self.state.dom.get_mut(node) {
            data.layout = layout;
        }
        let height = self.state.dom.document_height();
        self.state.viewport.set_document_height(height);
    }
}
