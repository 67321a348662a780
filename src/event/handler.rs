//! Event dispatch: handler registry, event queue, and bubble path computation.
//!
//! [`EventDispatcher`] maps each [`EventKind`] to the handlers registered for
//! it, in registration order, and keeps a FIFO of events waiting to be
//! delivered. Routing a click or submit walks the bubble path from the target
//! up to the root, then reaches window listeners.

use std::collections::{HashMap, VecDeque};

use slotmap::{new_key_type, SlotMap};

use super::message::{Envelope, EventKind, PageEvent};
use crate::dom::{Dom, NodeId};
use crate::page::PageState;

new_key_type! {
    /// Handle returned by [`EventDispatcher::on`], used to unregister.
    pub struct HandlerId;
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Something that reacts to page events.
///
/// Handlers receive the whole page state explicitly instead of reaching for
/// globals, so they can be unit-tested against a hand-built [`PageState`].
pub trait Handler: Send + 'static {
    fn handle(&mut self, state: &mut PageState, envelope: &mut Envelope);
}

impl<F> Handler for F
where
    F: FnMut(&mut PageState, &mut Envelope) + Send + 'static,
{
    fn handle(&mut self, state: &mut PageState, envelope: &mut Envelope) {
        self(state, envelope)
    }
}

/// Where a handler is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// `window.addEventListener` / `document.addEventListener`.
    Window,
    /// `element.addEventListener`.
    Node(NodeId),
}

struct Listener {
    kind: EventKind,
    binding: Binding,
    handler: Box<dyn Handler>,
}

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// Registry of handlers keyed by event kind, plus the pending-event queue.
#[derive(Default)]
pub struct EventDispatcher {
    queue: VecDeque<PageEvent>,
    listeners: SlotMap<HandlerId, Listener>,
    by_kind: HashMap<EventKind, Vec<HandlerId>>,
}

impl EventDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registry ─────────────────────────────────────────────────────

    /// Register `handler` for events of `kind` delivered at `binding`.
    pub fn on(&mut self, kind: EventKind, binding: Binding, handler: impl Handler) -> HandlerId {
        let id = self.listeners.insert(Listener {
            kind,
            binding,
            handler: Box::new(handler),
        });
        self.by_kind.entry(kind).or_default().push(id);
        id
    }

    /// Number of handlers registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.by_kind.get(&kind).map_or(0, Vec::len)
    }

    /// Handlers an event reaches, in delivery order, with the
    /// `current_target` each one sees.
    ///
    /// Targeted events visit node listeners along the bubble path (target
    /// first), then window listeners. Other events only reach window
    /// listeners.
    pub fn route(&self, dom: &Dom, event: &PageEvent) -> Vec<(HandlerId, Option<NodeId>)> {
        let Some(ids) = self.by_kind.get(&event.kind()) else {
            return Vec::new();
        };

        let mut route = Vec::new();
        if let Some(target) = event.target() {
            for node in Self::bubble_path(dom, target) {
                route.extend(
                    ids.iter()
                        .filter(|&&id| self.listeners[id].binding == Binding::Node(node))
                        .map(|&id| (id, Some(node))),
                );
            }
        }
        route.extend(
            ids.iter()
                .filter(|&&id| self.listeners[id].binding == Binding::Window)
                .map(|&id| (id, None)),
        );
        route
    }

    /// Run one handler. Unknown ids (unregistered mid-dispatch) are skipped.
    pub fn invoke(&mut self, id: HandlerId, state: &mut PageState, envelope: &mut Envelope) {
        if let Some(listener) = self.listeners.get_mut(id) {
            listener.handler.handle(state, envelope);
        }
    }

    // ── Queue ────────────────────────────────────────────────────────

    /// Enqueue an event for later delivery.
    pub fn push(&mut self, event: PageEvent) {
        self.queue.push_back(event);
    }

    /// Dequeue the oldest pending event.
    pub fn pop(&mut self) -> Option<PageEvent> {
        self.queue.pop_front()
    }

    /// Number of pending events.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Compute the bubble path from `start` up to the root (inclusive).
    ///
    /// Returns `[start, parent, grandparent, ..., root]`, or an empty vec if
    /// `start` is not in the DOM.
    pub fn bubble_path(dom: &Dom, start: NodeId) -> Vec<NodeId> {
        if !dom.contains(start) {
            return Vec::new();
        }
        let mut path = vec![start];
        path.extend(dom.ancestors(start));
        path
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("pending", &self.queue.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;
    use crate::geometry::Offset;

    /// ```text
    ///   body
    ///   ├── form
    ///   │   └── button
    ///   └── aside
    /// ```
    fn build_state() -> (PageState, NodeId, NodeId, NodeId, NodeId) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let form = dom.append_child(body, NodeData::new("form")).unwrap();
        let button = dom.append_child(form, NodeData::new("button")).unwrap();
        let aside = dom.append_child(body, NodeData::new("aside")).unwrap();
        (PageState::new(dom), body, form, button, aside)
    }

    fn click(target: NodeId) -> PageEvent {
        PageEvent::Click { target, client: Offset::ZERO }
    }

    // ── Registry ─────────────────────────────────────────────────────

    #[test]
    fn new_dispatcher_is_empty() {
        let disp = EventDispatcher::new();
        assert!(disp.is_empty());
        assert_eq!(disp.listener_count(EventKind::Scroll), 0);
    }

    #[test]
    fn on_counts_per_kind() {
        let mut disp = EventDispatcher::new();
        disp.on(EventKind::Scroll, Binding::Window, |_: &mut PageState, _: &mut Envelope| {});
        assert_eq!(disp.listener_count(EventKind::Scroll), 1);
        assert_eq!(disp.listener_count(EventKind::Load), 0);
        assert!(!disp.is_empty());
    }

    #[test]
    fn route_untargeted_reaches_window_only() {
        let (state, _, form, ..) = build_state();
        let mut disp = EventDispatcher::new();
        let noop = |_: &mut PageState, _: &mut Envelope| {};
        let win = disp.on(EventKind::Scroll, Binding::Window, noop);
        disp.on(EventKind::Scroll, Binding::Node(form), noop);
        disp.on(EventKind::Load, Binding::Window, noop);

        let route = disp.route(&state.dom, &PageEvent::Scroll { y: 10 });
        assert_eq!(route, vec![(win, None)]);
    }

    #[test]
    fn route_click_bubbles_then_window() {
        let (state, body, form, button, aside) = build_state();
        let mut disp = EventDispatcher::new();
        let noop = |_: &mut PageState, _: &mut Envelope| {};
        let on_win = disp.on(EventKind::Click, Binding::Window, noop);
        let on_body = disp.on(EventKind::Click, Binding::Node(body), noop);
        let on_button = disp.on(EventKind::Click, Binding::Node(button), noop);
        disp.on(EventKind::Click, Binding::Node(aside), noop);
        let on_form = disp.on(EventKind::Click, Binding::Node(form), noop);

        let route = disp.route(&state.dom, &click(button));
        assert_eq!(
            route,
            vec![
                (on_button, Some(button)),
                (on_form, Some(form)),
                (on_body, Some(body)),
                (on_win, None),
            ]
        );
    }

    #[test]
    fn invoke_runs_handler_with_state() {
        let (mut state, _, form, button, _) = build_state();
        let mut disp = EventDispatcher::new();
        let id = disp.on(
            EventKind::Click,
            Binding::Node(form),
            |state: &mut PageState, env: &mut Envelope| {
                if let Some(node) = env.current_target {
                    state.add_class(node, "clicked");
                }
                env.prevent_default();
            },
        );

        let mut env = Envelope::new(click(button));
        env.current_target = Some(form);
        disp.invoke(id, &mut state, &mut env);
        assert!(env.default_prevented());
        assert!(state.dom.get(form).unwrap().has_class("clicked"));
    }

    // ── Queue ────────────────────────────────────────────────────────

    #[test]
    fn push_pop_preserves_order() {
        let mut disp = EventDispatcher::new();
        disp.push(PageEvent::DomContentLoaded);
        disp.push(PageEvent::Load);
        assert_eq!(disp.pending_count(), 2);
        assert_eq!(disp.pop(), Some(PageEvent::DomContentLoaded));
        assert_eq!(disp.pop(), Some(PageEvent::Load));
        assert_eq!(disp.pop(), None);
    }

    // ── Bubble path ──────────────────────────────────────────────────

    #[test]
    fn bubble_path_from_leaf() {
        let (state, body, form, button, _) = build_state();
        let path = EventDispatcher::bubble_path(&state.dom, button);
        assert_eq!(path, vec![button, form, body]);
    }

    #[test]
    fn bubble_path_nonexistent_node() {
        let (mut state, _, _, button, _) = build_state();
        state.dom.remove(button);
        assert!(EventDispatcher::bubble_path(&state.dom, button).is_empty());
    }
}
