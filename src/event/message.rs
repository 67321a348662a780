//! Page events and the envelope handlers receive them in.
//!
//! [`PageEvent`] is the closed set of things that can happen to the page.
//! [`Envelope`] wraps one event with per-listener routing state
//! (`current_target`) and the shared `default_prevented` flag.

use crate::dom::NodeId;
use crate::geometry::{Offset, Size};
use crate::observer::{IntersectionEntry, ObserverId};

// ---------------------------------------------------------------------------
// PageEvent
// ---------------------------------------------------------------------------

/// Something that happened to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The DOM is built; listeners get attached.
    DomContentLoaded,
    /// All resources finished loading.
    Load,
    /// The window scrolled to vertical offset `y`.
    Scroll { y: i32 },
    /// The window was resized.
    Resize { size: Size },
    /// A click on `target` at viewport coordinates `client`.
    Click { target: NodeId, client: Offset },
    /// A form submission.
    Submit { form: NodeId },
    /// An intersection observer has new records.
    Intersection {
        observer: ObserverId,
        entries: Vec<IntersectionEntry>,
    },
}

impl PageEvent {
    /// The listener bucket this event is delivered to.
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::DomContentLoaded => EventKind::DomContentLoaded,
            PageEvent::Load => EventKind::Load,
            PageEvent::Scroll { .. } => EventKind::Scroll,
            PageEvent::Resize { .. } => EventKind::Resize,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::Submit { .. } => EventKind::Submit,
            PageEvent::Intersection { .. } => EventKind::Intersection,
        }
    }

    /// The element the event was fired at, for events that bubble.
    pub fn target(&self) -> Option<NodeId> {
        match self {
            PageEvent::Click { target, .. } => Some(*target),
            PageEvent::Submit { form } => Some(*form),
            _ => None,
        }
    }

    /// Whether this event can move elements relative to the viewport, so
    /// intersection observers must be re-evaluated after it.
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            PageEvent::DomContentLoaded
                | PageEvent::Load
                | PageEvent::Scroll { .. }
                | PageEvent::Resize { .. }
        )
    }
}

/// Event type used as the dispatcher's registry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DomContentLoaded,
    Load,
    Scroll,
    Resize,
    Click,
    Submit,
    Intersection,
}

impl EventKind {
    /// DOM event name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::DomContentLoaded => "DOMContentLoaded",
            EventKind::Load => "load",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::Intersection => "intersection",
        }
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// An event in flight.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The event payload.
    pub event: PageEvent,
    /// The element whose listener is running (`this` in a DOM listener).
    /// `None` for window listeners.
    pub current_target: Option<NodeId>,
    default_prevented: bool,
}

impl Envelope {
    /// Wrap an event for dispatch.
    pub fn new(event: PageEvent) -> Self {
        Self {
            event,
            current_target: None,
            default_prevented: false,
        }
    }

    /// Cancel the event's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether any listener cancelled the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

// ===========================================================================
// Tests
// ===========================================================================
