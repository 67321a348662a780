//! Scroll-to-top control.

use crate::dom::NodeId;
use crate::event::handler::Handler;
use crate::event::message::Envelope;
use crate::page::PageState;
use crate::viewport::ScrollBehavior;

pub const SCROLL_TOP: &str = "scrollTop";

/// `display` value for the control at scroll offset `scroll_y`.
pub fn control_display(scroll_y: i32, threshold: i32) -> &'static str {
    if scroll_y > threshold {
        "block"
    } else {
        "none"
    }
}

/// Shows the control once the page is scrolled past the threshold.
#[derive(Debug, Clone)]
pub struct ScrollTopToggle {
    control: NodeId,
    threshold: i32,
}

impl ScrollTopToggle {
    pub fn new(control: NodeId, threshold: i32) -> Self {
        Self { control, threshold }
    }

    pub fn apply(&self, state: &mut PageState) {
        let display = control_display(state.viewport.scroll_y(), self.threshold);
        state.set_style(self.control, "display", display);
    }
}

impl Handler for ScrollTopToggle {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        self.apply(state);
    }
}

/// Click: smooth-scroll back to the top.
#[derive(Debug, Clone, Copy)]
pub struct ScrollTopClick;

impl Handler for ScrollTopClick {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        state.scroll_to(0, ScrollBehavior::Smooth);
    }
}
