//! Button ripple: a short-lived circle centered on the click point.

use crate::config::FxConfig;
use crate::dom::NodeData;
use crate::event::handler::Handler;
use crate::event::message::{Envelope, PageEvent};
use crate::geometry::{Offset, Region};
use crate::page::PageState;
use crate::timer::Task;

pub const RIPPLE: &str = ".ripple";

/// Size and position of a ripple inside its button, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

/// Circle covering the button's longer side, centered on `client`.
pub fn ripple_geometry(button: Region, client: Offset) -> RippleGeometry {
    let diameter = f64::from(button.width.max(button.height));
    let radius = diameter / 2.0;
    RippleGeometry {
        diameter,
        left: f64::from(client.x - button.left()) - radius,
        top: f64::from(client.y - button.top()) - radius,
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Click handler appending the ripple span.
#[derive(Debug, Clone)]
pub struct Ripple {
    frame_ms: u64,
    lifetime_ms: u64,
}

impl Ripple {
    pub fn new(config: &FxConfig) -> Self {
        Self {
            frame_ms: config.frame_ms,
            lifetime_ms: config.ripple_lifetime_ms,
        }
    }
}

impl Handler for Ripple {
    fn handle(&mut self, state: &mut PageState, envelope: &mut Envelope) {
        let PageEvent::Click { client, .. } = envelope.event else { return };
        let Some(button) = envelope.current_target else { return };
        let Some(rect) = state.bounding_rect(button) else { return };

        let geometry = ripple_geometry(rect, client);
        let span = NodeData::new("span")
            .with_style("width", px(geometry.diameter))
            .with_style("height", px(geometry.diameter))
            .with_style("left", px(geometry.left))
            .with_style("top", px(geometry.top))
            .with_style("position", "absolute")
            .with_style("border-radius", "50%")
            .with_style("background", "rgba(255,255,255,0.35)")
            .with_style("transform", "scale(0)")
            .with_style("transition", "transform 600ms, opacity 800ms")
            .with_style("pointer-events", "none");
        let Some(span) = state.append(button, span) else { return };

        state.schedule(
            self.frame_ms,
            Task::SetStyles {
                node: span,
                styles: vec![
                    ("transform".to_owned(), "scale(1)".to_owned()),
                    ("opacity".to_owned(), "0".to_owned()),
                ],
            },
        );
        state.schedule(self.lifetime_ms, Task::Remove { node: span });
    }
}
