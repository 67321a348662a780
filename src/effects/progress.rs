//! Skill progress bars: fill to `data-percent` once scrolled into view.

use crate::config::FxConfig;
use crate::dom::{NodeId, Selector};
use crate::error::FxError;
use crate::event::handler::Handler;
use crate::event::message::Envelope;
use crate::page::PageState;

use super::is_revealed;

pub const PROGRESS: &str = ".progress";
pub const FILL: &str = ".fill";
pub const PERCENT_ATTR: &str = "data-percent";

/// Sets each bar's fill width from its `data-percent`.
#[derive(Debug, Clone)]
pub struct ProgressFill {
    bars: Vec<NodeId>,
    fill: Selector,
    margin: i32,
    default_percent: String,
}

impl ProgressFill {
    pub fn new(bars: Vec<NodeId>, config: &FxConfig) -> Result<Self, FxError> {
        Ok(Self {
            bars,
            fill: Selector::parse(FILL)?,
            margin: config.reveal_margin,
            default_percent: config.default_percent.clone(),
        })
    }

    pub fn apply(&self, state: &mut PageState) {
        let height = state.viewport.height();
        for &bar in &self.bars {
            let Some(rect) = state.bounding_rect(bar) else { continue };
            if !is_revealed(rect, height, self.margin) {
                continue;
            }
            let Some(fill) = state.dom.select_within(bar, &self.fill).into_iter().next() else {
                continue;
            };
            let width = format!("{}%", self.percent_of(state, bar));
            state.set_style(fill, "width", &width);
        }
    }

    fn percent_of<'a>(&'a self, state: &'a PageState, bar: NodeId) -> &'a str {
        state
            .dom
            .get(bar)
            .and_then(|data| data.attr(PERCENT_ATTR))
            .filter(|p| !p.is_empty())
            .unwrap_or(&self.default_percent)
    }
}

impl Handler for ProgressFill {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        self.apply(state);
    }
}
