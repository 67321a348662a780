//! Scroll reveal, staggered card reveal, and the hero intro animations.

use crate::config::FxConfig;
use crate::dom::NodeId;
use crate::error::FxError;
use crate::event::handler::Handler;
use crate::event::message::{Envelope, PageEvent};
use crate::observer::ObserverId;
use crate::page::PageState;
use crate::timer::Task;

use super::is_revealed;

pub const REVEAL_TARGETS: &str = ".reveal, .card, .proj-card, .skill, .timeline-item";
/// Each group is indexed separately for staggering.
pub const STAGGER_GROUPS: [&str; 2] = [".proj-card", ".skill"];
pub const TITLE: &str = ".animate-title";
pub const GLASS: &str = ".glass-card";

pub const VISIBLE: &str = "visible";
pub const TITLE_ANIM: &str = "title-anim";

/// Attribute holding a card's position within its stagger group.
pub const INDEX_ATTR: &str = "data-index";

/// Delay before the card at `index` reveals.
pub fn stagger_delay(index: usize, stagger_ms: u64) -> u64 {
    u64::try_from(index).unwrap_or(u64::MAX).saturating_mul(stagger_ms)
}

// ---------------------------------------------------------------------------
// ScrollReveal
// ---------------------------------------------------------------------------

/// Adds `visible` to every target whose top passes the reveal line.
#[derive(Debug, Clone)]
pub struct ScrollReveal {
    targets: Vec<NodeId>,
    margin: i32,
}

impl ScrollReveal {
    pub fn new(targets: Vec<NodeId>, margin: i32) -> Self {
        Self { targets, margin }
    }

    pub fn apply(&self, state: &mut PageState) {
        let height = state.viewport.height();
        for &node in &self.targets {
            let Some(rect) = state.bounding_rect(node) else { continue };
            if is_revealed(rect, height, self.margin) {
                state.add_class(node, VISIBLE);
            }
        }
    }
}

impl Handler for ScrollReveal {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        self.apply(state);
    }
}

// ---------------------------------------------------------------------------
// StaggerReveal
// ---------------------------------------------------------------------------

/// Reveals project and skill cards in sequence the first time each one
/// intersects, then stops watching it.
#[derive(Debug, Clone)]
pub struct StaggerReveal {
    observer: ObserverId,
    stagger_ms: u64,
}

impl StaggerReveal {
    /// Index the card groups, create the observer and observe every card.
    pub fn install(state: &mut PageState, config: &FxConfig) -> Result<Self, FxError> {
        let observer = state.create_observer(config.observer_threshold);
        for group in STAGGER_GROUPS {
            let cards = state.dom.query_selector_all(group)?;
            for (index, &card) in cards.iter().enumerate() {
                if let Some(data) = state.dom.get_mut(card) {
                    data.set_attr(INDEX_ATTR, index.to_string());
                }
            }
            for card in cards {
                state.observe(observer, card);
            }
        }
        Ok(Self {
            observer,
            stagger_ms: config.stagger_ms,
        })
    }

    pub fn observer(&self) -> ObserverId {
        self.observer
    }
}

impl Handler for StaggerReveal {
    fn handle(&mut self, state: &mut PageState, envelope: &mut Envelope) {
        let PageEvent::Intersection { observer, entries } = &envelope.event else {
            return;
        };
        if *observer != self.observer {
            return;
        }
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            let index = state
                .dom
                .get(entry.target)
                .and_then(|data| data.attr(INDEX_ATTR))
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(0);
            state.schedule(
                stagger_delay(index, self.stagger_ms),
                Task::AddClasses {
                    node: entry.target,
                    classes: vec![VISIBLE.to_owned()],
                },
            );
            state.unobserve(self.observer, entry.target);
        }
    }
}

// ---------------------------------------------------------------------------
// Intro
// ---------------------------------------------------------------------------

/// Schedule the hero title and glass card entrance.
pub fn schedule_intro(state: &mut PageState, config: &FxConfig) -> Result<(), FxError> {
    if let Some(title) = state.dom.query_selector(TITLE)? {
        state.schedule(
            config.title_delay_ms,
            Task::AddClasses {
                node: title,
                classes: vec![VISIBLE.to_owned(), TITLE_ANIM.to_owned()],
            },
        );
    }
    if let Some(glass) = state.dom.query_selector(GLASS)? {
        state.schedule(
            config.glass_delay_ms,
            Task::AddClasses {
                node: glass,
                classes: vec![VISIBLE.to_owned()],
            },
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, NodeData};
    use crate::geometry::Region;
    use crate::observer::IntersectionEntry;
    use crate::viewport::ScrollBehavior;

    fn card_state(layouts: &[(&str, Region)]) -> (PageState, Vec<NodeId>) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body").with_layout(Region::new(0, 0, 1280, 4000)));
        let ids = layouts
            .iter()
            .map(|&(class, layout)| {
                dom.append_child(body, NodeData::new("div").with_class(class).with_layout(layout))
                    .unwrap()
            })
            .collect();
        (PageState::new(dom), ids)
    }

    fn visible(state: &PageState, node: NodeId) -> bool {
        state.dom.get(node).unwrap().has_class(VISIBLE)
    }

    #[test]
    fn stagger_delay_scales_with_index() {
        assert_eq!(stagger_delay(0, 120), 0);
        assert_eq!(stagger_delay(3, 120), 360);
        assert_eq!(stagger_delay(3, 50), 150);
        assert_eq!(stagger_delay(4, u64::MAX / 2), u64::MAX);
    }

    #[test]
    fn scroll_reveal_applies_once() {
        let (mut state, ids) = card_state(&[
            ("reveal", Region::new(0, 600, 100, 100)),
            ("card", Region::new(0, 1500, 100, 100)),
        ]);
        let reveal = ScrollReveal::new(ids.clone(), 60);
        reveal.apply(&mut state);
        assert!(visible(&state, ids[0]));
        assert!(!visible(&state, ids[1]));

        state.viewport.scroll_to(1000, ScrollBehavior::Auto);
        reveal.apply(&mut state);
        reveal.apply(&mut state);
        assert!(visible(&state, ids[1]));
        assert_eq!(state.dom.get(ids[0]).unwrap().revision(), 1);
        assert_eq!(state.dom.get(ids[1]).unwrap().revision(), 1);
    }

    #[test]
    fn scroll_reveal_never_hides() {
        let (mut state, ids) = card_state(&[("reveal", Region::new(0, 100, 100, 100))]);
        let reveal = ScrollReveal::new(ids.clone(), 60);
        reveal.apply(&mut state);
        state.viewport.scroll_to(3000, ScrollBehavior::Auto);
        reveal.apply(&mut state);
        assert!(visible(&state, ids[0]));
    }

    #[test]
    fn install_indexes_groups_separately() {
        let (mut state, ids) = card_state(&[
            ("proj-card", Region::new(0, 0, 10, 10)),
            ("skill", Region::new(0, 0, 10, 10)),
            ("proj-card", Region::new(0, 0, 10, 10)),
            ("skill", Region::new(0, 0, 10, 10)),
        ]);
        let stagger = StaggerReveal::install(&mut state, &FxConfig::default()).unwrap();
        let index = |i: usize| state.dom.get(ids[i]).unwrap().attr(INDEX_ATTR).map(str::to_owned);
        assert_eq!(index(0).as_deref(), Some("0"));
        assert_eq!(index(1).as_deref(), Some("0"));
        assert_eq!(index(2).as_deref(), Some("1"));
        assert_eq!(index(3).as_deref(), Some("1"));
        assert_eq!(state.observers[stagger.observer()].len(), 4);
    }

    #[test]
    fn intersecting_entry_schedules_and_unobserves() {
        let (mut state, ids) = card_state(&[
            ("proj-card", Region::new(0, 0, 10, 10)),
            ("proj-card", Region::new(0, 0, 10, 10)),
            ("proj-card", Region::new(0, 3000, 10, 10)),
        ]);
        let mut stagger = StaggerReveal::install(&mut state, &FxConfig::default()).unwrap();
        let observer = stagger.observer();
        let entries = vec![
            IntersectionEntry { target: ids[1], is_intersecting: true, ratio: 1.0 },
            IntersectionEntry { target: ids[2], is_intersecting: false, ratio: 0.0 },
        ];
        let mut env = Envelope::new(PageEvent::Intersection { observer, entries });
        stagger.handle(&mut state, &mut env);

        let pending: Vec<_> = state.timers.pending().map(|(due, _)| due).collect();
        assert_eq!(pending, vec![120]);
        assert!(!state.observers[observer].is_observing(ids[1]));
        assert!(state.observers[observer].is_observing(ids[2]));
        assert!(state.observers[observer].is_observing(ids[0]));
    }

    #[test]
    fn foreign_observer_entries_are_ignored() {
        let (mut state, ids) = card_state(&[("skill", Region::new(0, 0, 10, 10))]);
        let mut stagger = StaggerReveal::install(&mut state, &FxConfig::default()).unwrap();
        let other = state.create_observer(0.5);
        let entries = vec![IntersectionEntry { target: ids[0], is_intersecting: true, ratio: 1.0 }];
        let mut env = Envelope::new(PageEvent::Intersection { observer: other, entries });
        stagger.handle(&mut state, &mut env);
        assert!(state.timers.is_empty());
    }

    #[test]
    fn intro_schedules_title_and_glass() {
        let (mut state, ids) = card_state(&[
            ("animate-title", Region::EMPTY),
            ("glass-card", Region::EMPTY),
        ]);
        schedule_intro(&mut state, &FxConfig::default()).unwrap();
        let pending: Vec<_> = state.timers.pending().collect();
        assert_eq!(
            pending,
            vec![
                (
                    120,
                    &Task::AddClasses {
                        node: ids[0],
                        classes: vec![VISIBLE.to_owned(), TITLE_ANIM.to_owned()],
                    }
                ),
                (
                    300,
                    &Task::AddClasses {
                        node: ids[1],
                        classes: vec![VISIBLE.to_owned()],
                    }
                ),
            ]
        );
    }

    #[test]
    fn intro_without_hero_is_noop() {
        let (mut state, _) = card_state(&[]);
        schedule_intro(&mut state, &FxConfig::default()).unwrap();
        assert!(state.timers.is_empty());
    }
}
