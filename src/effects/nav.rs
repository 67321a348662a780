//! Navigation: smooth-scrolling links, mobile toggle, active-link highlight.

use crate::dom::{NodeId, Selector};
use crate::error::FxError;
use crate::event::handler::Handler;
use crate::event::message::Envelope;
use crate::geometry::Region;
use crate::page::PageState;
use crate::viewport::ScrollBehavior;

pub const NAV_LINKS: &str = "a.nav-link";
pub const NAV_TOGGLE: &str = ".nav-toggle";
pub const NAV: &str = "nav";

/// Class marking the link of the section under the sticky nav.
pub const ACTIVE: &str = "active";
/// Class marking the mobile nav as expanded.
pub const OPEN: &str = "open";

/// Whether the probe line `from_top` (document space) falls inside `section`.
pub fn section_contains(section: Region, from_top: i32) -> bool {
    section.top() <= from_top && section.bottom() > from_top
}

fn href_target(state: &PageState, link: NodeId) -> Option<NodeId> {
    let href = state.dom.get(link)?.attr("href")?;
    let selector = Selector::parse(href).ok()?;
    state.dom.select(&selector).into_iter().next()
}

// ---------------------------------------------------------------------------
// NavLinkClick
// ---------------------------------------------------------------------------

/// Click on a nav link: smooth-scroll to its section and close the mobile nav.
pub struct NavLinkClick {
    nav: Selector,
}

impl NavLinkClick {
    pub fn new() -> Result<Self, FxError> {
        Ok(Self { nav: Selector::parse(NAV)? })
    }
}

impl Handler for NavLinkClick {
    fn handle(&mut self, state: &mut PageState, envelope: &mut Envelope) {
        envelope.prevent_default();
        let Some(link) = envelope.current_target else { return };

        let target = state
            .dom
            .get(link)
            .and_then(|data| data.attr("href"))
            .map(|href| href.strip_prefix('#').unwrap_or(href).to_owned());
        if let Some(section) = target.as_deref().and_then(|id| state.dom.query_by_id(id)) {
            state.scroll_into_view(section, ScrollBehavior::Smooth);
        }

        if let Some(nav) = state.dom.select(&self.nav).into_iter().next() {
            state.remove_class(nav, OPEN);
        }
    }
}

// ---------------------------------------------------------------------------
// NavToggle
// ---------------------------------------------------------------------------

/// Click on the hamburger: toggle the nav open/closed.
pub struct NavToggle {
    nav: Selector,
}

impl NavToggle {
    pub fn new() -> Result<Self, FxError> {
        Ok(Self { nav: Selector::parse(NAV)? })
    }
}

impl Handler for NavToggle {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        if let Some(nav) = state.dom.select(&self.nav).into_iter().next() {
            state.toggle_class(nav, OPEN);
        }
    }
}

// ---------------------------------------------------------------------------
// NavHighlight
// ---------------------------------------------------------------------------

/// Marks the nav link whose section sits under the sticky nav as active.
#[derive(Debug, Clone)]
pub struct NavHighlight {
    links: Vec<NodeId>,
    offset: i32,
}

impl NavHighlight {
    pub fn new(links: Vec<NodeId>, offset: i32) -> Self {
        Self { links, offset }
    }

    /// Re-evaluate every link against the current scroll offset.
    pub fn apply(&self, state: &mut PageState) {
        let from_top = state.viewport.scroll_y().saturating_add(self.offset);
        for &link in &self.links {
            let active = href_target(state, link)
                .and_then(|section| state.dom.get(section))
                .is_some_and(|section| section_contains(section.layout, from_top));
            if active {
                state.add_class(link, ACTIVE);
            } else {
                state.remove_class(link, ACTIVE);
            }
        }
    }
}

impl Handler for NavHighlight {
    fn handle(&mut self, state: &mut PageState, _envelope: &mut Envelope) {
        self.apply(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Dom, NodeData};
    use crate::event::message::PageEvent;
    use crate::geometry::Offset;

    /// nav > [a#l-about -> #about (0..1000), a#l-work -> #work (1000..2000), a#l-ext -> https://x]
    fn fixture() -> (PageState, NodeId, Vec<NodeId>) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let nav = dom.append_child(body, NodeData::new("nav").with_class(OPEN)).unwrap();
        let links = ["#about", "#work", "https://example.com"]
            .into_iter()
            .map(|href| {
                dom.append_child(nav, NodeData::new("a").with_class("nav-link").with_attr("href", href))
                    .unwrap()
            })
            .collect();
        dom.append_child(body, NodeData::new("section").with_id("about").with_layout(Region::new(0, 0, 1280, 1000)));
        dom.append_child(body, NodeData::new("section").with_id("work").with_layout(Region::new(0, 1000, 1280, 1000)));
        (PageState::new(dom), nav, links)
    }

    fn active(state: &PageState, link: NodeId) -> bool {
        state.dom.get(link).unwrap().has_class(ACTIVE)
    }

    #[test]
    fn section_contains_half_open() {
        let section = Region::new(0, 100, 10, 100);
        assert!(section_contains(section, 100));
        assert!(section_contains(section, 199));
        assert!(!section_contains(section, 200));
        assert!(!section_contains(section, 99));
    }

    #[test]
    fn highlight_follows_scroll() {
        let (mut state, _, links) = fixture();
        let highlight = NavHighlight::new(links.clone(), 120);
        highlight.apply(&mut state);
        assert!(active(&state, links[0]));
        assert!(!active(&state, links[1]));

        // 900 + 120 = 1020 lies in #work.
        state.viewport.scroll_to(900, ScrollBehavior::Auto);
        highlight.apply(&mut state);
        assert!(!active(&state, links[0]));
        assert!(active(&state, links[1]));
        assert!(!active(&state, links[2]));
    }

    #[test]
    fn highlight_is_idempotent() {
        let (mut state, _, links) = fixture();
        let highlight = NavHighlight::new(links.clone(), 120);
        highlight.apply(&mut state);
        let rev = state.dom.get(links[0]).unwrap().revision();
        highlight.apply(&mut state);
        highlight.apply(&mut state);
        assert_eq!(state.dom.get(links[0]).unwrap().revision(), rev);
    }

    #[test]
    fn link_click_scrolls_smoothly_and_closes_nav() {
        let (mut state, nav, links) = fixture();
        let mut handler = NavLinkClick::new().unwrap();
        let mut env = Envelope::new(PageEvent::Click { target: links[1], client: Offset::ZERO });
        env.current_target = Some(links[1]);
        handler.handle(&mut state, &mut env);

        assert!(env.default_prevented());
        assert_eq!(state.viewport.scroll_y(), 1000);
        assert_eq!(state.viewport.last_behavior(), ScrollBehavior::Smooth);
        assert!(!state.dom.get(nav).unwrap().has_class(OPEN));
    }

    #[test]
    fn link_to_missing_section_still_closes_nav() {
        let (mut state, nav, links) = fixture();
        let mut handler = NavLinkClick::new().unwrap();
        let mut env = Envelope::new(PageEvent::Click { target: links[2], client: Offset::ZERO });
        env.current_target = Some(links[2]);
        handler.handle(&mut state, &mut env);
        assert_eq!(state.viewport.scroll_y(), 0);
        assert!(!state.dom.get(nav).unwrap().has_class(OPEN));
    }

    #[test]
    fn toggle_flips_open() {
        let (mut state, nav, _) = fixture();
        let mut handler = NavToggle::new().unwrap();
        let mut env = Envelope::new(PageEvent::Click { target: nav, client: Offset::ZERO });
        handler.handle(&mut state, &mut env);
        assert!(!state.dom.get(nav).unwrap().has_class(OPEN));
        handler.handle(&mut state, &mut env);
        assert!(state.dom.get(nav).unwrap().has_class(OPEN));
    }
}
