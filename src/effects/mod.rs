//! Page effects and their installation on `DOMContentLoaded`.
//!
//! Each effect is a [`Handler`](crate::event::Handler) holding the nodes it
//! was wired to at install time. Visibility predicates are plain functions
//! over geometry so they can be checked without a page.

pub mod form;
pub mod nav;
pub mod progress;
pub mod resume;
pub mod reveal;
pub mod ripple;
pub mod scroll_top;

use crate::config::FxConfig;
use crate::dom::Selector;
use crate::error::FxError;
use crate::event::handler::{Binding, EventDispatcher};
use crate::event::message::EventKind;
use crate::geometry::Region;
use crate::page::PageState;

/// The reveal predicate: the element's top edge is above
/// `viewport_height - margin`.
pub fn is_revealed(rect: Region, viewport_height: i32, margin: i32) -> bool {
    rect.top() < viewport_height.saturating_sub(margin)
}

/// Attach every effect to the elements present in `state.dom`.
///
/// Elements that don't exist simply get no handler.
pub fn install(
    dispatcher: &mut EventDispatcher,
    state: &mut PageState,
    config: &FxConfig,
) -> Result<(), FxError> {
    let dom = &state.dom;

    // Navigation
    let links = dom.query_selector_all(nav::NAV_LINKS)?;
    for &link in &links {
        dispatcher.on(EventKind::Click, Binding::Node(link), nav::NavLinkClick::new()?);
    }
    if let Some(toggle) = dom.query_selector(nav::NAV_TOGGLE)? {
        dispatcher.on(EventKind::Click, Binding::Node(toggle), nav::NavToggle::new()?);
    }
    let highlight = nav::NavHighlight::new(links.clone(), config.nav_offset);
    highlight.apply(state);
    dispatcher.on(EventKind::Scroll, Binding::Window, highlight);

    // Reveal on scroll / load
    let reveal = reveal::ScrollReveal::new(
        state.dom.query_selector_all(reveal::REVEAL_TARGETS)?,
        config.reveal_margin,
    );
    dispatcher.on(EventKind::Scroll, Binding::Window, reveal.clone());
    dispatcher.on(EventKind::Load, Binding::Window, reveal);

    // Staggered one-shot reveal
    let stagger = reveal::StaggerReveal::install(state, config)?;
    dispatcher.on(EventKind::Intersection, Binding::Window, stagger);
    reveal::schedule_intro(state, config)?;

    // Progress bars
    let progress = progress::ProgressFill::new(
        state.dom.query_selector_all(progress::PROGRESS)?,
        config,
    )?;
    dispatcher.on(EventKind::Scroll, Binding::Window, progress.clone());
    dispatcher.on(EventKind::Load, Binding::Window, progress);

    // Resume download
    if let Some(button) = state.dom.query_by_id(resume::RESUME_BUTTON) {
        dispatcher.on(
            EventKind::Click,
            Binding::Node(button),
            resume::ResumeDownload::new(&config.resume_file),
        );
    }

    // Contact form
    if let Some(parts) = form::FormParts::find(&state.dom) {
        if let Some(clear) = state.dom.query_by_id(form::CLEAR_BUTTON) {
            dispatcher.on(EventKind::Click, Binding::Node(clear), form::ClearForm::new(parts.clone()));
        }
        let form_node = parts.form;
        dispatcher.on(
            EventKind::Submit,
            Binding::Node(form_node),
            form::ContactForm::new(parts, config.success_hide_ms),
        );
    }

    // Scroll-to-top
    if let Some(control) = state.dom.query_by_id(scroll_top::SCROLL_TOP) {
        let toggle = scroll_top::ScrollTopToggle::new(control, config.scroll_top_threshold);
        toggle.apply(state);
        dispatcher.on(EventKind::Scroll, Binding::Window, toggle);
        dispatcher.on(EventKind::Click, Binding::Node(control), scroll_top::ScrollTopClick);
    }

    // Ripple buttons
    let ripple_selector = Selector::parse(ripple::RIPPLE)?;
    for button in state.dom.select(&ripple_selector) {
        dispatcher.on(EventKind::Click, Binding::Node(button), ripple::Ripple::new(config));
    }

    tracing::debug!(
        nav_links = links.len(),
        scroll_listeners = dispatcher.listener_count(EventKind::Scroll),
        click_listeners = dispatcher.listener_count(EventKind::Click),
        "page effects installed"
    );
    Ok(())
}
