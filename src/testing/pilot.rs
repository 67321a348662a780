//! Pilot: programmatic interaction with a headless page.
//!
//! The `Pilot` owns a [`Page`] and provides methods to simulate what a user
//! does (scroll, click, fill in and submit the contact form, wait) and to
//! inspect the resulting DOM by element id.

use crate::config::FxConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::error::FxError;
use crate::event::message::{Envelope, PageEvent};
use crate::geometry::{Offset, Size};
use crate::page::{Page, PageState};

use super::fixture::portfolio_dom;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless page driver for tests.
///
/// # Examples
///
/// ```
/// use folio_fx::testing::Pilot;
///
/// let mut pilot = Pilot::portfolio().unwrap();
/// pilot.scroll_to(600).unwrap();
/// assert!(pilot.is_displayed("scrollTop"));
/// ```
pub struct Pilot {
    page: Page,
}

impl Pilot {
    /// Load `dom` with `config` (fires `DOMContentLoaded` and `load`).
    pub fn new(dom: Dom, config: FxConfig) -> Result<Self, FxError> {
        let mut page = Page::new(dom, config);
        page.load()?;
        Ok(Self { page })
    }

    /// The reference portfolio page, loaded, with default config.
    pub fn portfolio() -> Result<Self, FxError> {
        Self::new(portfolio_dom(), FxConfig::default())
    }

    /// The reference portfolio page, loaded, with `config`.
    pub fn portfolio_with(config: FxConfig) -> Result<Self, FxError> {
        Self::new(portfolio_dom(), config)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Scroll the window to `y`.
    pub fn scroll_to(&mut self, y: i32) -> Result<(), FxError> {
        self.page.scroll_to(y)
    }

    /// Resize the window.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), FxError> {
        self.page.resize(Size::new(width, height))
    }

    /// Click `node` at viewport point `client`.
    pub fn click_at(&mut self, node: NodeId, client: Offset) -> Result<Envelope, FxError> {
        self.page.dispatch(PageEvent::Click { target: node, client })
    }

    /// Click the center of the element with the given id. Missing elements
    /// produce no event.
    pub fn click(&mut self, id: &str) -> Result<Option<Envelope>, FxError> {
        let Some(node) = self.find(id) else {
            return Ok(None);
        };
        let rect = self.page.state.bounding_rect(node).unwrap_or_default();
        let center = Offset::new(rect.x + rect.width / 2, rect.y + rect.height / 2);
        self.click_at(node, center).map(Some)
    }

    /// Set the value of a form control.
    pub fn fill(&mut self, id: &str, value: &str) {
        if let Some(data) = self.find(id).and_then(|node| self.page.state.dom.get_mut(node)) {
            data.value = value.to_owned();
        }
    }

    /// Submit the form with the given id.
    pub fn submit(&mut self, form_id: &str) -> Result<Option<Envelope>, FxError> {
        let Some(form) = self.find(form_id) else {
            return Ok(None);
        };
        self.page.dispatch(PageEvent::Submit { form }).map(Some)
    }

    /// Fill the three contact fields and submit the contact form.
    pub fn submit_contact(&mut self, name: &str, email: &str, message: &str) -> Result<Option<Envelope>, FxError> {
        self.fill("name", name);
        self.fill("email", email);
        self.fill("message", message);
        self.submit("contactForm")
    }

    /// Let `ms` milliseconds pass.
    pub fn wait(&mut self, ms: u64) {
        self.page.advance(ms);
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Borrow the page.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Borrow the page mutably.
    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Borrow the page state.
    pub fn state(&self) -> &PageState {
        &self.page.state
    }

    /// Node with the given id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.page.state.dom.query_by_id(id)
    }

    /// Data of the node with the given id.
    pub fn node(&self, id: &str) -> Option<&NodeData> {
        self.find(id).and_then(|node| self.page.state.dom.get(node))
    }

    /// Whether the element with the given id has `class`.
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.node(id).is_some_and(|data| data.has_class(class))
    }

    /// Inline style of the element with the given id.
    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.node(id)
            .and_then(|data| data.style(property))
            .map(str::to_owned)
    }

    /// Whether the element with the given id is shown.
    pub fn is_displayed(&self, id: &str) -> bool {
        self.node(id).is_some_and(NodeData::is_displayed)
    }

    /// Text of the element with the given id.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.node(id).map(|data| data.text.as_str())
    }

    /// Current window scroll offset.
    pub fn scroll_y(&self) -> i32 {
        self.page.state.viewport.scroll_y()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
