//! Window viewport: scroll position, size, and bounding-rect projection.
//!
//! The scroll offset is always clamped to `[0, max_scroll]` where
//! `max_scroll = document_height - viewport_height` (clamped to zero).

use crate::geometry::{Offset, Region, Size};

/// How a programmatic scroll was requested (`scrollIntoView` / `scrollTo`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    #[default]
    Auto,
    /// Animated scroll.
    Smooth,
}

/// The browser window's viewport onto the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    /// Vertical scroll offset (`window.scrollY`).
    scroll_y: i32,
    /// Visible area (`innerWidth` x `innerHeight`).
    size: Size,
    /// Total scrollable document height.
    document_height: i32,
    /// Behavior of the most recent scroll that moved the viewport.
    last_behavior: ScrollBehavior,
}

impl Viewport {
    /// Create a viewport at the top of an empty document.
    pub fn new(size: Size) -> Self {
        Self {
            scroll_y: 0,
            size,
            document_height: 0,
            last_behavior: ScrollBehavior::Auto,
        }
    }

    /// Current vertical scroll offset.
    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    /// Viewport size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// `window.innerHeight`.
    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Behavior of the last effective scroll.
    pub fn last_behavior(&self) -> ScrollBehavior {
        self.last_behavior
    }

    /// The furthest the document can be scrolled.
    pub fn max_scroll(&self) -> i32 {
        (self.document_height - self.size.height).max(0)
    }

    /// Scroll to an absolute offset, clamping to the valid range.
    ///
    /// Returns `true` if the offset changed.
    pub fn scroll_to(&mut self, y: i32, behavior: ScrollBehavior) -> bool {
        let y = y.clamp(0, self.max_scroll());
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        self.last_behavior = behavior;
        true
    }

    /// Update the document height and re-clamp. Returns `true` if the
    /// offset moved as a result.
    pub fn set_document_height(&mut self, height: i32) -> bool {
        self.document_height = height.max(0);
        self.scroll_to(self.scroll_y, ScrollBehavior::Auto)
    }

    /// Resize the viewport and re-clamp. Returns `true` if the offset moved.
    pub fn resize(&mut self, size: Size) -> bool {
        self.size = size;
        self.scroll_to(self.scroll_y, ScrollBehavior::Auto)
    }

    /// The visible part of the document, in document coordinates.
    pub fn visible_region(&self) -> Region {
        Region::new(0, self.scroll_y, self.size.width, self.size.height)
    }

    /// Project a document-space layout box into viewport space
    /// (`getBoundingClientRect`).
    pub fn bounding_rect(&self, layout: Region) -> Region {
        layout.translate(Offset::new(0, -self.scroll_y))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Size::new(1280, 800))
    }
}
