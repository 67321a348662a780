//! # folio-fx
//!
//! A headless model of a portfolio page's interactive layer: smooth-scrolling
//! navigation, active-link highlighting, scroll-triggered reveals, progress bar
//! fills, contact form validation, button ripples, a resume download and a
//! scroll-to-top control.
//!
//! The page is an in-memory DOM with document geometry, a viewport, a virtual
//! clock and an explicit event dispatcher, so every behavior can be driven and
//! asserted on without a browser.
//!
//! ## Core Systems
//!
//! - **[`dom`]**: Slotmap-backed element tree with selector queries
//! - **[`viewport`]**: Scroll offset, window size, bounding rects
//! - **[`event`]**: Page events, handlers, and the dispatcher
//! - **[`timer`]**: Virtual clock for deferred DOM tasks
//! - **[`observer`]**: Thresholded intersection observers
//! - **[`effects`]**: The page behaviors, installed on `DOMContentLoaded`
//! - **[`page`]**: `Page` and `PageState`, tying everything together
//! - **[`runtime`]**: tokio driver for a live event stream
//! - **[`testing`]**: Reference page fixture and the `Pilot`

// Foundation
pub mod config;
pub mod error;
pub mod geometry;

// Document model
pub mod dom;
pub mod observer;
pub mod timer;
pub mod viewport;

// Events and behavior
pub mod effects;
pub mod event;

// Page
pub mod page;
pub mod runtime;

// Test support
pub mod testing;

pub use config::FxConfig;
pub use error::FxError;
pub use page::{Page, PageState};
