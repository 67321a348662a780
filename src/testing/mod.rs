//! Headless testing support: the reference portfolio page and a Pilot.
//!
//! Use [`Pilot`] to load a page and drive it the way a visitor would, then
//! assert on element classes, styles and text by id.

pub mod fixture;
pub mod pilot;

pub use fixture::{portfolio_dom, portfolio_page};
pub use pilot::Pilot;
