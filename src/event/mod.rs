//! Event system: page events, envelopes, handler registry and dispatch.

pub mod handler;
pub mod message;

pub use handler::{Binding, EventDispatcher, Handler, HandlerId};
pub use message::{Envelope, EventKind, PageEvent};
