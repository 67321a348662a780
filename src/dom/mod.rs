//! DOM arena: slotmap-backed element tree with class/id/selector queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{NodeData, NodeId};
pub use query::Selector;
pub use tree::Dom;
