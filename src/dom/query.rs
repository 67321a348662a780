//! DOM queries: a small selector grammar and document-order matching.
//!
//! Supported selectors are compounds of an optional tag followed by any
//! number of `#id` and `.class` parts (`a.nav-link`, `#hero`, `.progress`),
//! joined into lists with commas. Combinators are not supported.

use std::str::FromStr;

use super::node::{NodeData, NodeId};
use super::tree::Dom;
use crate::error::FxError;

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// One compound selector: `tag#id.class.class`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    /// Whether `data` satisfies every part of this compound.
    pub fn matches(&self, data: &NodeData) -> bool {
        self.tag.as_deref().is_none_or(|t| t == "*" || t == data.tag)
            && self.id.as_deref().is_none_or(|id| data.id.as_deref() == Some(id))
            && self.classes.iter().all(|c| data.has_class(c))
    }

    fn parse(text: &str, full: &str) -> Result<Self, FxError> {
        let invalid = || FxError::InvalidSelector(full.to_owned());
        if text.is_empty() || text.contains(char::is_whitespace) {
            return Err(invalid());
        }

        let mut compound = Compound::default();
        let mut rest = text;

        let tag_len = rest
            .find(['.', '#'])
            .unwrap_or(rest.len());
        if tag_len > 0 {
            let tag = &rest[..tag_len];
            if !is_ident(tag) && tag != "*" {
                return Err(invalid());
            }
            compound.tag = Some(tag.to_ascii_lowercase());
            rest = &rest[tag_len..];
        }

        while let Some(sigil) = rest.chars().next() {
            let body = &rest[1..];
            let len = body.find(['.', '#']).unwrap_or(body.len());
            let name = &body[..len];
            if !is_ident(name) {
                return Err(invalid());
            }
            match sigil {
                '.' => compound.classes.push(name.to_owned()),
                '#' if compound.id.is_none() => compound.id = Some(name.to_owned()),
                _ => return Err(invalid()),
            }
            rest = &body[len..];
        }
        Ok(compound)
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A comma-separated list of compound selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(text: &str) -> Result<Self, FxError> {
        let compounds = text
            .split(',')
            .map(|part| Compound::parse(part.trim(), text))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { compounds })
    }

    /// Whether any compound in the list matches `data`.
    pub fn matches(&self, data: &NodeData) -> bool {
        self.compounds.iter().any(|c| c.matches(data))
    }
}

impl FromStr for Selector {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Dom queries
// ---------------------------------------------------------------------------

impl Dom {
    /// First node in document order with the given id.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_order()
            .into_iter()
            .find(|&node| self.nodes[node].id.as_deref() == Some(id))
    }

    /// All nodes matching `selector`, in document order. A node matching
    /// several compounds of the list appears once.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.filter_document(|data| selector.matches(data))
    }

    /// Nodes strictly inside `scope` matching `selector`, in document order.
    pub fn select_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.walk_depth_first(scope)
            .into_iter()
            .skip(1)
            .filter(|&node| selector.matches(&self.nodes[node]))
            .collect()
    }

    /// Parse `selector` and return every match (`querySelectorAll`).
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, FxError> {
        Ok(self.select(&Selector::parse(selector)?))
    }

    /// Parse `selector` and return the first match (`querySelector`).
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, FxError> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    fn filter_document(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|&node| predicate(&self.nodes[node]))
            .collect()
    }
}
