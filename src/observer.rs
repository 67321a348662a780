//! Intersection observer model.
//!
//! An observer watches a set of elements and reports an entry whenever an
//! element's "intersecting" state flips, including the first evaluation after
//! it is observed. An element counts as intersecting when its visible fraction
//! reaches the observer's threshold.

use slotmap::new_key_type;

use crate::dom::{Dom, NodeId};
use crate::geometry::Region;

new_key_type! {
    /// Identifies an observer registered with the page.
    pub struct ObserverId;
}

/// One record delivered to an observer callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Fraction of `layout` inside `visible`, both in document coordinates.
///
/// Zero-area boxes count as fully visible when their origin is inside.
pub fn intersection_ratio(layout: Region, visible: Region) -> f64 {
    if layout.area() == 0 {
        return if visible.contains(layout.x, layout.y) { 1.0 } else { 0.0 };
    }
    match layout.intersection(visible) {
        Some(overlap) => overlap.area() as f64 / layout.area() as f64,
        None => 0.0,
    }
}

#[derive(Debug, Clone)]
struct Observed {
    node: NodeId,
    last: Option<bool>,
}

/// A thresholded observer over a list of elements.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    threshold: f64,
    targets: Vec<Observed>,
}

impl IntersectionObserver {
    /// Create an observer reporting at `threshold` (0.0 ..= 1.0).
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            targets: Vec::new(),
        }
    }

    /// Start watching `node`. Observing twice is a no-op.
    pub fn observe(&mut self, node: NodeId) {
        if !self.is_observing(node) {
            self.targets.push(Observed { node, last: None });
        }
    }

    /// Stop watching `node`. Returns `false` if it wasn't observed.
    pub fn unobserve(&mut self, node: NodeId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|t| t.node != node);
        self.targets.len() != before
    }

    /// Whether `node` is currently observed.
    pub fn is_observing(&self, node: NodeId) -> bool {
        self.targets.iter().any(|t| t.node == node)
    }

    /// Number of observed elements.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether nothing is observed.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn is_intersecting(&self, ratio: f64) -> bool {
        if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        }
    }

    /// Evaluate every target against `visible` and return the entries whose
    /// state changed since the last call. Targets removed from the DOM are
    /// dropped silently.
    pub fn take_records(&mut self, dom: &Dom, visible: Region) -> Vec<IntersectionEntry> {
        self.targets.retain(|t| dom.contains(t.node));

        let mut records = Vec::new();
        for i in 0..self.targets.len() {
            let node = self.targets[i].node;
            let Some(data) = dom.get(node) else { continue };
            let ratio = intersection_ratio(data.layout, visible);
            let is_intersecting = self.is_intersecting(ratio);
            let target = &mut self.targets[i];
            if target.last != Some(is_intersecting) {
                target.last = Some(is_intersecting);
                records.push(IntersectionEntry { target: node, is_intersecting, ratio });
            }
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeData;

    const VIEW: Region = Region { x: 0, y: 0, width: 1000, height: 800 };

    fn dom_with(layouts: &[Region]) -> (Dom, Vec<NodeId>) {
        let mut dom = Dom::new();
        let body = dom.insert(NodeData::new("body"));
        let ids = layouts
            .iter()
            .map(|&l| dom.append_child(body, NodeData::new("div").with_layout(l)).unwrap())
            .collect();
        (dom, ids)
    }

    #[test]
    fn ratio_partial_overlap() {
        let ratio = intersection_ratio(Region::new(0, 700, 100, 200), VIEW);
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ratio_outside_and_zero_area() {
        assert_eq!(intersection_ratio(Region::new(0, 900, 100, 100), VIEW), 0.0);
        assert_eq!(intersection_ratio(Region::new(10, 10, 0, 0), VIEW), 1.0);
        assert_eq!(intersection_ratio(Region::new(10, 900, 0, 0), VIEW), 0.0);
    }

    #[test]
    fn first_evaluation_reports_every_target() {
        let (dom, ids) = dom_with(&[Region::new(0, 100, 100, 100), Region::new(0, 2000, 100, 100)]);
        let mut obs = IntersectionObserver::new(0.2);
        ids.iter().for_each(|&id| obs.observe(id));

        let records = obs.take_records(&dom, VIEW);
        assert_eq!(records.len(), 2);
        assert!(records[0].is_intersecting);
        assert!(!records[1].is_intersecting);
    }

    #[test]
    fn unchanged_state_reports_nothing() {
        let (dom, ids) = dom_with(&[Region::new(0, 100, 100, 100)]);
        let mut obs = IntersectionObserver::new(0.2);
        obs.observe(ids[0]);
        obs.take_records(&dom, VIEW);
        assert!(obs.take_records(&dom, VIEW).is_empty());
    }

    #[test]
    fn threshold_crossing_reports() {
        // 10% visible at first, fully visible after scrolling.
        let (dom, ids) = dom_with(&[Region::new(0, 780, 100, 200)]);
        let mut obs = IntersectionObserver::new(0.2);
        obs.observe(ids[0]);
        let first = obs.take_records(&dom, VIEW);
        assert!(!first[0].is_intersecting);

        let scrolled = Region::new(0, 400, 1000, 800);
        let second = obs.take_records(&dom, scrolled);
        assert_eq!(second.len(), 1);
        assert!(second[0].is_intersecting);
        assert_eq!(second[0].ratio, 1.0);
    }

    #[test]
    fn observe_is_idempotent_and_unobserve_reports() {
        let (_, ids) = dom_with(&[Region::new(0, 0, 10, 10)]);
        let mut obs = IntersectionObserver::new(0.0);
        obs.observe(ids[0]);
        obs.observe(ids[0]);
        assert_eq!(obs.len(), 1);
        assert!(obs.unobserve(ids[0]));
        assert!(!obs.unobserve(ids[0]));
        assert!(obs.is_empty());
    }

    #[test]
    fn removed_nodes_are_dropped() {
        let (mut dom, ids) = dom_with(&[Region::new(0, 0, 10, 10)]);
        let mut obs = IntersectionObserver::new(0.2);
        obs.observe(ids[0]);
        dom.remove(ids[0]);
        assert!(obs.take_records(&dom, VIEW).is_empty());
        assert!(obs.is_empty());
    }
}
