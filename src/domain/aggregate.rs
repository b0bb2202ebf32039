//! Aggregation engine: pull child totals up into their parents

use std::sync::Arc;

use crate::domain::entities::{AllocationTree, Node};
use crate::domain::rounding::sum_tolerance;

/// Interior node whose value disagrees with the sum of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct Inconsistency {
    pub id: String,
    pub value: f64,
    pub children_sum: f64,
}

impl Inconsistency {
    pub fn drift(&self) -> f64 {
        self.value - self.children_sum
    }
}

pub fn children_total(children: &[Arc<Node>]) -> f64 {
    children.iter().map(|child| child.value()).sum()
}

/// Reset an interior node's value to the sum of its immediate children.
/// Leaves come back unchanged.
pub fn aggregate(node: Node) -> Node {
    if node.is_leaf() {
        return node;
    }
    let total = children_total(node.children());
    node.revalued(total)
}

/// Scan the whole forest for interior nodes that break the sum invariant.
///
/// Per-child rounding may drift a parent by up to one rounding step per child;
/// anything beyond that is reported. After an edit this only happens when a
/// nonzero total was pushed into children that all weigh zero.
pub fn find_inconsistencies(tree: &AllocationTree) -> Vec<Inconsistency> {
    tree.iter()
        .map(|(_, node)| node)
        .filter(|node| !node.is_leaf())
        .filter_map(|node| {
            let children_sum = children_total(node.children());
            let allowed = sum_tolerance(node.value(), node.children().len());
            ((node.value() - children_sum).abs() > allowed).then(|| Inconsistency {
                id: node.id().to_string(),
                value: node.value(),
                children_sum,
            })
        })
        .collect()
}
