//! Distribution engine: push a new total down into a subtree
//!
//! Weights are the children's *current* values, not their baselines, so
//! repeated edits compound. Each child is rounded on its own; the rounded
//! children are not nudged to hit the new total exactly.

use std::sync::Arc;

use tracing::{trace, warn};

use crate::domain::aggregate::children_total;
use crate::domain::entities::Node;
use crate::domain::rounding::{round_to, VALUE_PRECISION};

/// Split `new_total` across `children` in proportion to their current values.
///
/// Children that have children of their own are reallocated recursively with
/// their newly assigned value as the target. When every child weighs zero,
/// every child receives zero whatever `new_total` is.
pub fn distribute(children: &[Arc<Node>], new_total: f64) -> Vec<Arc<Node>> {
    let current_total = children_total(children);
    if current_total == 0.0 && new_total != 0.0 && !children.is_empty() {
        warn!(
            new_total,
            children = children.len(),
            "all children weigh zero, new total cannot be distributed"
        );
    }

    children
        .iter()
        .map(|child| {
            let proportion = if current_total == 0.0 {
                0.0
            } else {
                child.value() / current_total
            };
            let new_value = round_to(new_total * proportion, VALUE_PRECISION);
            trace!(id = child.id(), old = child.value(), new = new_value, "distribute");
            Arc::new(reallocate(child, new_value))
        })
        .collect()
}

/// Give `node` a new total: leaves take it directly, interior nodes also
/// distribute it to their children.
pub fn reallocate(node: &Node, new_total: f64) -> Node {
    if node.is_leaf() {
        node.with_value(new_total)
    } else {
        node.with_children(distribute(node.children(), new_total), new_total)
    }
}
