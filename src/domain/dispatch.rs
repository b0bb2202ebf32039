//! Update dispatcher: apply one edit to one node, then restore the sum invariant

use tracing::{debug, instrument};

use crate::domain::aggregate::aggregate;
use crate::domain::distribute::reallocate;
use crate::domain::edit::Edit;
use crate::domain::entities::{AllocationTree, Node};

/// Apply `edit` to a single node.
///
/// Leaves take the new total directly. Interior nodes take it and
/// distribute it proportionally down to their leaves.
pub fn apply_to_target(node: &Node, edit: Edit) -> Node {
    let new_total = edit.target_total(node.value());
    debug!(
        id = node.id(),
        leaf = node.is_leaf(),
        old = node.value(),
        new = new_total,
        "apply edit"
    );
    reallocate(node, new_total)
}

/// Apply `edit` to the node with the given `id` and re-aggregate every
/// ancestor bottom-up. Returns `None` if no node has that id.
#[instrument(level = "debug", skip(tree))]
pub fn try_apply_edit(tree: &AllocationTree, id: &str, edit: Edit) -> Option<AllocationTree> {
    tree.transform_subtree(id, |node| apply_to_target(node, edit), aggregate)
}

/// Like [`try_apply_edit`], but an unknown target yields the input tree unchanged.
pub fn apply_edit(tree: &AllocationTree, id: &str, edit: Edit) -> AllocationTree {
    try_apply_edit(tree, id, edit).unwrap_or_else(|| {
        debug!(id, "edit target not found, tree unchanged");
        tree.clone()
    })
}
