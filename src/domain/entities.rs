//! Domain entities: allocation line items and the forest that holds them

use std::collections::HashSet;
use std::sync::Arc;

use tracing::instrument;

use crate::domain::aggregate::{children_total, find_inconsistencies, Inconsistency};
use crate::domain::error::DomainError;
use crate::domain::variance::{variance, Variance};

/// A labeled line item in the allocation hierarchy.
///
/// `baseline` is captured when the node is created and never changes; edits
/// only ever produce copies with a different `value`. Children are shared
/// behind `Arc` so an edit can reuse every subtree it does not touch.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    label: String,
    value: f64,
    baseline: f64,
    children: Vec<Arc<Node>>,
}

impl Node {
    /// Create a leaf whose baseline equals its initial value.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            baseline: value,
            children: Vec::new(),
        }
    }

    /// Create an interior node whose value (and baseline) is the sum of its children.
    pub fn branch(id: impl Into<String>, label: impl Into<String>, children: Vec<Node>) -> Self {
        let children: Vec<Arc<Node>> = children.into_iter().map(Arc::new).collect();
        let value = children_total(&children);
        Self::from_parts(id.into(), label.into(), value, children)
    }

    /// Assemble a node at construction time: baseline is set to `value`.
    pub(crate) fn from_parts(
        id: String,
        label: String,
        value: f64,
        children: Vec<Arc<Node>>,
    ) -> Self {
        Self {
            id,
            label,
            value,
            baseline: value,
            children,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn baseline(&self) -> f64 {
        self.baseline
    }

    pub fn children(&self) -> &[Arc<Node>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Percentage deviation of the current value from the baseline.
    pub fn variance(&self) -> Variance {
        variance(self.value, self.baseline)
    }

    /// Copy of this node carrying a new value; children are shared.
    pub(crate) fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Copy of this node with a fresh children sequence and a new value.
    pub(crate) fn with_children(&self, children: Vec<Arc<Node>>, value: f64) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            value,
            baseline: self.baseline,
            children,
        }
    }

    /// Consume the node and replace its value.
    pub(crate) fn revalued(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }
}

/// An ordered forest of allocation line items.
///
/// The tree is a plain value owned by the caller: every edit returns a new
/// `AllocationTree` and the caller reassigns it. Cloning is cheap because the
/// roots are reference counted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocationTree {
    roots: Vec<Arc<Node>>,
}

impl AllocationTree {
    /// Wrap prebuilt nodes, rejecting empty or duplicate ids anywhere in the forest.
    pub fn new(roots: Vec<Node>) -> Result<Self, DomainError> {
        let tree = Self::from_shared(roots.into_iter().map(Arc::new).collect());
        let mut seen = HashSet::new();
        for (_, node) in tree.iter() {
            if node.id.trim().is_empty() {
                return Err(DomainError::EmptyId {
                    label: node.label.clone(),
                });
            }
            if !seen.insert(node.id.as_str()) {
                return Err(DomainError::DuplicateId(node.id.clone()));
            }
        }
        Ok(tree)
    }

    pub(crate) fn from_shared(roots: Vec<Arc<Node>>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Sum of all root values.
    pub fn grand_total(&self) -> f64 {
        children_total(&self.roots)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.iter().map(|(_, node)| node).find(|node| node.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Preorder traversal yielding `(level, node)`, roots at level 0.
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    /// Number of levels in the deepest branch; 0 for an empty forest.
    pub fn depth(&self) -> usize {
        self.roots.iter().map(|root| root.depth()).max().unwrap_or(0)
    }

    /// Ids of every leaf, left to right.
    pub fn leaf_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.id.as_str())
            .collect()
    }

    /// Interior nodes whose value no longer matches the sum of their children.
    pub fn inconsistencies(&self) -> Vec<Inconsistency> {
        find_inconsistencies(self)
    }

    /// Replace the subtree rooted at `id` with `transform(node)`.
    ///
    /// Every strict ancestor of the target is rebuilt with a fresh children
    /// sequence and handed to `rebuild_ancestor`, nearest ancestor first.
    /// Subtrees off that path are shared with `self`. Returns `None` when no
    /// node carries `id`.
    pub fn transform_subtree<F, A>(
        &self,
        id: &str,
        transform: F,
        mut rebuild_ancestor: A,
    ) -> Option<Self>
    where
        F: FnOnce(&Node) -> Node,
        A: FnMut(Node) -> Node,
    {
        let mut transform = Some(transform);
        for (pos, root) in self.roots.iter().enumerate() {
            if let Some(rebuilt) = rewrite_path(root, id, &mut transform, &mut rebuild_ancestor) {
                let mut roots = self.roots.clone();
                roots[pos] = Arc::new(rebuilt);
                return Some(Self { roots });
            }
        }
        None
    }
}

fn rewrite_path<F, A>(
    node: &Node,
    id: &str,
    transform: &mut Option<F>,
    rebuild_ancestor: &mut A,
) -> Option<Node>
where
    F: FnOnce(&Node) -> Node,
    A: FnMut(Node) -> Node,
{
    if node.id == id {
        return transform.take().map(|f| f(node));
    }
    for (pos, child) in node.children.iter().enumerate() {
        if let Some(rebuilt) = rewrite_path(child, id, transform, rebuild_ancestor) {
            let mut children = node.children.clone();
            children[pos] = Arc::new(rebuilt);
            return Some(rebuild_ancestor(node.with_children(children, node.value)));
        }
    }
    None
}

pub struct NodeIter<'a> {
    stack: Vec<(usize, &'a Node)>,
}

impl<'a> NodeIter<'a> {
    fn new(tree: &'a AllocationTree) -> Self {
        // Push roots in reverse order for left-to-right traversal
        let stack = tree
            .roots
            .iter()
            .rev()
            .map(|root| (0, root.as_ref()))
            .collect();
        Self { stack }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (level, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((level + 1, child.as_ref()));
        }
        Some((level, node))
    }
}
