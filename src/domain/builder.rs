//! Tree builder: turns a declarative node specification into an allocation tree.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::aggregate::children_total;
use crate::domain::entities::{AllocationTree, Node};
use crate::domain::error::DomainError;
use crate::domain::rounding::sum_tolerance;

/// Result type for tree construction.
pub type TreeResult<T> = Result<T, DomainError>;

/// Declarative description of one line item and its children.
///
/// Interior items may omit `value`; it is then the sum of the children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn branch(id: impl Into<String>, label: impl Into<String>, children: Vec<NodeSpec>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: None,
            children,
        }
    }
}

/// Constructs allocation trees, capturing every node's baseline.
///
/// Rejects empty and duplicate ids, leaves without a value, non-finite
/// values, and interior values that disagree with their children.
pub struct TreeBuilder {
    seen_ids: HashSet<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            seen_ids: HashSet::new(),
        }
    }

    /// Build a forest with one root per spec, in order.
    #[instrument(level = "debug", skip_all, fields(roots = specs.len()))]
    pub fn build(&mut self, specs: &[NodeSpec]) -> TreeResult<AllocationTree> {
        // Reset state for a fresh build
        self.seen_ids.clear();

        let roots = specs
            .iter()
            .map(|spec| self.build_node(spec).map(Arc::new))
            .collect::<TreeResult<Vec<_>>>()?;

        debug!(nodes = self.seen_ids.len(), "tree built");
        Ok(AllocationTree::from_shared(roots))
    }

    fn build_node(&mut self, spec: &NodeSpec) -> TreeResult<Node> {
        if spec.id.trim().is_empty() {
            return Err(DomainError::EmptyId {
                label: spec.label.clone(),
            });
        }
        if !self.seen_ids.insert(spec.id.clone()) {
            return Err(DomainError::DuplicateId(spec.id.clone()));
        }
        if let Some(value) = spec.value {
            if !value.is_finite() {
                return Err(DomainError::InvalidValue {
                    id: spec.id.clone(),
                    value,
                });
            }
        }

        if spec.children.is_empty() {
            let value = spec.value.ok_or_else(|| DomainError::MissingValue {
                id: spec.id.clone(),
            })?;
            return Ok(Node::leaf(spec.id.clone(), spec.label.clone(), value));
        }

        let children = spec
            .children
            .iter()
            .map(|child| self.build_node(child).map(Arc::new))
            .collect::<TreeResult<Vec<_>>>()?;
        let children_sum = children_total(&children);

        let value = match spec.value {
            Some(declared)
                if (declared - children_sum).abs() > sum_tolerance(declared, children.len()) =>
            {
                return Err(DomainError::InconsistentValue {
                    id: spec.id.clone(),
                    declared,
                    children_sum,
                });
            }
            Some(declared) => declared,
            None => children_sum,
        };

        Ok(Node::from_parts(
            spec.id.clone(),
            spec.label.clone(),
            value,
            children,
        ))
    }
}
