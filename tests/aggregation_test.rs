//! Tests for the aggregation engine

mod common;

use std::sync::Arc;

use alloctree::domain::{aggregate, apply_edit, children_total, Edit, Node};
use common::{sales_tree, zero_weight_tree, EPS};

#[test]
fn given_leaf_when_aggregating_then_unchanged() {
    let leaf = Node::leaf("phones", "Phones", 800.0);

    assert_eq!(aggregate(leaf.clone()), leaf);
}

#[test]
fn given_stale_parent_when_aggregating_then_value_is_children_sum() {
    // A distribution into zero weights leaves the parent out of step
    let stale = apply_edit(&zero_weight_tree(), "pool", Edit::Value(500.0));
    let pool = stale.find("pool").expect("pool").clone();
    assert_eq!(pool.value(), 500.0);

    let result = aggregate(pool);

    assert_eq!(result.value(), 0.0);
    assert_eq!(result.baseline(), 0.0, "baseline is never touched");
}

#[test]
fn given_children_when_totalling_then_sums_values() {
    let children: Vec<Arc<Node>> = vec![
        Arc::new(Node::leaf("a", "A", 1.5)),
        Arc::new(Node::leaf("b", "B", 2.25)),
    ];

    assert!((children_total(&children) - 3.75).abs() < EPS);
    assert_eq!(children_total(&[]), 0.0);
}

#[test]
fn given_consistent_tree_when_checking_then_reports_nothing() {
    assert!(sales_tree().inconsistencies().is_empty());
}

#[test]
fn given_zero_weight_distribution_when_checking_then_reports_parent() {
    let tree = apply_edit(&zero_weight_tree(), "pool", Edit::Value(500.0));

    let issues = tree.inconsistencies();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "pool");
    assert_eq!(issues[0].value, 500.0);
    assert_eq!(issues[0].children_sum, 0.0);
    assert_eq!(issues[0].drift(), 500.0);
}

#[test]
fn given_rounding_drift_within_tolerance_when_checking_then_reports_nothing() {
    let tree = alloctree::domain::AllocationTree::new(vec![Node::branch(
        "root",
        "Root",
        vec![
            Node::leaf("a", "A", 1.0),
            Node::leaf("b", "B", 1.0),
            Node::leaf("c", "C", 1.0),
        ],
    )])
    .expect("valid tree");

    let updated = apply_edit(&tree, "root", Edit::Value(100.0));

    assert_eq!(updated.find("root").map(|n| n.value()), Some(100.0));
    assert!(updated.inconsistencies().is_empty());
}
