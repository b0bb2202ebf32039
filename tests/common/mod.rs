//! Shared fixtures for integration tests

#![allow(dead_code)]

use alloctree::domain::{AllocationTree, Node};

pub const EPS: f64 = 1e-9;

/// Electronics (Phones 800, Laptops 700) and Furniture (Tables 300, Chairs 700).
pub fn sales_tree() -> AllocationTree {
    AllocationTree::new(vec![
        Node::branch(
            "electronics",
            "Electronics",
            vec![
                Node::leaf("phones", "Phones", 800.0),
                Node::leaf("laptops", "Laptops", 700.0),
            ],
        ),
        Node::branch(
            "furniture",
            "Furniture",
            vec![
                Node::leaf("tables", "Tables", 300.0),
                Node::leaf("chairs", "Chairs", 700.0),
            ],
        ),
    ])
    .expect("valid tree")
}

/// Three levels: company -> sales (north 600, south 400), ops (it 250, hr 750).
pub fn company_tree() -> AllocationTree {
    AllocationTree::new(vec![Node::branch(
        "company",
        "Company",
        vec![
            Node::branch(
                "sales",
                "Sales",
                vec![
                    Node::leaf("north", "North", 600.0),
                    Node::leaf("south", "South", 400.0),
                ],
            ),
            Node::branch(
                "ops",
                "Operations",
                vec![
                    Node::leaf("it", "IT", 250.0),
                    Node::leaf("hr", "HR", 750.0),
                ],
            ),
        ],
    )])
    .expect("valid tree")
}

/// A parent whose children both weigh zero.
pub fn zero_weight_tree() -> AllocationTree {
    AllocationTree::new(vec![Node::branch(
        "pool",
        "Pool",
        vec![Node::leaf("a", "A", 0.0), Node::leaf("b", "B", 0.0)],
    )])
    .expect("valid tree")
}

pub fn value_of(tree: &AllocationTree, id: &str) -> f64 {
    tree.find(id)
        .unwrap_or_else(|| panic!("node {} not in tree", id))
        .value()
}

/// Every interior node equals the sum of its children within `tolerance`.
pub fn assert_sums_consistent(tree: &AllocationTree, tolerance: f64) {
    for (_, node) in tree.iter() {
        if node.is_leaf() {
            continue;
        }
        let sum: f64 = node.children().iter().map(|c| c.value()).sum();
        assert!(
            (node.value() - sum).abs() <= tolerance,
            "{}: value {} but children sum to {}",
            node.id(),
            node.value(),
            sum
        );
    }
}
