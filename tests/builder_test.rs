//! Tests for the tree builder

use alloctree::domain::{DomainError, NodeSpec, TreeBuilder};
use rstest::rstest;

fn electronics(value: Option<f64>) -> NodeSpec {
    let mut spec = NodeSpec::branch(
        "electronics",
        "Electronics",
        vec![
            NodeSpec::leaf("phones", "Phones", 800.0),
            NodeSpec::leaf("laptops", "Laptops", 700.0),
        ],
    );
    spec.value = value;
    spec
}

#[test]
fn given_branch_without_value_when_building_then_value_is_children_sum() {
    let tree = TreeBuilder::new().build(&[electronics(None)]).expect("build");

    let node = tree.find("electronics").expect("electronics");
    assert_eq!(node.value(), 1500.0);
    assert_eq!(node.baseline(), 1500.0);
}

#[test]
fn given_branch_with_matching_value_when_building_then_accepted() {
    let tree = TreeBuilder::new()
        .build(&[electronics(Some(1500.0))])
        .expect("build");

    assert_eq!(tree.grand_total(), 1500.0);
    assert!(tree.inconsistencies().is_empty());
}

#[test]
fn given_branch_with_mismatching_value_when_building_then_rejected() {
    let result = TreeBuilder::new().build(&[electronics(Some(1400.0))]);

    assert_eq!(
        result,
        Err(DomainError::InconsistentValue {
            id: "electronics".to_string(),
            declared: 1400.0,
            children_sum: 1500.0,
        })
    );
}

#[test]
fn given_leaves_when_building_then_baseline_equals_value() {
    let tree = TreeBuilder::new().build(&[electronics(None)]).expect("build");

    for (_, node) in tree.iter() {
        assert_eq!(node.value(), node.baseline(), "{}", node.id());
    }
}

#[test]
fn given_duplicate_id_across_roots_when_building_then_rejected() {
    let specs = [
        electronics(None),
        NodeSpec::branch("furniture", "Furniture", vec![NodeSpec::leaf("phones", "Phones", 1.0)]),
    ];

    let result = TreeBuilder::new().build(&specs);

    assert_eq!(result, Err(DomainError::DuplicateId("phones".to_string())));
}

#[rstest]
#[case("")]
#[case("  ")]
fn given_blank_id_when_building_then_rejected(#[case] id: &str) {
    let result = TreeBuilder::new().build(&[NodeSpec::leaf(id, "Nameless", 1.0)]);

    assert_eq!(
        result,
        Err(DomainError::EmptyId {
            label: "Nameless".to_string()
        })
    );
}

#[test]
fn given_leaf_without_value_when_building_then_rejected() {
    let spec = NodeSpec {
        id: "phones".to_string(),
        label: "Phones".to_string(),
        value: None,
        children: Vec::new(),
    };

    let result = TreeBuilder::new().build(&[spec]);

    assert_eq!(
        result,
        Err(DomainError::MissingValue {
            id: "phones".to_string()
        })
    );
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn given_non_finite_value_when_building_then_rejected(#[case] value: f64) {
    let result = TreeBuilder::new().build(&[NodeSpec::leaf("x", "X", value)]);

    assert!(matches!(result, Err(DomainError::InvalidValue { .. })));
}

#[test]
fn given_builder_when_reused_then_ids_from_previous_build_are_forgotten() {
    let mut builder = TreeBuilder::new();
    builder.build(&[electronics(None)]).expect("first build");

    let second = builder.build(&[electronics(None)]);

    assert!(second.is_ok());
}

#[test]
fn given_no_specs_when_building_then_empty_forest() {
    let tree = TreeBuilder::new().build(&[]).expect("build");

    assert!(tree.is_empty());
    assert_eq!(tree.grand_total(), 0.0);
}

#[test]
fn given_nested_specs_when_building_then_preserves_order_and_depth() {
    let spec = NodeSpec::branch(
        "company",
        "Company",
        vec![electronics(None), NodeSpec::leaf("misc", "Misc", 5.0)],
    );

    let tree = TreeBuilder::new().build(&[spec]).expect("build");

    let ids: Vec<_> = tree.iter().map(|(level, node)| (level, node.id())).collect();
    assert_eq!(
        ids,
        vec![
            (0, "company"),
            (1, "electronics"),
            (2, "phones"),
            (2, "laptops"),
            (1, "misc"),
        ]
    );
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.find("company").map(|n| n.value()), Some(1505.0));
}
