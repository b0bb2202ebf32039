//! Tests for the variance calculator

mod common;

use alloctree::domain::{variance, Variance};
use rstest::rstest;

#[rstest]
#[case(1650.0, 1500.0, "10.00%")]
#[case(950.0, 800.0, "18.75%")]
#[case(700.0, 800.0, "-12.50%")]
#[case(0.0, 300.0, "-100.00%")]
#[case(1000.0, 3.0, "33233.33%")]
#[case(100.0, 300.0, "-66.67%")]
fn given_nonzero_baseline_when_computing_variance_then_rounds_to_two_decimals(
    #[case] value: f64,
    #[case] baseline: f64,
    #[case] expected: &str,
) {
    assert_eq!(variance(value, baseline).to_string(), expected);
}

#[rstest]
#[case(0.0)]
#[case(500.0)]
#[case(-20.0)]
fn given_zero_baseline_when_computing_variance_then_reports_zero(#[case] value: f64) {
    let result = variance(value, 0.0);

    assert_eq!(result, Variance::ZeroBaseline);
    assert!(result.is_zero());
    assert_eq!(result.to_string(), "0%");
}

#[test]
fn given_value_equal_to_baseline_when_computing_variance_then_is_zero_for_every_node() {
    let tree = common::sales_tree();

    for (_, node) in tree.iter() {
        let v = node.variance();
        assert!(v.is_zero(), "{} should have no variance", node.id());
        assert_eq!(v.to_string(), "0.00%");
    }
}

#[test]
fn given_tiny_negative_deviation_when_rounded_then_no_negative_zero() {
    assert_eq!(variance(99.99999, 100.0).to_string(), "0.00%");
}
