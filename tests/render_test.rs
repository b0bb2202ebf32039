//! Tests for terminal rendering

mod common;

use alloctree::cli::render::{format_amount, format_variance, node_line, render_tree};
use alloctree::config::DisplaySettings;
use alloctree::domain::{apply_edit, Edit, Variance};
use common::{sales_tree, zero_weight_tree};

fn plain() -> DisplaySettings {
    DisplaySettings {
        color: false,
        ..DisplaySettings::default()
    }
}

#[test]
fn given_fresh_tree_when_rendering_then_lists_every_node_and_grand_total() {
    let out = render_tree(&sales_tree(), &plain());

    assert!(out.contains("Electronics [electronics]  1500  (baseline 1500)  0.00%"));
    assert!(out.contains("Phones [phones]  800  (baseline 800)  0.00%"));
    assert!(out.contains("Chairs [chairs]  700  (baseline 700)  0.00%"));
    assert!(out.ends_with("Grand total: 2500\n"), "{}", out);
}

#[test]
fn given_edited_tree_when_rendering_then_shows_values_and_variances() {
    let tree = apply_edit(&sales_tree(), "electronics", Edit::Percent(10.0));

    let out = render_tree(&tree, &plain());

    assert!(out.contains("Electronics [electronics]  1650  (baseline 1500)  10.00%"));
    assert!(out.contains("Phones [phones]  880  (baseline 800)  10.00%"));
    assert!(out.contains("Grand total: 2650"));
}

#[test]
fn given_nested_tree_when_rendering_then_children_follow_their_parent() {
    let out = render_tree(&sales_tree(), &plain());

    let electronics = out.find("Electronics").expect("electronics");
    let phones = out.find("Phones").expect("phones");
    let furniture = out.find("Furniture").expect("furniture");
    assert!(electronics < phones && phones < furniture);
}

#[test]
fn given_ids_and_baseline_hidden_when_rendering_line_then_only_label_value_variance() {
    let display = DisplaySettings {
        show_ids: false,
        show_baseline: false,
        color: false,
    };
    let tree = sales_tree();
    let phones = tree.find("phones").expect("phones");

    assert_eq!(node_line(phones, &display), "Phones  800  0.00%");
}

#[test]
fn given_zero_baseline_when_rendering_line_then_variance_is_zero_percent() {
    let tree = apply_edit(&zero_weight_tree(), "a", Edit::Value(5.0));
    let a = tree.find("a").expect("a");

    assert_eq!(node_line(a, &plain()), "A [a]  5  (baseline 0)  0%");
}

#[test]
fn given_color_disabled_when_formatting_variance_then_plain_text() {
    assert_eq!(format_variance(Variance::Percent(-12.5), false), "-12.50%");
    assert_eq!(format_variance(Variance::ZeroBaseline, false), "0%");
}

#[test]
fn given_amounts_when_formatting_then_shortest_form() {
    assert_eq!(format_amount(1650.0), "1650");
    assert_eq!(format_amount(880.1234), "880.1234");
    assert_eq!(format_amount(-0.5), "-0.5");
}
