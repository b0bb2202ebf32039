//! Tree rendering for the terminal

use colored::Colorize;
use termtree::Tree;

use crate::config::DisplaySettings;
use crate::domain::{AllocationTree, Node, Variance};

/// Render every root as a termtree, followed by the grand total.
pub fn render_tree(tree: &AllocationTree, display: &DisplaySettings) -> String {
    let mut out = String::new();
    for root in tree.roots() {
        out.push_str(&to_termtree(root, display).to_string());
    }
    out.push_str(&format!(
        "Grand total: {}\n",
        format_amount(tree.grand_total())
    ));
    out
}

/// One node and its descendants as a `termtree::Tree`.
pub fn to_termtree(node: &Node, display: &DisplaySettings) -> Tree<String> {
    let leaves: Vec<_> = node
        .children()
        .iter()
        .map(|child| to_termtree(child, display))
        .collect();
    Tree::new(node_line(node, display)).with_leaves(leaves)
}

/// `Label [id]  value  (baseline b)  variance`
pub fn node_line(node: &Node, display: &DisplaySettings) -> String {
    let mut line = node.label().to_string();
    if display.show_ids {
        line.push_str(&format!(" [{}]", node.id()));
    }
    line.push_str(&format!("  {}", format_amount(node.value())));
    if display.show_baseline {
        line.push_str(&format!("  (baseline {})", format_amount(node.baseline())));
    }
    line.push_str(&format!("  {}", format_variance(node.variance(), display.color)));
    line
}

pub fn format_variance(variance: Variance, color: bool) -> String {
    let text = variance.to_string();
    if !color {
        return text;
    }
    let pct = variance.percent();
    if pct > 0.0 {
        text.green().to_string()
    } else if pct < 0.0 {
        text.red().to_string()
    } else {
        text.dimmed().to_string()
    }
}

/// Shortest round-trip form: `1650`, `880.1234`.
pub fn format_amount(value: f64) -> String {
    format!("{}", value)
}
