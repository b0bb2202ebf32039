//! Editable hierarchical allocation tree.
//!
//! Editing an interior line item redistributes its new total proportionally
//! down to its leaves; editing a leaf re-sums every ancestor. See
//! [`domain::apply_edit`] for the entry point.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
