//! Domain layer: allocation tree model and the propagation engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod aggregate;
pub mod builder;
pub mod dispatch;
pub mod distribute;
pub mod edit;
pub mod entities;
pub mod error;
pub mod rounding;
pub mod variance;

pub use aggregate::{aggregate, children_total, find_inconsistencies, Inconsistency};
pub use builder::{NodeSpec, TreeBuilder, TreeResult};
pub use dispatch::{apply_edit, apply_to_target, try_apply_edit};
pub use distribute::{distribute, reallocate};
pub use edit::{Edit, EditMode};
pub use entities::{AllocationTree, Node, NodeIter};
pub use error::DomainError;
pub use variance::{variance, Variance};
