//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::edit::EditMode;

/// Domain errors represent rejected input and malformed trees.
/// A missing edit target is not an error: the tree is returned unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("input required: {}", .mode.prompt())]
    InputRequired { mode: EditMode },

    #[error("not a number: '{input}' ({mode} edit)")]
    NotANumber { mode: EditMode, input: String },

    #[error("unknown edit mode: {0} (expected 'percent' or 'value')")]
    UnknownMode(String),

    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    #[error("node id must not be empty (label: {label})")]
    EmptyId { label: String },

    #[error("leaf {id} has no value")]
    MissingValue { id: String },

    #[error("invalid value for {id}: {value}")]
    InvalidValue { id: String, value: f64 },

    #[error("declared value {declared} of {id} does not match its children's sum {children_sum}")]
    InconsistentValue {
        id: String,
        declared: f64,
        children_sum: f64,
    },
}

impl DomainError {
    /// True for rejected user input, as opposed to a malformed tree.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DomainError::InputRequired { .. }
                | DomainError::NotANumber { .. }
                | DomainError::UnknownMode(_)
        )
    }
}
