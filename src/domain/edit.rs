//! Edit instructions and boundary validation of user-entered magnitudes

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::rounding::{round_to, VALUE_PRECISION};

/// How a magnitude is applied to the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Relative change in percent of the current value
    Percent,
    /// Absolute replacement of the current value
    Value,
}

/// A validated edit, ready for the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    Percent(f64),
    Value(f64),
}

impl EditMode {
    /// Validate raw user input and turn it into an [`Edit`].
    ///
    /// Empty input and anything that is not a finite number are rejected
    /// here, before any tree is touched.
    pub fn parse(self, raw: &str) -> Result<Edit, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InputRequired { mode: self });
        }
        let magnitude = trimmed
            .parse::<f64>()
            .ok()
            .filter(|m| m.is_finite())
            .ok_or_else(|| DomainError::NotANumber {
                mode: self,
                input: trimmed.to_string(),
            })?;
        Ok(self.with_magnitude(magnitude))
    }

    pub fn with_magnitude(self, magnitude: f64) -> Edit {
        match self {
            EditMode::Percent => Edit::Percent(magnitude),
            EditMode::Value => Edit::Value(magnitude),
        }
    }

    /// What the user is asked for when the magnitude is missing.
    pub fn prompt(self) -> &'static str {
        match self {
            EditMode::Percent => "enter a percentage before applying Allocation %",
            EditMode::Value => "enter an amount before applying Allocation Value",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditMode::Percent => write!(f, "percent"),
            EditMode::Value => write!(f, "value"),
        }
    }
}

impl FromStr for EditMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "%" => Ok(EditMode::Percent),
            "value" | "=" => Ok(EditMode::Value),
            other => Err(DomainError::UnknownMode(other.to_string())),
        }
    }
}

impl Edit {
    pub fn mode(&self) -> EditMode {
        match self {
            Edit::Percent(_) => EditMode::Percent,
            Edit::Value(_) => EditMode::Value,
        }
    }

    pub fn magnitude(&self) -> f64 {
        match self {
            Edit::Percent(m) | Edit::Value(m) => *m,
        }
    }

    /// The value the target node ends up with, given its current value.
    pub fn target_total(&self, current: f64) -> f64 {
        match self {
            Edit::Percent(p) => round_to(current + current * p / 100.0, VALUE_PRECISION),
            Edit::Value(v) => *v,
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Percent(p) => write!(f, "{:+}%", p),
            Edit::Value(v) => write!(f, "= {}", v),
        }
    }
}
