//! Interactive editing session
//!
//! A session owns the current tree and replaces it after every successful
//! edit. Commands are processed one at a time, so an edit always completes
//! (target update, distribution, aggregation) before the next one starts.

use tracing::debug;

use crate::application::services::{AllocationService, EditOutcome};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{AllocationTree, EditMode, Inconsistency, Variance};

pub const HELP: &str = "\
commands:
  percent <id> <amount>   change a line item by <amount> percent
  value <id> <amount>     set a line item to <amount>
  variance <id>           show deviation from baseline
  show                    print the tree
  total                   print the grand total
  check                   list parents that do not match their children
  help                    show this text
  quit                    leave the session";

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Edit {
        mode: EditMode,
        id: String,
        magnitude: String,
    },
    Variance {
        id: String,
    },
    Show,
    Total,
    Check,
    Help,
    Quit,
    Empty,
}

impl SessionCommand {
    pub fn parse(line: &str) -> ApplicationResult<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(SessionCommand::Empty);
        };

        match verb.to_ascii_lowercase().as_str() {
            "percent" | "%" | "value" | "=" => {
                let mode: EditMode = verb.parse()?;
                let id = words.next().ok_or_else(|| {
                    ApplicationError::Usage(format!("{} <id> <amount>", mode))
                })?;
                let magnitude = words.collect::<Vec<_>>().join(" ");
                Ok(SessionCommand::Edit {
                    mode,
                    id: id.to_string(),
                    magnitude,
                })
            }
            "variance" => {
                let id = words
                    .next()
                    .ok_or_else(|| ApplicationError::Usage("variance <id>".to_string()))?;
                Ok(SessionCommand::Variance { id: id.to_string() })
            }
            "show" | "ls" => Ok(SessionCommand::Show),
            "total" => Ok(SessionCommand::Total),
            "check" => Ok(SessionCommand::Check),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(ApplicationError::UnknownCommand(other.to_string())),
        }
    }
}

/// What the caller should tell the user after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionReply {
    Updated { id: String },
    NotFound { id: String },
    Variance { id: String, label: String, variance: Variance },
    Show,
    Total(f64),
    Inconsistencies(Vec<Inconsistency>),
    Help,
    Quit,
    Nothing,
}

/// Caller-owned editing state: the current tree plus the service that edits it.
pub struct Session {
    service: AllocationService,
    tree: AllocationTree,
    edits: usize,
}

impl Session {
    pub fn new(service: AllocationService, tree: AllocationTree) -> Self {
        Self {
            service,
            tree,
            edits: 0,
        }
    }

    pub fn tree(&self) -> &AllocationTree {
        &self.tree
    }

    /// Number of edits that changed the tree.
    pub fn edits(&self) -> usize {
        self.edits
    }

    /// Parse and run one line. On error the tree is left untouched.
    pub fn execute(&mut self, line: &str) -> ApplicationResult<SessionReply> {
        let command = SessionCommand::parse(line)?;
        debug!(?command, "session command");
        self.run(command)
    }

    pub fn run(&mut self, command: SessionCommand) -> ApplicationResult<SessionReply> {
        match command {
            SessionCommand::Edit {
                mode,
                id,
                magnitude,
            } => match self.service.edit(&self.tree, &id, mode, &magnitude)? {
                EditOutcome::Applied { tree, .. } => {
                    self.tree = tree;
                    self.edits += 1;
                    Ok(SessionReply::Updated { id })
                }
                EditOutcome::NotFound { .. } => Ok(SessionReply::NotFound { id }),
            },
            SessionCommand::Variance { id } => Ok(match self.tree.find(&id) {
                Some(node) => SessionReply::Variance {
                    label: node.label().to_string(),
                    variance: node.variance(),
                    id,
                },
                None => SessionReply::NotFound { id },
            }),
            SessionCommand::Show => Ok(SessionReply::Show),
            SessionCommand::Total => Ok(SessionReply::Total(self.tree.grand_total())),
            SessionCommand::Check => Ok(SessionReply::Inconsistencies(self.tree.inconsistencies())),
            SessionCommand::Help => Ok(SessionReply::Help),
            SessionCommand::Quit => Ok(SessionReply::Quit),
            SessionCommand::Empty => Ok(SessionReply::Nothing),
        }
    }
}
