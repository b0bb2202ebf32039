//! Allocation service
//!
//! Loads allocation trees from seed files and applies user edits to them.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt, SeedFile};
use crate::domain::{try_apply_edit, AllocationTree, Edit, EditMode};
use crate::infrastructure::traits::FileSystem;

/// Result of applying one edit request.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The target was found; `tree` is the updated tree.
    Applied { tree: AllocationTree, edit: Edit },
    /// No node carries the requested id; `tree` is the input tree.
    NotFound { tree: AllocationTree },
}

impl EditOutcome {
    pub fn tree(&self) -> &AllocationTree {
        match self {
            EditOutcome::Applied { tree, .. } | EditOutcome::NotFound { tree } => tree,
        }
    }

    pub fn into_tree(self) -> AllocationTree {
        match self {
            EditOutcome::Applied { tree, .. } | EditOutcome::NotFound { tree } => tree,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

/// Service for loading allocation trees and editing them.
#[derive(Clone)]
pub struct AllocationService {
    fs: Arc<dyn FileSystem>,
}

impl AllocationService {
    /// Create a new allocation service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load the tree from a seed file, or the built-in sample if `seed` is `None`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, seed: Option<&Path>) -> ApplicationResult<AllocationTree> {
        let Some(path) = seed else {
            info!("no seed file configured, using built-in sample");
            return SeedFile::sample().build();
        };

        if !self.fs.is_file(path) {
            return Err(ApplicationError::SeedNotFound(path.to_path_buf()));
        }
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read seed file", path)?;
        let seed_file = SeedFile::parse(&content, &path.display().to_string())?;
        let tree = seed_file.build()?;
        debug!(
            roots = tree.roots().len(),
            depth = tree.depth(),
            "loaded seed {}",
            path.display()
        );
        Ok(tree)
    }

    /// Validate `raw` for `mode` and apply it to node `id`.
    ///
    /// Invalid input is rejected before the tree is touched. An unknown id is
    /// not an error: the outcome carries the unchanged tree.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn edit(
        &self,
        tree: &AllocationTree,
        id: &str,
        mode: EditMode,
        raw: &str,
    ) -> ApplicationResult<EditOutcome> {
        let edit = mode.parse(raw)?;
        Ok(self.apply(tree, id, edit))
    }

    /// Apply an already validated edit.
    pub fn apply(&self, tree: &AllocationTree, id: &str, edit: Edit) -> EditOutcome {
        match try_apply_edit(tree, id, edit) {
            Some(updated) => {
                for issue in updated.inconsistencies() {
                    warn!(
                        id = %issue.id,
                        value = issue.value,
                        children_sum = issue.children_sum,
                        "sum invariant broken after edit"
                    );
                }
                info!(id, %edit, "edit applied");
                EditOutcome::Applied {
                    tree: updated,
                    edit,
                }
            }
            None => {
                warn!(id, "node not found, tree unchanged");
                EditOutcome::NotFound { tree: tree.clone() }
            }
        }
    }
}
