//! Seed files: the initial allocation handed to the tree builder
//!
//! Format (TOML), one `[[items]]` table per root:
//!
//! ```toml
//! [[items]]
//! id = "electronics"
//! label = "Electronics"
//!
//! [[items.children]]
//! id = "phones"
//! label = "Phones"
//! value = 800.0
//! ```

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{AllocationTree, NodeSpec, TreeBuilder};

/// Parsed seed file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SeedFile {
    #[serde(default)]
    pub items: Vec<NodeSpec>,
}

impl SeedFile {
    /// Parse seed TOML. `origin` names the source in error messages.
    pub fn parse(content: &str, origin: &str) -> ApplicationResult<Self> {
        toml::from_str(content).map_err(|e| ApplicationError::InvalidSeed {
            origin: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Sales allocation used when no seed file is configured.
    pub fn sample() -> Self {
        Self {
            items: vec![
                NodeSpec::branch(
                    "electronics",
                    "Electronics",
                    vec![
                        NodeSpec::leaf("phones", "Phones", 800.0),
                        NodeSpec::leaf("laptops", "Laptops", 700.0),
                    ],
                ),
                NodeSpec::branch(
                    "furniture",
                    "Furniture",
                    vec![
                        NodeSpec::leaf("tables", "Tables", 300.0),
                        NodeSpec::leaf("chairs", "Chairs", 700.0),
                    ],
                ),
            ],
        }
    }

    /// Build the allocation tree; every node's baseline is its seeded value.
    pub fn build(&self) -> ApplicationResult<AllocationTree> {
        Ok(TreeBuilder::new().build(&self.items)?)
    }

    pub fn to_toml(&self) -> ApplicationResult<String> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::InvalidSeed {
            origin: "export".to_string(),
            message: e.to_string(),
        })
    }
}
