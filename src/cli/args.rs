//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Editable hierarchical allocation tree: proportional distribution down, aggregation up
#[derive(Parser, Debug)]
#[command(name = "alloctree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project directory holding .alloctree.toml (default: cwd)
    #[arg(
        short = 'C',
        long,
        global = true,
        env = "ALLOCTREE_PROJECT_DIR",
        value_hint = ValueHint::DirPath
    )]
    pub project_dir: Option<PathBuf>,

    /// Seed file (overrides the configured seed)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub seed: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the allocation tree
    Show,

    /// Edit one line item and print the resulting tree
    Edit {
        /// Id of the line item
        id: String,
        #[command(flatten)]
        amount: AmountArgs,
    },

    /// Show a line item's deviation from its baseline
    Variance {
        /// Id of the line item
        id: String,
    },

    /// Print the grand total
    Total,

    /// Report parents whose value differs from their children's sum
    Check,

    /// Edit interactively, one command per line from stdin
    Session,

    /// Print the built-in sample as a seed file
    Sample,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Exactly one edit mode per edit. Amounts stay strings so that empty and
/// non-numeric input is reported by the allocation engine's own validation.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct AmountArgs {
    /// Change by this many percent of the current value
    #[arg(short, long, allow_hyphen_values = true)]
    pub percent: Option<String>,

    /// Set to this absolute amount
    #[arg(short = 'a', long = "value", allow_hyphen_values = true)]
    pub value: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
