//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Hierarchical group/type tree builder with single-selection state
#[derive(Parser, Debug)]
#[command(name = "grouptree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Raise log level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Catalog file with groups and types (TOML, or JSON by extension)
    #[arg(short, long, global = true, env = "GROUPTREE_CATALOG", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Use the built-in sample catalog (takes precedence over --catalog)
    #[arg(long, global = true)]
    pub sample: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the group forest
    Tree {
        /// Show every level regardless of expand state
        #[arg(short, long)]
        all: bool,
        /// Hide ids
        #[arg(long)]
        no_ids: bool,
    },

    /// List groups in pre-order with their depth
    Flatten,

    /// Replay clicks and show the resulting selection
    Select {
        /// Clicks: group:<id>, type:<id>, g<id>, t<id> or outside
        #[arg(required = true)]
        clicks: Vec<String>,
        /// Show every level regardless of expand state
        #[arg(short, long)]
        all: bool,
    },

    /// Report orphaned groups and unattached types
    Check,

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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
    /// Print a commented template
    Template,
}
