//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - saves: list auto-detected save folders
//! - list: list products in the selected save
//! - rename / set-name / set-id: single-product changes
//! - bulk: apply a rename-list file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strainer - rename Schedule I products without breaking references
#[derive(Parser, Debug)]
#[command(name = "strainer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Save folder to edit (overrides config and auto-detection)
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List auto-detected save folders
    Saves,

    /// List products in the selected save
    List {
        /// Only show products whose id or name contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Rename a product; a new identifier is derived from the name
    Rename {
        /// Current product identifier
        id: String,

        /// New display name
        new_name: String,
    },

    /// Change a product's display name, keeping its identifier
    SetName {
        /// Product identifier
        id: String,

        /// New display name
        name: String,
    },

    /// Change a product's identifier explicitly
    SetId {
        /// Current identifier
        old_id: String,

        /// New identifier
        new_id: String,

        /// Also set a new display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Apply a bulk rename list (one "old_id,New Name" per line)
    Bulk {
        /// Rename-list file
        file: PathBuf,

        /// Print the plan without changing anything
        #[arg(long)]
        dry_run: bool,
    },
}
