//! CLI module for strainer - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for save discovery,
//! product listing, and single/bulk renames.

pub mod commands;

pub use commands::Cli;
