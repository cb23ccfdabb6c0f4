//! # Fabrica CLI Module
//!
//! This module implements the CLI interface for Fabrica.
//!
//! ## Available Commands
//!
//! - `catalog` - List registered product templates
//! - `build` - Construct a product through the staged builder
//! - `create` - Construct a product through the factory registry
//! - `cache` - Operate on the process-wide shared cache
//! - `validate` - Parse and cross-check a catalog file

mod commands;

use clap::{Parser, Subcommand};
use fabrica_core::FabricaError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Fabrica - Staged Construction Toolkit
///
/// Constructs immutable products from declared templates: staged builders,
/// a discriminant-keyed factory registry, and a process-wide shared cache.
#[derive(Parser, Debug)]
#[command(name = "fabrica")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the catalog file (defaults to the built-in catalog)
    #[arg(short = 'C', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered product templates
    Catalog,

    /// Construct a product through the staged builder
    Build {
        /// Template discriminant to build
        #[arg(short, long)]
        kind: String,

        /// Field assignment, repeatable (name=value)
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Construct a product through the factory registry
    Create {
        /// Registered discriminant to dispatch on
        #[arg(short, long)]
        kind: String,

        /// Field assignment, repeatable (name=value)
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },

    /// Operate on the process-wide shared cache
    Cache {
        #[command(subcommand)]
        op: CacheCommand,
    },

    /// Parse and cross-check a catalog file
    Validate {
        /// File to check (defaults to --catalog)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Operations on the shared cache.
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Store a value under a key
    Set {
        /// Cache key
        key: String,
        /// Value to store
        value: String,
    },

    /// Read the last value stored under a key
    Get {
        /// Cache key
        key: String,
    },

    /// Remove every entry
    Clear,

    /// Show entry count and contents
    Status,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), FabricaError> {
    let catalog_path = cli.catalog.as_deref();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Catalog) => cmd_catalog(catalog_path, json_mode),
        Some(Commands::Build { kind, set }) => cmd_build(catalog_path, json_mode, &kind, &set),
        Some(Commands::Create { kind, set }) => cmd_create(catalog_path, json_mode, &kind, &set),
        Some(Commands::Cache { op }) => cmd_cache(json_mode, &op),
        Some(Commands::Validate { file }) => {
            cmd_validate(file.as_deref().or(catalog_path), json_mode)
        }
        None => {
            // No subcommand - list the catalog by default
            cmd_catalog(catalog_path, json_mode)
        }
    }
}
