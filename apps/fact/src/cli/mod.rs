//! # fact CLI Module
//!
//! ## Available Commands
//!
//! - `demo` - Declare the cat/dog example facts and query them
//! - `add` - Store one fact
//! - `what` - Forward query, or a computed fact when no predicate is given
//! - `who-has` - Backward query
//! - `dump` - Print every stored fact
//! - `status` - Show store status
//! - `export` / `import` - Binary snapshots

mod commands;

use crate::config::FactConfig;
use clap::{Parser, Subcommand};
use fact_core::FactError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// fact - a minimal persistent fact store
///
/// Store subject-predicate-object facts and ask about them in either
/// direction.
#[derive(Parser, Debug)]
#[command(name = "fact")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the fact database (overrides the config file)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Use a volatile in-memory store instead of a database file
    #[arg(long, global = true, conflicts_with = "database")]
    pub memory: bool,

    /// Path to a TOML config file (default: ./fact.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

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
    /// Declare the example facts (cat, dog, meow) and run the example queries
    Demo,

    /// Store a fact: SUBJECT has OBJECT via PREDICATE
    Add {
        subject: String,
        predicate: String,
        object: String,
    },

    /// What do SUBJECTs have via PREDICATE (or: compute the fact SUBJECT)
    What {
        /// One subject, or several for a batch query
        #[arg(required = true)]
        subjects: Vec<String>,

        /// Predicate to follow; omit to resolve a computed fact such as `now`
        #[arg(short, long)]
        predicate: Option<String>,
    },

    /// Who has OBJECT via PREDICATE
    WhoHas { predicate: String, object: String },

    /// Print every stored fact
    Dump,

    /// Show store status
    Status,

    /// Export all facts as a binary snapshot
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import facts from a binary snapshot
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, config: &FactConfig) -> Result<(), FactError> {
    let db_path = config.database_path(cli.memory, cli.database.as_deref());
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Demo) => cmd_demo(&db_path, json_mode),
        Some(Commands::Add {
            subject,
            predicate,
            object,
        }) => cmd_add(&db_path, json_mode, &subject, &predicate, &object),
        Some(Commands::What {
            subjects,
            predicate,
        }) => cmd_what(&db_path, json_mode, subjects, predicate.as_deref()),
        Some(Commands::WhoHas { predicate, object }) => {
            cmd_who_has(&db_path, json_mode, &predicate, &object)
        }
        Some(Commands::Dump) => cmd_dump(&db_path, json_mode),
        Some(Commands::Status) => cmd_status(&db_path, json_mode),
        Some(Commands::Export { output }) => cmd_export(&db_path, json_mode, &output),
        Some(Commands::Import { input }) => cmd_import(&db_path, json_mode, &input),
        None => {
            // No subcommand - show status by default
            cmd_status(&db_path, json_mode)
        }
    }
}
