//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// rmx - Resolve RapidMiner extension descriptors
#[derive(Parser, Debug)]
#[command(name = "rmx")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Resolve the extension project and print its manifest
    ///
    /// Sibling project references resolve to directories next to the
    /// project directory.
    ///
    /// Examples:
    ///   rmx manifest                       # Project in the current directory
    ///   rmx manifest -p web-mining --json  # Another project, as JSON
    Manifest {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Build version, overriding the configured one
        #[arg(long)]
        build_version: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Compute the modules to exclude from the bundled archive
    ///
    /// Reads a resolved dependency graph (JSON) whose roots are the
    /// provided dependencies.
    Exclusions {
        /// Resolved dependency graph file
        #[arg(short, long)]
        graph: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the directory the extension is installed into
    InstallDir {
        /// Project directory
        #[arg(short, long, default_value = ".")]
        project: PathBuf,
    },
}
