//! rmx CLI
//!
//! Build glue for RapidMiner extensions: prints the resolved manifest, the
//! bundling exclusions and the install target of an extension project.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} RapidMiner extension tools", "rmx".green().bold());
            println!();
            println!("Run {} for available commands.", "rmx --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Manifest {
            project,
            build_version,
            json,
        } => commands::run_manifest(&project, build_version.as_deref(), json),
        Commands::Exclusions { graph, json } => commands::run_exclusions(&graph, json),
        Commands::InstallDir { project } => commands::run_install_dir(&project),
    }
}
