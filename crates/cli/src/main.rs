//! Marketdeck CLI - Seed data and credential tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the demo dataset to a file for editing (see SEED_PATH)
//! mdk-cli seed export -o seed.json
//!
//! # Hash a password for a hand-edited seed file
//! mdk-cli hash-password secret123
//! ```
//!
//! # Commands
//!
//! - `seed export` - Export the embedded demo dataset as JSON
//! - `hash-password` - Print the Argon2 hash of a password

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mdk-cli")]
#[command(author, version, about = "Marketdeck CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Work with seed datasets
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
    /// Print the Argon2 hash of a password
    HashPassword {
        /// The password to hash
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedAction {
    /// Export the embedded demo dataset as JSON
    Export {
        /// Output path
        #[arg(short, long, default_value = "seed.json")]
        out: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { action } => match action {
            SeedAction::Export { out } => commands::seed::export(&out)?,
        },
        Commands::HashPassword { password } => commands::credentials::hash(&password)?,
    }
    Ok(())
}
