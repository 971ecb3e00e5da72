//! Command-line interface for pokegrid.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Pokegrid - fill a 3x3 grid with Gen 1 Pokemon
#[derive(Parser, Debug)]
#[command(name = "pokegrid")]
#[command(about = "Grid puzzle engine for Gen 1 Pokemon", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Release a displaced Pokemon when a placement overwrites its cell
    #[arg(long, global = true)]
    pub release_on_overwrite: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a Pokemon by name or Pokedex number
    Pokemon {
        /// Name (case-insensitive) or number
        query: String,
    },

    /// List all levels
    Levels,

    /// Show one level's criteria
    Level {
        /// Level number
        id: u32,
    },

    /// Play interactively, or run a script of commands
    Play {
        /// Level to start on
        #[arg(short, long)]
        level: Option<u32>,

        /// Read commands from this file instead of stdin
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Apply a JSON array of actions and print the final board
    Replay {
        /// File holding the action log
        file: PathBuf,
    },
}
