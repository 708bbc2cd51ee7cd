//! CLI argument parsing for quicklaunch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quicklaunch")]
#[command(about = "Type a few letters, press enter, run the command", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Load commands from this JSON file instead of discovering installed apps
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Terminal compatibility mode: no alternate screen, no mouse capture
    #[arg(long)]
    pub compat: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive launcher (default)
    Tui,

    /// Print the candidates matching a query and exit
    List {
        /// Search query (empty lists everything)
        #[arg(default_value = "")]
        query: String,

        /// Print candidates as JSON
        #[arg(long)]
        json: bool,
    },
}
