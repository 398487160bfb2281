//! CLI module for the Stockroom server
//!
//! Provides command-line interface parsing for the stockroom-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stockroom - multi-store inventory server
#[derive(Parser, Debug)]
#[command(
    name = "stockroom-server",
    version,
    about = "Stockroom - multi-store inventory server",
    long_about = "HTTP backend for users, stores, products and stock records,\n\
                  with token-based authentication.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a deployment.",
    after_help = "EXAMPLES:\n    \
                  stockroom-server init                 # Scaffold stockroom.toml and .env.example\n    \
                  stockroom-server                      # Start the server\n    \
                  stockroom-server --config prod.toml   # Use a custom config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "stockroom.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (the default)
    Serve,

    /// Scaffold stockroom.toml, .env.example and the data/ directory
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
