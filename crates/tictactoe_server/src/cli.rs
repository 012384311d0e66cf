//! Command-line interface for tictactoe_server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe game server with REST and MCP interfaces
#[derive(Parser, Debug)]
#[command(name = "tictactoe_server")]
#[command(about = "In-memory tic-tac-toe game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Http {
        /// Host to bind to (overrides config file)
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Port to bind to (overrides config file)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Path to TOML config file (defaults used if missing)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Verbose logging
        #[arg(long, env = "TICTACTOE_DEBUG")]
        debug: bool,
    },

    /// Run the MCP game server (stdio mode)
    Mcp {
        /// Path to TOML config file (defaults used if missing)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,

        /// Verbose logging
        #[arg(long, env = "TICTACTOE_DEBUG")]
        debug: bool,
    },
}
