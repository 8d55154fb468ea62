//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Croupier - post a random matching picture to a GroupMe chat
#[derive(Parser, Debug)]
#[command(name = "croupier")]
#[command(about = "Post a random matching picture to a GroupMe chat", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Additional configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override test mode (true builds messages without sending them)
    #[arg(long, global = true)]
    pub test_mode: Option<bool>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the chat callback server
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Post one picture matching SEARCH, or any picture when omitted
    Post {
        /// Search words
        search: Vec<String>,
    },

    /// Apply pending ledger database migrations
    Migrate,
}

impl Cli {
    /// Configuration overrides implied by the flags.
    pub fn overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(test_mode) = self.test_mode {
            overrides.push(("test_mode", test_mode.to_string()));
        }
        if let Commands::Serve { port: Some(port) } = &self.command {
            overrides.push(("server.port", port.to_string()));
        }
        overrides
    }
}
