//! Command-line interface definitions and parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the mail API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and print its user id
    Register {
        /// Account name
        name: String,
        /// Account password
        password: String,
    },
    /// Log in and show the inbox
    Login {
        /// Account name
        name: String,
        /// Account password
        password: String,
    },
    /// List the messages addressed to a user
    Inbox {
        /// User id
        user_id: String,
    },
    /// Create a message and deliver it to each recipient
    Send {
        /// Sender's user id
        #[arg(long)]
        from: String,
        /// Comma-separated recipient ids
        #[arg(long)]
        to: String,
        /// Subject line
        #[arg(short, long, default_value = "")]
        subject: String,
        /// Message body
        #[arg(short, long, default_value = "")]
        body: String,
    },
    /// Show the full content of a message
    Show {
        /// Message id
        message_id: String,
    },
    /// Remove a message from one user's inbox
    Delete {
        /// User id
        user_id: String,
        /// Message id
        message_id: String,
    },
}
