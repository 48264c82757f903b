//! Command-line interface definition.
//!
//! ```bash
//! # Synthetic headings for the callouts in a file
//! chat-outline scan notes/chat.md
//!
//! # Full outline (real headings plus callouts) as JSON
//! chat-outline outline notes/chat.md --format json
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Main CLI structure for the `chat-outline` command
#[derive(Parser, Clone, Debug)]
#[command(name = "chat-outline")]
#[command(version)]
#[command(about = "Show chat callouts as headings in a markdown outline", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to a configuration file (defaults to `CHAT_OUTLINE_CONFIG` or the
    /// user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print the synthetic headings produced for a file's chat callouts
    Scan {
        /// Markdown file to scan
        file: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },

    /// Print a file's heading index with chat callouts merged in
    Outline {
        /// Markdown file to outline
        file: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "pretty")]
        format: OutputFormat,
    },
}

impl Commands {
    pub const fn format(&self) -> OutputFormat {
        match self {
            Self::Scan { format, .. } | Self::Outline { format, .. } => *format,
        }
    }
}
