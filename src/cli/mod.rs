//! CLI module for HackRx
//!
//! Provides command-line interface parsing and the standalone ingestion and
//! query commands. Uses clap for argument parsing and owo-colors for colored
//! terminal output.

pub mod commands;
pub mod output;

use crate::utils::config::DEFAULT_CONFIG_PATH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HackRx - policy document question answering
///
/// Serves the `/hackrx/run` API, or ingests a document into a persisted
/// index and answers questions from it on the command line.
#[derive(Parser, Debug)]
#[command(
    name = "hackrx",
    version,
    about = "HackRx - policy document question answering",
    long_about = "Retrieval-augmented question answering over PDF, DOCX and MSG documents.\n\n\
                  Run without arguments to start the server, or use 'ingest' and 'query'\n\
                  to work with a persisted index from the command line.",
    after_help = "EXAMPLES:\n    \
                  hackrx                                   # Start the server\n    \
                  hackrx ingest data/policy.pdf            # Build data/policy_index.*\n    \
                  hackrx query -q 'What is the grace period?'\n    \
                  hackrx query                             # Interactive, type 'stop' to end"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Extract, chunk, embed and index a document, then persist the index
    Ingest {
        /// Local path or HTTP(S) URL of the document
        source: String,

        /// Directory receiving the index and texts files
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Base name of the persisted files (defaults to rag.index_base_name)
        #[arg(short, long)]
        base_name: Option<String>,
    },

    /// Answer questions from a persisted index
    Query {
        /// Directory holding the index and texts files
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Base name of the persisted files (defaults to rag.index_base_name)
        #[arg(short, long)]
        base_name: Option<String>,

        /// Question to answer; repeat for several. Omit for an interactive prompt.
        #[arg(short, long = "question")]
        questions: Vec<String>,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
