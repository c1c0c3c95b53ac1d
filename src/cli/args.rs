//! CLI argument definitions using clap
//!
//! Commands:
//! - gazette-api serve [--port N] [--data-file PATH]
//! - gazette-api query [--data-file PATH] [--territory ID] [--since D] ...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gazette API - query government gazette publications
#[derive(Parser, Debug)]
#[command(name = "gazette-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Port to listen on (overrides QUERIDO_DIARIO_API_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Serve gazettes from a JSON file instead of Elasticsearch
        #[arg(long)]
        data_file: Option<PathBuf>,
    },

    /// Run one query and print the results as JSON
    Query {
        /// Read gazettes from a JSON file instead of Elasticsearch
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Territory identifier (all territories when omitted)
        #[arg(long)]
        territory: Option<String>,

        /// Earliest publication date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,

        /// Latest publication date (YYYY-MM-DD)
        #[arg(long)]
        until: Option<String>,

        /// Keyword the gazette must contain (repeatable)
        #[arg(long = "keyword")]
        keywords: Vec<String>,

        /// Page number, starting at 1
        #[arg(long)]
        page: Option<String>,

        /// Gazettes per page
        #[arg(long)]
        page_size: Option<String>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
