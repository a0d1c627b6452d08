//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Folio - read content from a headless content API
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Rate governed client for headless content APIs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to folio.toml lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging, overriding RUST_LOG
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read one path
    Get {
        /// API path, e.g. cdn/stories
        path: String,

        /// Request parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Read every page of a collection
    All {
        /// API path, e.g. cdn/stories
        path: String,

        /// Collection key in each page (defaults to the last path segment)
        #[arg(long)]
        key: Option<String>,

        /// Request parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// Read a single story by slug
    Story {
        /// Story slug, full slug or id
        slug: String,

        /// Request parameter as key=value (repeatable)
        #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

/// Parse a `key=value` pair.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid key=value: no `=` found in `{s}`"))
}
