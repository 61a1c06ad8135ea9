//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// PromptCraft - prompt template catalog
#[derive(Parser, Debug)]
#[command(
    name = "pc",
    author,
    version,
    about = "Browse prompt templates and fill in their variables",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Catalog file, overriding the config
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Output format for rendered prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List categories with their prompt counts
    Categories,

    /// List prompts, free first then locked
    List {
        /// Category slug, id or name
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Text to look for in title, content, description and use cases
        #[arg(short, long)]
        search: Option<String>,

        /// Include draft and archived prompts
        #[arg(short, long)]
        all: bool,
    },

    /// Show a prompt's template and variables
    Show {
        /// Prompt ID
        id: String,
    },

    /// Render a prompt with the given values
    Render {
        /// Prompt ID
        id: String,

        /// Variable value as NAME=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,

        /// Start from the prompt's example values
        #[arg(short, long)]
        example: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Fill a prompt's variables interactively
    Fill {
        /// Prompt ID
        id: String,
    },

    /// Validate an authored prompt draft and print the catalog entry
    Draft {
        /// Draft file (YAML)
        file: PathBuf,

        /// Id for the new prompt
        #[arg(long)]
        id: String,
    },

    /// Validate a catalog file
    Check {
        /// Catalog file (defaults to the configured catalog)
        file: Option<PathBuf>,
    },
}

/// Split a `NAME=VALUE` argument; the value may itself contain `=`
pub fn parse_assignment(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}
