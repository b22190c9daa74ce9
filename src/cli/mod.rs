//! CLI entry point for nais-agent.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Inspect and exercise the assistant's tool set
#[derive(Parser, Debug)]
#[command(name = "nais-agent", version, about = "Nais platform assistant tooling")]
pub struct Cli {
    /// Config file (defaults to ~/.nais-agent/config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tool definitions sent to the model
    Tools(ToolsArgs),
    /// Check a GraphQL query against the schema and security policy
    Validate(ValidateArgs),
    /// Run a single tool
    Call(CallArgs),
}

/// Schema location shared by every command.
#[derive(Args, Debug)]
pub struct SchemaArg {
    /// GraphQL schema (SDL) file
    #[arg(long)]
    pub schema: PathBuf,
}

/// Arguments for `nais-agent tools`.
#[derive(Args, Debug)]
pub struct ToolsArgs {
    #[command(flatten)]
    pub schema: SchemaArg,

    /// Print JSON-schema input definitions instead
    #[arg(long)]
    pub json_schema: bool,
}

/// Arguments for `nais-agent validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub schema: SchemaArg,

    /// Query text
    #[arg(long, conflicts_with = "file")]
    pub query: Option<String>,

    /// File containing the query
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for `nais-agent call`.
#[derive(Args, Debug)]
pub struct CallArgs {
    #[command(flatten)]
    pub schema: SchemaArg,

    /// Tool name
    pub tool: String,

    /// Tool arguments as a JSON object
    #[arg(long, default_value = "{}")]
    pub args: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
