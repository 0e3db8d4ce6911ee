//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Gangway - Lua binding generator for C++ script classes
#[derive(Parser)]
#[command(name = "gangway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate Lua wrappers for annotated headers
    Generate(GenerateArgs),

    /// List exported declarations without generating code
    Scan(ScanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Directory containing headers to scan for LUA_EXPORT markers
    pub header_dir: PathBuf,

    /// Output directory for generated wrappers (defaults to a `generated`
    /// directory next to the header root)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Restrict scanning to headers matching these glob patterns
    #[arg(long = "header")]
    pub header: Vec<String>,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Directory containing headers to scan
    pub header_dir: PathBuf,

    /// Print the discovered exports as JSON
    #[arg(long)]
    pub json: bool,

    /// Restrict scanning to headers matching these glob patterns
    #[arg(long = "header")]
    pub header: Vec<String>,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
