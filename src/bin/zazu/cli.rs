//! CLI definitions using clap.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use zazu::builder::BUILD_TYPES;

/// Zazu - build, version and publish multi-architecture projects
#[derive(Parser)]
#[command(name = "zazu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run as if zazu was started in this directory
    #[arg(short = 'C', long = "directory", global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a goal of the current project
    Build(BuildArgs),

    /// Print the version derived from the repository
    Version(VersionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Goal to build (or a native build target when no such goal exists)
    pub goal: String,

    /// Extra build variables
    #[arg(value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Architecture to build for
    #[arg(short, long)]
    pub arch: Option<String>,

    /// Build type, replacing the configured one
    #[arg(short = 't', long = "type", value_parser = PossibleValuesParser::new(BUILD_TYPES.iter().copied()))]
    pub build_type: Option<String>,

    /// Build number
    #[arg(short = 'n', long = "build-num", env = "BUILD_NUMBER", default_value_t = 0, value_parser = parse_build_number)]
    pub build_number: u64,

    /// Component to build from (defaults to the first one)
    #[arg(long)]
    pub component: Option<String>,

    /// Print the resolved build as JSON instead of building
    #[arg(long)]
    pub plan: bool,
}

#[derive(Args)]
pub struct VersionArgs {
    /// Build number
    #[arg(short = 'n', long = "build-num", env = "BUILD_NUMBER", default_value_t = 0, value_parser = parse_build_number)]
    pub build_number: u64,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse a build number from `-n` or the `BUILD_NUMBER` environment variable.
fn parse_build_number(value: &str) -> Result<u64, String> {
    value.trim().parse().map_err(|_| {
        format!(
            "build number must be a non-negative integer (from -n/--build-num or the \
             BUILD_NUMBER environment variable), got `{}`",
            value
        )
    })
}
