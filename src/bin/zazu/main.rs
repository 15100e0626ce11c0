//! Zazu CLI - build, version and publish multi-architecture projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("zazu=debug")
    } else {
        EnvFilter::new("zazu=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let ctx = commands::context(&cli)?;

    match cli.command {
        Commands::Build(args) => commands::build::execute(&ctx, args),
        Commands::Version(args) => commands::version::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
