//! Command implementations

pub mod build;
pub mod completions;
pub mod version;

use anyhow::{Context, Result};

use crate::cli::Cli;
use zazu::GlobalContext;

/// Build the global context from the global flags.
pub fn context(cli: &Cli) -> Result<GlobalContext> {
    let mut ctx = match &cli.directory {
        Some(dir) => {
            let dir = dir
                .canonicalize()
                .with_context(|| format!("cannot change to directory `{}`", dir.display()))?;
            GlobalContext::with_cwd(dir)
        }
        None => GlobalContext::new()?,
    };
    ctx.set_verbose(cli.verbose);
    Ok(ctx)
}
