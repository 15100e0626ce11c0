//! `zazu version` command

use anyhow::Result;

use crate::cli::VersionArgs;
use zazu::ops::describe_version;
use zazu::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: VersionArgs) -> Result<()> {
    let (repo, _) = ctx.open_repository()?;
    let info = describe_version(&repo, args.build_number)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{}", info.semver);
        println!("{}", info.pep440);
    }

    Ok(())
}
