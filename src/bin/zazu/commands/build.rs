//! `zazu build` command

use std::time::Instant;

use anyhow::Result;

use crate::cli::BuildArgs;
use zazu::builder::{CMakeTool, ShellScriptRunner};
use zazu::ci::{running_under_teamcity, select_build_server};
use zazu::ops::{plan_build, run_build, BuildContext, BuildRequest, Tools};
use zazu::GlobalContext;

pub fn execute(ctx: &GlobalContext, args: BuildArgs) -> Result<()> {
    let start = Instant::now();

    let (repo, root) = ctx.open_repository()?;
    let project = ctx.load_project(&root)?;
    let config = ctx.load_config(&root);

    let request = BuildRequest {
        goal: args.goal,
        arch: args.arch,
        build_type: args.build_type,
        build_number: args.build_number,
        extra_args: args.vars,
        component: args.component,
    };

    let plan = plan_build(&project, &request, &repo)?;

    if args.plan {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let native = CMakeTool::new()
        .with_extra_arches(config.cmake.extra_arches.iter().cloned())
        .with_toolchain_dir(config.cmake.toolchain_dir.clone());
    let scripts = ShellScriptRunner::default();
    let build_server =
        select_build_server(project.ci(), &config.ci, running_under_teamcity())?;

    let build_ctx = BuildContext {
        build_dir: root.join(config.build_dir()),
        root,
        verbose: ctx.is_verbose(),
    };
    let tools = Tools {
        native: &native,
        scripts: &scripts,
        build_server: build_server.as_ref(),
    };

    run_build(&plan, &build_ctx, &tools)?;

    eprintln!(
        "    Finished {} ({}) for {} in {:.2}s",
        plan.spec.goal(),
        plan.spec.build_type(),
        plan.spec.arch(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
