//! Subcommand handlers
//!
//! Each handler returns the process exit code the lifecycle expects.

use super::commands::{BuildArgs, DetectArgs};
use super::output::Emitter;
use crate::build::{Build, BuildContext};
use crate::cnb::{write_build_plan, write_launch_toml, BuildpackInfo};
use crate::config::BuildpackConfig;
use crate::detect::{detect, DetectOutcome};
use crate::launch::{OsReleaseProbe, ShellCompatibility};
use anyhow::{Context, Result};
use std::env;
use tracing::{debug, error, info};

/// Exit code telling the lifecycle that detection did not pass
pub const DETECT_FAIL_EXIT_CODE: i32 = 100;

pub fn handle_detect(args: &DetectArgs, config: &BuildpackConfig) -> i32 {
    match run_detect(args, config) {
        Ok(DetectOutcome::Pass(plan)) => {
            info!("Detection passed, requires {:?}", plan.requirement_names());
            0
        }
        Ok(DetectOutcome::Fail { reason }) => {
            if let Some(reason) = reason {
                println!("{}", reason);
            }
            DETECT_FAIL_EXIT_CODE
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn run_detect(args: &DetectArgs, config: &BuildpackConfig) -> Result<DetectOutcome> {
    let working_dir = env::current_dir().context("Failed to get current directory")?;
    debug!("Detecting in {}", working_dir.display());

    let outcome = detect(&working_dir, &config.path_parser(), &config.reloader())?;

    if let DetectOutcome::Pass(plan) = &outcome {
        write_build_plan(&args.plan_path, plan).context("Failed to write build plan")?;
    }

    Ok(outcome)
}

pub fn handle_build(args: &BuildArgs, config: &BuildpackConfig) -> i32 {
    match run_build(args, config) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

fn run_build(args: &BuildArgs, config: &BuildpackConfig) -> Result<()> {
    let working_dir = env::current_dir().context("Failed to get current directory")?;
    let buildpack_dir = config.resolve_buildpack_dir()?;
    let buildpack_info = BuildpackInfo::from_dir(&buildpack_dir)?;
    debug!(
        "Building {} in {} (plan: {}, platform: {})",
        buildpack_info.id,
        working_dir.display(),
        args.plan_path.display(),
        args.platform_dir.display()
    );

    let probe = match &args.os_release {
        Some(path) => OsReleaseProbe::new(path.clone()),
        None => config.os_release_probe(),
    };
    let shell = ShellCompatibility::detect(&probe);

    let path_parser = config.path_parser();
    let reloader = config.reloader();
    let build = Build::new(&path_parser, &reloader, shell);

    let context = BuildContext {
        working_dir,
        buildpack_info,
    };
    let mut emitter = Emitter::stdout();
    let result = build.run(&context, &mut emitter)?;

    let launch_toml = write_launch_toml(&args.layers_dir, &result.launch)
        .context("Failed to write launch metadata")?;
    debug!("Launch metadata written to {}", launch_toml.display());

    Ok(())
}
