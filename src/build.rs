//! Build phase
//!
//! Turns the project's start scripts into launch processes: compose the
//! command, write it into `start.sh`, run that script as the `web` process,
//! and hand the process to the live reload transformation when enabled.

use crate::cli::output::Emitter;
use crate::cnb::BuildpackInfo;
use crate::launch::{
    write_startup_script, BuildResult, BuildpackPlan, LaunchMetadata, ProcessBuilder, ReloadError,
    ReloadMode, Reloader, ScriptError, ShellCompatibility, StartCommand, WEB_PROCESS_TYPE,
};
use crate::manifest::{ManifestError, PackageJson, PACKAGE_JSON};
use crate::project_path::{PathParser, ProjectPathError};
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// Shell the launch process runs the startup script with
const SCRIPT_SHELL: &str = "sh";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    ProjectPath(#[from] ProjectPathError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Reload(#[from] ReloadError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("failed to write build output")]
    Output(#[from] io::Error),
}

/// Inputs the lifecycle provides to the build phase
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub working_dir: PathBuf,
    pub buildpack_info: BuildpackInfo,
}

pub struct Build<'a> {
    path_parser: &'a dyn PathParser,
    reloader: &'a dyn Reloader,
    shell: ShellCompatibility,
}

impl<'a> Build<'a> {
    pub fn new(
        path_parser: &'a dyn PathParser,
        reloader: &'a dyn Reloader,
        shell: ShellCompatibility,
    ) -> Self {
        Self {
            path_parser,
            reloader,
            shell,
        }
    }

    pub fn run<W: Write>(
        &self,
        context: &BuildContext,
        emitter: &mut Emitter<W>,
    ) -> Result<BuildResult, BuildError> {
        emitter.title(&format!(
            "{} {}",
            context.buildpack_info.name, context.buildpack_info.version
        ))?;

        let project_path = self.path_parser.get(&context.working_dir)?;
        debug!("Project path: {}", project_path.display());

        let package = PackageJson::from_path(&project_path.join(PACKAGE_JSON))?;

        let command = StartCommand::compose(&package.scripts, &project_path, &context.working_dir);
        debug!("Start command: {}", command);

        let reload_mode = ReloadMode::resolve(self.reloader, &project_path)?;

        let script = write_startup_script(&project_path, &command.startup_script(self.shell))?;

        let web = ProcessBuilder::new(WEB_PROCESS_TYPE, SCRIPT_SHELL)
            .arg(script.to_string_lossy())
            .default(true)
            .direct(true)
            .build();

        let processes = reload_mode.apply(self.reloader, web);
        info!(
            "Assigned {} launch process(es), live reload {}",
            processes.len(),
            if reload_mode.is_enabled() { "enabled" } else { "disabled" }
        );

        emitter.process("Assigning launch processes:")?;
        for process in &processes {
            emitter.subprocess(&process.to_string())?;
        }
        emitter.break_line()?;

        Ok(BuildResult {
            plan: BuildpackPlan { entries: vec![] },
            launch: LaunchMetadata { processes },
        })
    }
}
