//! Detect phase
//!
//! Passes for projects whose package.json declares a `start` script and
//! requires Node.js, npm and the installed node_modules at launch.

use crate::launch::reload::WATCHEXEC;
use crate::launch::{BuildPlan, BuildPlanRequirement, ReloadError, Reloader};
use crate::manifest::{ManifestError, PackageJson, NODE_MODULES, PACKAGE_JSON};
use crate::project_path::{PathParser, ProjectPathError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const NODE: &str = "node";
pub const NPM: &str = "npm";

pub const NO_START_SCRIPT: &str = "no start script in package.json";

#[derive(Debug, Error)]
pub enum DetectError {
    #[error(transparent)]
    ProjectPath(#[from] ProjectPathError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Reload(#[from] ReloadError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetectOutcome {
    Pass(BuildPlan),
    Fail { reason: Option<String> },
}

impl DetectOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, DetectOutcome::Pass(_))
    }
}

pub fn detect(
    working_dir: &Path,
    path_parser: &dyn PathParser,
    reloader: &dyn Reloader,
) -> Result<DetectOutcome, DetectError> {
    let project_path = path_parser.get(working_dir)?;
    let manifest = project_path.join(PACKAGE_JSON);

    let package = match PackageJson::from_path(&manifest) {
        Ok(package) => package,
        Err(e) if e.is_not_found() => {
            debug!("No package.json at {}", manifest.display());
            return Ok(DetectOutcome::Fail { reason: None });
        }
        Err(e) => return Err(e.into()),
    };
    if !package.has_start_command() {
        return Ok(DetectOutcome::Fail {
            reason: Some(NO_START_SCRIPT.to_string()),
        });
    }

    let mut requires = vec![
        BuildPlanRequirement::at_launch(NODE),
        BuildPlanRequirement::at_launch(NPM),
        BuildPlanRequirement::at_launch(NODE_MODULES),
    ];

    if reloader.should_enable_live_reload()? {
        requires.push(BuildPlanRequirement::at_launch(WATCHEXEC));
    }

    Ok(DetectOutcome::Pass(BuildPlan { requires }))
}
