//! Configuration management for npm-start
//!
//! Settings come from the environment the lifecycle runs the buildpack in.
//!
//! # Environment Variables
//!
//! - `BP_NODE_PROJECT_PATH`: project subdirectory relative to the working
//!   directory - default: the working directory itself
//! - `BP_LIVE_RELOAD_ENABLED`: run the app under watchexec (boolean) - default: disabled
//! - `BP_LOG_LEVEL`: logging level - default: "info"
//! - `CNB_BUILDPACK_DIR`: directory holding `buildpack.toml` - default: parent
//!   of the directory containing the executable

use crate::launch::reload::LIVE_RELOAD_ENV;
use crate::launch::shell::OS_RELEASE_PATH;
use crate::launch::{OsReleaseProbe, WatchexecReloader};
use crate::project_path::{ProjectPathParser, PROJECT_PATH_ENV};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_LOG_LEVEL: &str = "info";

pub const LOG_LEVEL_ENV: &str = "BP_LOG_LEVEL";
pub const BUILDPACK_DIR_ENV: &str = "CNB_BUILDPACK_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to locate the buildpack directory: {0}")]
    BuildpackDir(String),
}

#[derive(Debug, Clone)]
pub struct BuildpackConfig {
    /// Raw `BP_NODE_PROJECT_PATH`
    pub project_path: Option<String>,

    /// Raw `BP_LIVE_RELOAD_ENABLED`, parsed by the reloader
    pub live_reload: Option<String>,

    /// Logging level (trace, debug, info, warn, error); anything else logs at info
    pub log_level: String,

    pub buildpack_dir: Option<PathBuf>,

    pub os_release_path: PathBuf,
}

impl Default for BuildpackConfig {
    /// Loads the configuration from the environment
    fn default() -> Self {
        let project_path = env::var(PROJECT_PATH_ENV).ok();
        let live_reload = env::var(LIVE_RELOAD_ENV).ok();

        let log_level = env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let buildpack_dir = env::var(BUILDPACK_DIR_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            project_path,
            live_reload,
            log_level,
            buildpack_dir,
            os_release_path: PathBuf::from(OS_RELEASE_PATH),
        }
    }
}

impl BuildpackConfig {
    pub fn path_parser(&self) -> ProjectPathParser {
        ProjectPathParser::new(self.project_path.clone())
    }

    pub fn reloader(&self) -> WatchexecReloader {
        WatchexecReloader::new(self.live_reload.clone())
    }

    pub fn os_release_probe(&self) -> OsReleaseProbe {
        OsReleaseProbe::new(self.os_release_path.clone())
    }

    /// `CNB_BUILDPACK_DIR`, or the buildpack root above `bin/<executable>`
    pub fn resolve_buildpack_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.buildpack_dir {
            return Ok(dir.clone());
        }

        let exe = env::current_exe().map_err(|e| ConfigError::BuildpackDir(e.to_string()))?;
        exe.parent()
            .and_then(|bin| bin.parent())
            .map(|dir| dir.to_path_buf())
            .ok_or_else(|| {
                ConfigError::BuildpackDir(format!("{} has no parent directory", exe.display()))
            })
    }
}

impl fmt::Display for BuildpackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "npm-start Configuration:")?;
        writeln!(
            f,
            "  Project Path: {}",
            self.project_path.as_deref().unwrap_or("<working dir>")
        )?;
        writeln!(
            f,
            "  Live Reload: {}",
            self.live_reload.as_deref().unwrap_or("<unset>")
        )?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        if let Some(ref dir) = self.buildpack_dir {
            writeln!(f, "  Buildpack Dir: {}", dir.display())?;
        }
        writeln!(f, "  OS Release: {}", self.os_release_path.display())?;
        Ok(())
    }
}
