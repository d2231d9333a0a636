//! Live reload
//!
//! With live reload enabled the default `web` process runs the application
//! under a file watcher that restarts it on source changes, and the plain
//! process stays available as `no-reload`.

use super::process::{Process, ProcessBuilder, NO_RELOAD_PROCESS_TYPE, WEB_PROCESS_TYPE};
use crate::manifest::{NODE_MODULES, PACKAGE_JSON, PACKAGE_LOCK_JSON};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const LIVE_RELOAD_ENV: &str = "BP_LIVE_RELOAD_ENABLED";

/// File watcher required at launch when live reload is enabled
pub const WATCHEXEC: &str = "watchexec";

#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("failed to parse BP_LIVE_RELOAD_ENABLED value {value}: expected a boolean")]
    InvalidFlag { value: String },

    #[error("{message}")]
    Other { message: String },
}

/// Paths the watcher monitors and paths that never trigger a restart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadableProcessSpec {
    pub watch_paths: Vec<String>,
    pub ignore_paths: Vec<String>,
}

impl ReloadableProcessSpec {
    /// Watches the project and ignores the files npm rewrites on install
    pub fn for_project(project_path: &Path) -> Self {
        let path_string = |p: &Path| p.to_string_lossy().into_owned();

        Self {
            watch_paths: vec![path_string(project_path)],
            ignore_paths: vec![
                path_string(&project_path.join(PACKAGE_JSON)),
                path_string(&project_path.join(PACKAGE_LOCK_JSON)),
                path_string(&project_path.join(NODE_MODULES)),
            ],
        }
    }
}

/// Reload policy and process transformation
pub trait Reloader {
    fn should_enable_live_reload(&self) -> Result<bool, ReloadError>;

    /// Returns `(non_reloadable, reloadable)` variants of `original`
    fn transform_reloadable_processes(
        &self,
        original: &Process,
        spec: &ReloadableProcessSpec,
    ) -> (Process, Process);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadMode {
    Disabled,
    Enabled(ReloadableProcessSpec),
}

impl ReloadMode {
    pub fn resolve(reloader: &dyn Reloader, project_path: &Path) -> Result<Self, ReloadError> {
        if reloader.should_enable_live_reload()? {
            Ok(ReloadMode::Enabled(ReloadableProcessSpec::for_project(
                project_path,
            )))
        } else {
            Ok(ReloadMode::Disabled)
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ReloadMode::Enabled(_))
    }

    /// Final process list for `original`
    pub fn apply(&self, reloader: &dyn Reloader, original: Process) -> Vec<Process> {
        match self {
            ReloadMode::Disabled => vec![original],
            ReloadMode::Enabled(spec) => {
                let (mut non_reloadable, mut reloadable) =
                    reloader.transform_reloadable_processes(&original, spec);

                reloadable.process_type = WEB_PROCESS_TYPE.to_string();
                reloadable.default = true;
                non_reloadable.process_type = NO_RELOAD_PROCESS_TYPE.to_string();
                non_reloadable.default = false;

                vec![reloadable, non_reloadable]
            }
        }
    }
}

/// Reloads with watchexec, enabled through `BP_LIVE_RELOAD_ENABLED`
#[derive(Debug, Clone, Default)]
pub struct WatchexecReloader {
    flag: Option<String>,
}

impl WatchexecReloader {
    /// `flag` is the raw `BP_LIVE_RELOAD_ENABLED` value, if set
    pub fn new(flag: Option<String>) -> Self {
        Self { flag }
    }
}

impl Reloader for WatchexecReloader {
    fn should_enable_live_reload(&self) -> Result<bool, ReloadError> {
        match self.flag.as_deref() {
            None => Ok(false),
            Some(value) => parse_bool(value).ok_or_else(|| ReloadError::InvalidFlag {
                value: value.to_string(),
            }),
        }
    }

    fn transform_reloadable_processes(
        &self,
        original: &Process,
        spec: &ReloadableProcessSpec,
    ) -> (Process, Process) {
        let mut args = vec!["--restart".to_string()];
        for path in &spec.watch_paths {
            args.push("--watch".to_string());
            args.push(path.clone());
        }
        args.push("--shell".to_string());
        args.push("none".to_string());
        for path in &spec.ignore_paths {
            args.push("--ignore".to_string());
            args.push(path.clone());
        }
        args.push("--".to_string());
        args.push(original.command.clone());
        args.extend(original.args.iter().cloned());

        let reloadable = ProcessBuilder::new(original.process_type.clone(), WATCHEXEC)
            .args(args)
            .default(original.default)
            .direct(true)
            .build();

        debug!("Reloadable process: {}", reloadable);
        (original.clone(), reloadable)
    }
}

/// Boolean spellings accepted for `BP_LIVE_RELOAD_ENABLED`
fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
