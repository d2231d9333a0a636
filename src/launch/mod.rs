//! Launch process assembly
//!
//! - [`command`]: chains the package.json start scripts into one command
//! - [`shell`]: platform shell compatibility policy
//! - [`script`]: writes the signal-forwarding startup script
//! - [`reload`]: live reload policy and process transformation
//! - [`process`]: launch process and build plan types

pub mod command;
#[cfg(test)]
pub(crate) mod fakes;
pub mod process;
pub mod reload;
pub mod script;
pub mod shell;

pub use command::{StartCommand, DEFAULT_START_COMMAND};
pub use process::{
    BuildPlan, BuildPlanRequirement, BuildResult, BuildpackPlan, LaunchMetadata, Process,
    ProcessBuilder, NO_RELOAD_PROCESS_TYPE, WEB_PROCESS_TYPE,
};
pub use reload::{ReloadError, ReloadMode, ReloadableProcessSpec, Reloader, WatchexecReloader};
pub use script::{write_startup_script, ScriptError, STARTUP_SCRIPT_NAME};
pub use shell::{OsReleaseProbe, PlatformProbe, ShellCompatibility, SignalForwarding};
