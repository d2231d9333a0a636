//! Startup script materialization
//!
//! Launch processes carry a command and arguments but no working directory,
//! so the `cd` into the project and the signal forwarding live in a script
//! file that the launch process runs with `sh`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const STARTUP_SCRIPT_NAME: &str = "start.sh";

const STARTUP_SCRIPT_MODE: u32 = 0o755;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to write startup script {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to make startup script {} executable", path.display())]
    Permissions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes `body` to `<dir>/start.sh` and makes it executable.
///
/// Returns the path of the written script.
pub fn write_startup_script(dir: &Path, body: &str) -> Result<PathBuf, ScriptError> {
    let path = dir.join(STARTUP_SCRIPT_NAME);

    fs::write(&path, body).map_err(|source| ScriptError::Write {
        path: path.clone(),
        source,
    })?;

    set_executable(&path).map_err(|source| ScriptError::Permissions {
        path: path.clone(),
        source,
    })?;

    debug!("Wrote startup script to {}", path.display());
    Ok(path)
}

#[cfg(unix)]
fn set_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(STARTUP_SCRIPT_MODE))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> io::Result<()> {
    let _ = STARTUP_SCRIPT_MODE;
    Ok(())
}
