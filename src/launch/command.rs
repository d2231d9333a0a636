//! Start command composition
//!
//! npm runs `prestart`, `start` and `poststart` in sequence for `npm start`.
//! The launch process reproduces that without npm in the loop by chaining the
//! scripts with `&&`, so a failing stage stops the rest.

use super::shell::ShellCompatibility;
use crate::manifest::ScriptSet;
use std::fmt;
use std::path::Path;

/// Run when package.json has no start script, matching npm's own fallback
pub const DEFAULT_START_COMMAND: &str = "node server.js";

const SEQUENCE: &str = " && ";

/// The scripts of a package.json chained into one shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCommand {
    command: String,
}

impl StartCommand {
    /// Chains the scripts and, for projects below the working directory,
    /// changes into the project first
    pub fn compose(scripts: &ScriptSet, project_path: &Path, working_dir: &Path) -> Self {
        let mut stages: Vec<String> = Vec::with_capacity(4);

        if project_path != working_dir {
            stages.push(format!("cd {}", shell_path(project_path)));
        }

        if !scripts.pre_start.is_empty() {
            stages.push(scripts.pre_start.clone());
        }

        if scripts.start.is_empty() {
            stages.push(DEFAULT_START_COMMAND.to_string());
        } else {
            stages.push(scripts.start.clone());
        }

        if !scripts.post_start.is_empty() {
            stages.push(scripts.post_start.clone());
        }

        Self {
            command: stages.join(SEQUENCE),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.command
    }

    /// Body of the startup script that runs this command.
    ///
    /// The command runs in a background subshell while the script waits on
    /// it, forwarding TERM and INT so the application can shut down cleanly.
    pub fn startup_script(&self, shell: ShellCompatibility) -> String {
        format!(
            "trap 'kill -TERM $CPID' TERM\n\
             trap 'kill -INT $CPID' INT\n\
             ( {} ) &\n\
             CPID=\"$!\"\n\
             wait $CPID\n",
            shell.apply(&self.command)
        )
    }
}

impl fmt::Display for StartCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)
    }
}

fn shell_path(path: &Path) -> String {
    let path = path.to_string_lossy();
    let plain = path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./+,=:@%".contains(c));

    if plain {
        path.into_owned()
    } else {
        shell_words::quote(&path).into_owned()
    }
}
