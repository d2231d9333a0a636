//! Shell compatibility policy
//!
//! On some distributions `/bin/sh` is a shell that does not deliver the
//! forwarded TERM/INT to a command run inside the backgrounded subshell of the
//! startup script. There the composed command is re-wrapped in an explicit
//! `bash -c` so every platform sees the same signal semantics.

use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Distribution ids whose `/bin/sh` needs the explicit bash wrapper
const BASH_WRAPPED_DISTROS: &[&str] = &["ubuntu", "debian"];

/// How the platform shell delivers signals to the launched command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalForwarding {
    Native,
    RequiresBash,
}

/// Reports platform capabilities relevant to the startup script
pub trait PlatformProbe {
    fn signal_forwarding(&self) -> SignalForwarding;
}

/// Identifies the platform from an os-release file
#[derive(Debug, Clone)]
pub struct OsReleaseProbe {
    path: PathBuf,
}

impl Default for OsReleaseProbe {
    fn default() -> Self {
        Self::new(OS_RELEASE_PATH)
    }
}

impl OsReleaseProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `ID` followed by the `ID_LIKE` entries, lowercased
    pub fn distribution_ids(&self) -> Vec<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_distribution_ids(&content),
            Err(e) => {
                debug!("Unable to read {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }
}

impl PlatformProbe for OsReleaseProbe {
    fn signal_forwarding(&self) -> SignalForwarding {
        let ids = self.distribution_ids();
        if ids
            .iter()
            .any(|id| BASH_WRAPPED_DISTROS.contains(&id.as_str()))
        {
            SignalForwarding::RequiresBash
        } else {
            SignalForwarding::Native
        }
    }
}

fn parse_distribution_ids(content: &str) -> Vec<String> {
    let mut id = Vec::new();
    let mut id_like = Vec::new();

    for line in content.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');
        match key.trim() {
            "ID" => id.push(value.to_lowercase()),
            "ID_LIKE" => id_like.extend(value.split_whitespace().map(str::to_lowercase)),
            _ => {}
        }
    }

    id.extend(id_like);
    id
}

/// Resolved once per startup script and applied to the composed command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShellCompatibility {
    #[default]
    Posix,
    BashWrapped,
}

impl ShellCompatibility {
    pub fn detect(probe: &dyn PlatformProbe) -> Self {
        let policy = match probe.signal_forwarding() {
            SignalForwarding::Native => ShellCompatibility::Posix,
            SignalForwarding::RequiresBash => ShellCompatibility::BashWrapped,
        };
        debug!("Shell compatibility policy: {:?}", policy);
        policy
    }

    pub fn apply(&self, command: &str) -> String {
        match self {
            ShellCompatibility::Posix => command.to_string(),
            ShellCompatibility::BashWrapped => {
                format!("bash -c {}", shell_words::quote(command))
            }
        }
    }
}
