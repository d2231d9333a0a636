//! Project path resolution
//!
//! Monorepos keep the Node.js application in a subdirectory of the build
//! working directory. `BP_NODE_PROJECT_PATH` names that subdirectory relative
//! to the working directory; when it is unset or empty the working directory
//! itself is the project.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const PROJECT_PATH_ENV: &str = "BP_NODE_PROJECT_PATH";

#[derive(Debug, Error)]
pub enum ProjectPathError {
    #[error("expected value derived from BP_NODE_PROJECT_PATH [{value}] to be an existing directory")]
    NotADirectory { value: String },

    #[error("failed to inspect project path {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolves the directory containing the project manifest
pub trait PathParser {
    fn get(&self, working_dir: &Path) -> Result<PathBuf, ProjectPathError>;
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPathParser {
    custom_path: Option<String>,
}

impl ProjectPathParser {
    pub fn new(custom_path: Option<String>) -> Self {
        Self { custom_path }
    }
}

impl PathParser for ProjectPathParser {
    fn get(&self, working_dir: &Path) -> Result<PathBuf, ProjectPathError> {
        let custom_path = match self.custom_path.as_deref() {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(working_dir.to_path_buf()),
        };

        let project_path = working_dir.join(custom_path);
        debug!(
            "Resolving {}={} to {}",
            PROJECT_PATH_ENV,
            custom_path,
            project_path.display()
        );

        match fs::metadata(&project_path) {
            Ok(metadata) if metadata.is_dir() => Ok(project_path),
            Ok(_) => Err(ProjectPathError::NotADirectory {
                value: custom_path.to_string(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ProjectPathError::NotADirectory {
                value: custom_path.to_string(),
            }),
            Err(source) => Err(ProjectPathError::Io {
                path: project_path,
                source,
            }),
        }
    }
}
